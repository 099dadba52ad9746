//! Block-level rules: directive blocks, headers, fenced code and paragraphs.

use super::{Grammar, Match, RuleResult, Scope, Stop};
use crate::ast::{Node, NodeKind, VerbatimGroupNode, wrap_in_anchor};

/// Minimum length of a code fence.
const MIN_CODE_FENCE: usize = 3;

impl Grammar<'_> {
    /// Block at `pos`, which must be at the start of a non-blank line.
    pub(super) fn block(&self, pos: usize) -> RuleResult<Node> {
        if let Some(m) = self.block_directive(pos)? {
            return Ok(Some(m));
        }
        if let Some(m) = self.atx_header(pos)? {
            return Ok(Some(m));
        }
        if let Some(m) = self.fenced_code(pos) {
            return Ok(Some(m));
        }
        self.paragraph(pos)
    }

    /// Header level and the position after the `#` run and its separator.
    fn atx_start(&self, pos: usize) -> Option<(u8, usize)> {
        let (count, after) = self.run(pos, '#');
        let level = u8::try_from(count).ok().filter(|l| (1..=6).contains(l))?;
        let start = self.sp(after);
        if start == after && !self.is_blank_line(after) {
            return None;
        }
        Some((level, start))
    }

    fn atx_header(&self, pos: usize) -> RuleResult<Node> {
        let Some((level, content_start)) = self.atx_start(pos) else {
            return Ok(None);
        };
        let line_end = self.content_end(pos);
        let content_end = self.header_content_end(content_start, line_end);

        let mut children = if content_end > content_start {
            self.inlines(content_start, Scope::new(content_end), Stop::End)?.0
        } else {
            Vec::new()
        };
        if self.config.anchor_links() {
            children = wrap_in_anchor(children);
        }

        let header = Node::new(pos, line_end, NodeKind::Header { level, children });
        Ok(Some((header, self.next_line(pos))))
    }

    /// End of header content with any closing `#` sequence removed.
    fn header_content_end(&self, start: usize, line_end: usize) -> usize {
        let content = self.slice(start, line_end).trim_end_matches([' ', '\t']);
        let unclosed = content.trim_end_matches('#');
        let content = if unclosed.len() < content.len()
            && (unclosed.is_empty() || unclosed.ends_with([' ', '\t']))
        {
            unclosed.trim_end_matches([' ', '\t'])
        } else {
            content
        };
        start + content.len()
    }

    /// Fence character, length and the position after the fence.
    fn code_fence(&self, pos: usize) -> Option<(char, usize, usize)> {
        let open = self.sp(pos);
        if open - pos > 3 {
            return None;
        }
        let fence_char = self.char_at(open).filter(|&c| matches!(c, '`' | '~'))?;
        let (count, after) = self.run(open, fence_char);
        (count >= MIN_CODE_FENCE).then_some((fence_char, count, after))
    }

    /// Fenced code block: ```` ```lang {attrs} ```` ... ```` ``` ````.
    fn fenced_code(&self, pos: usize) -> Match<Node> {
        let (fence_char, fence_len, info_start) = self.code_fence(pos)?;
        let info_end = self.content_end(info_start);
        if fence_char == '`' && self.slice(info_start, info_end).contains('`') {
            return None;
        }

        let body_start = self.next_line(info_start);
        let mut line = body_start;
        let (close, after) = loop {
            if line >= self.end_of_input() {
                return None;
            }
            if let Some(after) = self.closing_code_fence(line, fence_char, fence_len) {
                break (line, after);
            }
            line = self.next_line(line);
        };

        let verbatim = self.verbatim_group(self.slice(body_start, close), info_start, info_end);
        tracing::trace!(lang = verbatim.lang(), "Matched fenced code block");
        let node = Node::new(pos, self.content_end(close), NodeKind::Verbatim(verbatim));
        Some((node, after))
    }

    fn closing_code_fence(&self, pos: usize, fence_char: char, min: usize) -> Option<usize> {
        let (c, count, after) = self.code_fence(pos)?;
        if c != fence_char || count < min {
            return None;
        }
        self.newline(self.sp(after))
    }

    /// Build the verbatim node from the body and the fence's info string.
    fn verbatim_group(&self, text: &str, info_start: usize, info_end: usize) -> VerbatimGroupNode {
        let lang_start = self.sp(info_start);
        let lang = self
            .slice(lang_start, info_end)
            .split(|c: char| c.is_whitespace() || c == '{')
            .next()
            .unwrap_or_default();

        let (attributes, _) = self.maybe_directive_attributes(lang_start + lang.len(), info_end);
        let group = VerbatimGroupNode::new(text, lang)
            .with_group(attributes.value_or("group", ""))
            .with_classes(attributes.classes().to_vec());
        match attributes.value("source") {
            Some(url) => group.with_source_url(url),
            None => group,
        }
    }

    /// Whether the line at `pos` starts a block that ends a paragraph.
    fn interrupts_paragraph(&self, pos: usize) -> bool {
        let start = self.sp(pos);
        self.atx_start(start).is_some()
            || self.code_fence(pos).is_some()
            || self.run(start, self.config.directive_marker).0 >= 2
    }

    /// Paragraph: consecutive non-blank lines.
    fn paragraph(&self, pos: usize) -> RuleResult<Node> {
        let start = self.sp(pos);
        let mut end = self.content_end(start);
        let mut next = self.next_line(start);
        while next < self.end_of_input()
            && !self.is_blank_line(next)
            && !self.interrupts_paragraph(next)
        {
            end = self.content_end(next);
            next = self.next_line(next);
        }

        let (children, _) = self.inlines(start, Scope::new(end), Stop::End)?;
        Ok(Some((Node::new(start, end, NodeKind::Para(children)), next)))
    }
}
