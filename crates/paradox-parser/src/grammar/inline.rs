//! Inline rules for the host markdown grammar.

use super::{Grammar, Match, RuleResult};
use crate::ParseError;
use crate::ast::{ClassyLinkNode, Node, NodeKind};

/// Characters that may be backslash-escaped in text and directive literals.
pub(crate) const ESCAPABLE: &str = "*_`&[]<>!#\\'\".+-(){}:|~";

/// Where an inline sequence may extend.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Scope {
    /// Inlines must end at or before this position.
    pub(crate) limit: usize,
    /// Whether explicit links may start inside this scope.
    pub(crate) links: bool,
}

impl Scope {
    pub(crate) fn new(limit: usize) -> Self {
        Self {
            limit,
            links: true,
        }
    }

    /// Same scope with explicit links disabled (link and label text).
    pub(crate) fn without_links(self) -> Self {
        Self {
            links: false,
            ..self
        }
    }
}

/// What ends an inline sequence before its scope limit.
#[derive(Clone, Copy, Debug)]
pub(crate) enum Stop {
    /// Only the scope limit.
    End,
    /// A specific character (`]` for labels).
    Char(char),
    /// An emphasis delimiter run of the given length.
    Delim(char, usize),
}

impl Grammar<'_> {
    fn stops(&self, pos: usize, stop: Stop) -> bool {
        match stop {
            Stop::End => false,
            Stop::Char(c) => self.char_at(pos) == Some(c),
            Stop::Delim(c, 2) => self.run(pos, c).0 >= 2,
            Stop::Delim(c, n) => {
                let count = self.run(pos, c).0;
                count == n || count > 2
            }
        }
    }

    /// Parse inlines from `pos` until `stop` or the scope limit.
    ///
    /// Returns the nodes and the position where parsing stopped. Adjacent
    /// text nodes are merged.
    pub(crate) fn inlines(
        &self,
        mut pos: usize,
        scope: Scope,
        stop: Stop,
    ) -> Result<(Vec<Node>, usize), ParseError> {
        let mut nodes = Vec::new();
        while pos < scope.limit && !self.stops(pos, stop) {
            self.check_budget()?;
            let (node, next) = self.inline(pos, scope)?;
            push_merged(&mut nodes, node);
            pos = next;
        }
        Ok((nodes, pos))
    }

    /// Single inline at `pos`; falls back to plain text.
    fn inline(&self, pos: usize, scope: Scope) -> Result<(Node, usize), ParseError> {
        let within = |m: Match<Node>| m.filter(|(_, next)| *next <= scope.limit);

        if let Some(m) = within(self.escaped_var_marker(pos)) {
            return Ok(m);
        }
        if let Some(m) = within(self.var_substitution(pos)) {
            return Ok(m);
        }
        if let Some(m) = within(self.inline_directive(pos, scope)?) {
            return Ok(m);
        }
        if let Some(m) = within(self.code_span(pos, scope.limit)) {
            return Ok(m);
        }
        if let Some(m) = within(self.strong_or_emph(pos, scope)?) {
            return Ok(m);
        }
        if let Some(m) = within(self.escaped_char(pos)) {
            return Ok(m);
        }
        if scope.links
            && let Some(m) = within(self.explicit_link(pos, scope)?)
        {
            return Ok(m);
        }
        if let Some(next) = self.newline(pos) {
            let node = Node::new(pos, next, NodeKind::Text("\n".to_owned()));
            return Ok((node, next));
        }
        Ok(self.text_run(pos, scope.limit))
    }

    fn is_special(&self, c: char) -> bool {
        matches!(c, '\\' | '`' | '*' | '_' | '[' | ']' | '\n' | '\r')
            || c == self.config.directive_marker
            || c == self.config.var_marker
    }

    /// Run of ordinary characters, or a single special one.
    fn text_run(&self, pos: usize, limit: usize) -> (Node, usize) {
        let rest = self.slice(pos, limit);
        let mut end = rest
            .char_indices()
            .find(|&(_, c)| self.is_special(c))
            .map_or(limit, |(i, _)| pos + i);
        if end == pos {
            end += rest.chars().next().map_or(1, char::len_utf8);
        }
        let text = self.slice(pos, end).to_owned();
        (Node::new(pos, end, NodeKind::Text(text)), end)
    }

    /// `` `code` `` with a closing backtick run of the same length.
    fn code_span(&self, pos: usize, limit: usize) -> Match<Node> {
        let (count, body_start) = self.run(pos, '`');
        if count == 0 {
            return None;
        }
        let mut q = body_start;
        while q < limit {
            if self.char_at(q) == Some('`') {
                let (closing, after) = self.run(q, '`');
                if closing == count {
                    let code = self.slice(body_start, q).trim().to_owned();
                    return Some((Node::new(pos, after, NodeKind::Code(code)), after));
                }
                q = after;
            } else {
                q += self.char_at(q).map_or(1, char::len_utf8);
            }
        }
        None
    }

    fn strong_or_emph(&self, pos: usize, scope: Scope) -> RuleResult<Node> {
        let Some(c) = self.char_at(pos).filter(|&c| matches!(c, '*' | '_')) else {
            return Ok(None);
        };
        if c == '_' && self.char_before(pos).is_some_and(char::is_alphanumeric) {
            return Ok(None);
        }
        if self.run(pos, c).0 >= 2
            && let Some(m) = self.delimited(pos, c, 2, scope)?
        {
            return Ok(Some(m));
        }
        self.delimited(pos, c, 1, scope)
    }

    /// Inlines between two delimiter runs of length `n`.
    fn delimited(&self, pos: usize, c: char, n: usize, scope: Scope) -> RuleResult<Node> {
        let inner = pos + n;
        if self.char_at(inner).is_none_or(char::is_whitespace) {
            return Ok(None);
        }
        let stop = Stop::Delim(c, n);
        let (children, end) = self.inlines(inner, scope, stop)?;
        if children.is_empty() || end >= scope.limit || !self.stops(end, stop) {
            return Ok(None);
        }
        let next = end + n;
        let kind = if n == 2 {
            NodeKind::Strong(children)
        } else {
            NodeKind::Emph(children)
        };
        Ok(Some((Node::new(pos, next, kind), next)))
    }

    /// Backslash escape of a punctuation character.
    fn escaped_char(&self, pos: usize) -> Match<Node> {
        if self.char_at(pos) != Some('\\') {
            return None;
        }
        let c = self.char_at(pos + 1).filter(|c| ESCAPABLE.contains(*c))?;
        let next = pos + 1 + c.len_utf8();
        Some((Node::new(pos, next, NodeKind::SpecialText(c.to_string())), next))
    }

    /// `[text](href)`, or `[text](href){.class}` for a classy link.
    fn explicit_link(&self, pos: usize, scope: Scope) -> RuleResult<Node> {
        if self.char_at(pos) != Some('[') {
            return Ok(None);
        }
        let (children, close) = self.inlines(pos + 1, scope.without_links(), Stop::Char(']'))?;
        if self.char_at(close) != Some(']') || !self.starts_with(close + 1, "(") {
            return Ok(None);
        }

        let href_start = close + 2;
        let href_len = self
            .slice(href_start, scope.limit)
            .find(|c: char| c == ')' || c.is_whitespace())
            .unwrap_or(scope.limit.saturating_sub(href_start));
        let href_end = href_start + href_len;
        if self.char_at(href_end) != Some(')') {
            return Ok(None);
        }
        let href = self.slice(href_start, href_end).to_owned();
        let next = href_end + 1;

        if self.char_at(next) == Some('{')
            && let Some((attributes, after)) = self.attributes(next)
            && after <= scope.limit
            && !attributes.classes().is_empty()
        {
            let text = Node::new(pos + 1, close, NodeKind::Super(children));
            let link = ClassyLinkNode::new(href, Some(attributes.classes_string()), text);
            return Ok(Some((Node::new(pos, after, NodeKind::ClassyLink(link)), after)));
        }

        let link = NodeKind::Link { href, children };
        Ok(Some((Node::new(pos, next, link), next)))
    }
}

/// Append `node`, merging it into a directly preceding text node.
fn push_merged(nodes: &mut Vec<Node>, node: Node) {
    if let Some(last) = nodes.last_mut()
        && last.end == node.start
        && let (NodeKind::Text(prev), NodeKind::Text(text)) = (&mut last.kind, &node.kind)
    {
        prev.push_str(text);
        last.end = node.end;
        return;
    }
    nodes.push(node);
}
