//! Container block directives.
//!
//! A container opens with a run of three or more markers followed by the
//! directive name and closes on a line holding a marker run of exactly the
//! same length. Longer or shorter runs inside the body belong to nested
//! containers, so fences of different lengths nest freely:
//!
//! ```text
//! @@@@outer
//! @@@inner
//! body
//! @@@
//! @@@@
//! ```
//!
//! The body is parsed as an independent document with the same configuration,
//! then its offsets are shifted to the body's position in the outer document.

use crate::ast::{DirectiveNode, Format, Node, NodeKind};
use crate::grammar::{Grammar, RuleResult};

/// Minimum marker run opening a container.
const MIN_CONTAINER_FENCE: usize = 3;

impl Grammar<'_> {
    /// `@@@name [label](source){attributes}`, a body, and a closing fence.
    pub(crate) fn container_block_directive(&self, pos: usize) -> RuleResult<Node> {
        let marker = self.config.directive_marker;
        let (fence, after_fence) = self.run(pos, marker);
        if fence < MIN_CONTAINER_FENCE {
            return Ok(None);
        }
        let Some((name, p)) = self.directive_name(self.sp(after_fence)) else {
            return Ok(None);
        };
        let line_end = self.content_end(p);
        let (label, p) = self.maybe_text_label(p);
        let (source, p) = self.directive_source(p, line_end);
        let (attributes, p) = self.maybe_directive_attributes(p, line_end);
        let Some(body_start) = self.newline(self.sp(p)) else {
            return Ok(None);
        };
        let Some((body_end, next)) = self.container_body(body_start, fence) else {
            return Ok(None);
        };

        let contents = self.slice(body_start, body_end);
        tracing::debug!(
            name = %name,
            fence,
            depth = self.depth + 1,
            offset = body_start,
            "Parsing container body"
        );
        let mut body = self.parse_nested(contents)?;
        body.shift_indices(body_start);

        let directive = DirectiveNode::with_contents(
            Format::ContainerBlock,
            name,
            label,
            source,
            attributes,
            contents,
            body,
        );
        let end = self.span_end(next);
        Ok(Some((Node::new(pos, end, NodeKind::Directive(directive)), next)))
    }

    /// Find the closing fence for a body starting at `body_start`.
    ///
    /// The first body line never closes the container, so a body is never
    /// empty. A body that is only a line terminator fails, since that
    /// terminator already begins the closing fence. Returns the body end and
    /// the position after the closing line.
    fn container_body(&self, body_start: usize, fence: usize) -> Option<(usize, usize)> {
        if let Some(after) = self.newline(body_start)
            && self.closing_fence(after, fence).is_some()
        {
            return None;
        }
        let mut line = self.next_line(body_start);
        while line < self.end_of_input() {
            if let Some(after) = self.closing_fence(line, fence) {
                return Some((line, after));
            }
            line = self.next_line(line);
        }
        None
    }

    /// Line of exactly `fence` markers, optionally followed by spaces.
    fn closing_fence(&self, pos: usize, fence: usize) -> Option<usize> {
        let (count, after) = self.run(pos, self.config.directive_marker);
        if count != fence {
            return None;
        }
        self.newline(self.sp(after))
    }
}
