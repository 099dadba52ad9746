//! Directive grammar rules.
//!
//! Three forms are recognized, all producing a
//! [`DirectiveNode`](crate::ast::DirectiveNode):
//!
//! - Inline: `@name[label](source){attributes}` inside running text
//! - Leaf block: `@@name [label](source){attributes}` on its own line
//! - Container block: `@@@name [label](source){attributes}` followed by a body
//!   and a closing line of exactly as many markers as the opening one
//!
//! The marker character comes from [`ParserConfig`](crate::ParserConfig).
//! Variable substitutions (`$name$`) are parsed here as well since they
//! produce inline directives named `var`.

mod attrs;
mod container;
mod inline;
mod leaf;
mod source;

use crate::ast::{Node, NodeKind};
use crate::grammar::{Grammar, Match, RuleResult, Scope, Stop};

impl<'a> Grammar<'a> {
    /// Leaf or container directive block at `pos`.
    pub(crate) fn block_directive(&self, pos: usize) -> RuleResult<Node> {
        if let Some(m) = self.leaf_block_directive(pos)? {
            return Ok(Some(m));
        }
        self.container_block_directive(pos)
    }

    /// Identifier: an ASCII letter, then alphanumerics or `-_.:`.
    pub(crate) fn identifier_end(&self, pos: usize) -> Option<usize> {
        let first = self.char_at(pos).filter(char::is_ascii_alphabetic)?;
        let mut p = pos + first.len_utf8();
        while let Some(c) = self.char_at(p)
            && (c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | ':'))
        {
            p += c.len_utf8();
        }
        Some(p)
    }

    pub(crate) fn directive_name(&self, pos: usize) -> Match<String> {
        let end = self.identifier_end(pos)?;
        Some((self.slice(pos, end).to_owned(), end))
    }

    /// `[inlines]` label with at least one inline. Links are not allowed.
    ///
    /// Failures are remembered per position and limit, so unclosed nested
    /// labels are scanned once instead of once per enclosing attempt.
    pub(crate) fn directive_label(&self, pos: usize, scope: Scope) -> RuleResult<Node> {
        if self.char_at(pos) != Some('[') || self.label_failed(pos, scope.limit) {
            return Ok(None);
        }
        let (children, close) = self.inlines(pos + 1, scope.without_links(), Stop::Char(']'))?;
        if children.is_empty() || self.char_at(close) != Some(']') {
            self.record_failed_label(pos, scope.limit);
            return Ok(None);
        }
        let next = close + 1;
        Ok(Some((Node::new(pos, next, NodeKind::Super(children)), next)))
    }

    /// Raw label text of a node produced by [`Self::directive_label`].
    pub(crate) fn label_text(&self, label: &Node) -> &'a str {
        if label.end < label.start + 2 {
            return "";
        }
        self.slice(label.start + 1, label.end - 1)
    }

    /// `[text]` label taken literally, on a single line.
    pub(crate) fn text_label(&self, pos: usize) -> Match<String> {
        if self.char_at(pos) != Some('[') {
            return None;
        }
        let rest = self.slice(pos + 1, self.end_of_input());
        let len = rest.find([']', '\n', '\r'])?;
        rest[len..]
            .starts_with(']')
            .then(|| (rest[..len].to_owned(), pos + len + 2))
    }

    /// Optional text label, preceded by spaces. Empty when absent.
    pub(crate) fn maybe_text_label(&self, pos: usize) -> (String, usize) {
        self.text_label(self.sp(pos))
            .unwrap_or_else(|| (String::new(), pos))
    }

    /// Literal enclosed in `open` and `close` on a single line.
    ///
    /// Backslash escapes of punctuation are skipped over (so `\)` does not
    /// close a `(` literal) but kept in the returned text.
    pub(crate) fn enclosed_literal(&self, pos: usize, open: char, close: char) -> Match<&'a str> {
        if self.char_at(pos) != Some(open) {
            return None;
        }
        let start = pos + open.len_utf8();
        let mut q = start;
        loop {
            let c = self.char_at(q)?;
            if c == close {
                return Some((self.slice(start, q), q + close.len_utf8()));
            }
            if matches!(c, '\n' | '\r') {
                return None;
            }
            q += match self.char_at(q + 1) {
                Some(next) if c == '\\' && crate::grammar::ESCAPABLE.contains(next) => {
                    1 + next.len_utf8()
                }
                _ => c.len_utf8(),
            };
        }
    }
}
