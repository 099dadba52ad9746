//! Directive source: `(literal)`, `[reference]` or nothing.

use crate::ast::Source;
use crate::grammar::Grammar;

impl Grammar<'_> {
    /// Source following a directive label, preceded by optional spaces.
    ///
    /// Never fails: without a source (or with an explicit `[]`) the result is
    /// [`Source::Empty`]. Candidates extending past `limit` are ignored.
    pub(crate) fn directive_source(&self, pos: usize, limit: usize) -> (Source, usize) {
        let start = self.sp(pos);

        if let Some((raw, end)) = self.enclosed_literal(start, '(', ')')
            && end <= limit
        {
            return (Source::Direct(unescape(raw)), end);
        }
        if self.starts_with(start, "[]") {
            if start + 2 <= limit {
                return (Source::Empty, start + 2);
            }
        } else if let Some((name, end)) = self.text_label(start)
            && end <= limit
        {
            return (Source::Reference(name), end);
        }
        (Source::Empty, pos)
    }
}

/// Resolve `\X` escapes to `X`.
fn unescape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => out.extend(chars.next()),
            _ => out.push(c),
        }
    }
    out
}
