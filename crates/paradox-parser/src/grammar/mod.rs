//! Recursive-descent grammar over a prepared source string.
//!
//! Rules are plain functions of a byte position. A match yields the parsed
//! value together with the position just past it; a mismatch yields `None`
//! and leaves nothing to undo, so ordered choice is simply "try the next
//! rule at the same position". Rules that can recurse into inline or block
//! content also return `Err` once the parsing budget is exhausted.

mod block;
mod inline;

use std::cell::RefCell;
use std::collections::HashSet;
use std::time::{Duration, Instant};

pub(crate) use inline::{ESCAPABLE, Scope, Stop};

use crate::ast::{Node, NodeKind};
use crate::{ParseError, ParserConfig};

/// Parsed value and the position just past it, or `None` on mismatch.
pub(crate) type Match<T> = Option<(T, usize)>;

/// A [`Match`] from a rule that may abort the whole parse.
pub(crate) type RuleResult<T> = Result<Match<T>, ParseError>;

/// Appended to every source so the last block is blank-line terminated.
const TERMINATOR: &str = "\n\n";

/// Wall-clock deadline shared by a parse and all of its nested parses.
#[derive(Clone, Copy, Debug)]
struct Budget {
    deadline: Instant,
    limit: Duration,
}

impl Budget {
    fn start(limit: Option<Duration>) -> Option<Self> {
        let limit = limit?;
        let deadline = Instant::now().checked_add(limit)?;
        Some(Self { deadline, limit })
    }
}

/// Grammar rules bound to one prepared source string.
pub(crate) struct Grammar<'a> {
    text: &'a str,
    /// Length of the source without the terminator.
    len: usize,
    pub(crate) config: &'a ParserConfig,
    budget: Option<Budget>,
    /// Container nesting depth (0 for the top-level document).
    pub(crate) depth: usize,
    /// `(position, limit)` pairs where a directive label failed to match.
    failed_labels: RefCell<HashSet<(usize, usize)>>,
}

/// Parse `source` as a top-level document.
pub(crate) fn parse_document(source: &str, config: &ParserConfig) -> Result<Node, ParseError> {
    parse_source(source, config, Budget::start(config.max_parsing_time), 0)
}

fn parse_source(
    source: &str,
    config: &ParserConfig,
    budget: Option<Budget>,
    depth: usize,
) -> Result<Node, ParseError> {
    let mut prepared = String::with_capacity(source.len() + TERMINATOR.len());
    prepared.push_str(source);
    prepared.push_str(TERMINATOR);

    let grammar = Grammar::new(&prepared, source.len(), config, budget, depth);
    grammar.document()
}

impl<'a> Grammar<'a> {
    fn new(
        text: &'a str,
        len: usize,
        config: &'a ParserConfig,
        budget: Option<Budget>,
        depth: usize,
    ) -> Self {
        Self {
            text,
            len,
            config,
            budget,
            depth,
            failed_labels: RefCell::default(),
        }
    }

    /// Run `f` against a grammar over `text` with no time budget.
    #[cfg(test)]
    pub(crate) fn for_text<R>(
        text: &str,
        config: &ParserConfig,
        f: impl FnOnce(&Grammar<'_>) -> R,
    ) -> R {
        let prepared = format!("{text}{TERMINATOR}");
        f(&Grammar::new(&prepared, text.len(), config, None, 0))
    }

    /// Parse `source` as an independent document with the same configuration
    /// and deadline. Offsets in the result start at 0.
    pub(crate) fn parse_nested(&self, source: &str) -> Result<Node, ParseError> {
        parse_source(source, self.config, self.budget, self.depth + 1)
    }

    /// Fail once the parsing deadline has passed.
    pub(crate) fn check_budget(&self) -> Result<(), ParseError> {
        match self.budget {
            Some(budget) if Instant::now() >= budget.deadline => {
                tracing::warn!(
                    limit_ms = budget.limit.as_millis(),
                    depth = self.depth,
                    "Parsing exceeded time budget"
                );
                Err(ParseError::Timeout {
                    limit: budget.limit,
                })
            }
            _ => Ok(()),
        }
    }

    /// Document: blocks separated by blank lines.
    fn document(&self) -> Result<Node, ParseError> {
        let len = self.len;
        let mut children = Vec::new();
        let mut pos = 0;

        loop {
            self.check_budget()?;
            pos = self.skip_blank_lines(pos);
            if pos >= len {
                break;
            }
            let Some((block, next)) = self.block(pos)? else {
                break;
            };
            children.push(block);
            pos = next;
        }

        Ok(Node::new(0, len, NodeKind::Root(children)))
    }

    /// Clamp a node end to the source, excluding the terminator.
    ///
    /// Block rules may consume the terminator's first newline; the node
    /// they produce must still slice the original source.
    pub(crate) fn span_end(&self, next: usize) -> usize {
        next.min(self.len)
    }

    /// Whether a label at `pos` already failed under the same `limit`.
    pub(crate) fn label_failed(&self, pos: usize, limit: usize) -> bool {
        self.failed_labels.borrow().contains(&(pos, limit))
    }

    pub(crate) fn record_failed_label(&self, pos: usize, limit: usize) {
        self.failed_labels.borrow_mut().insert((pos, limit));
    }

    /// Length of the prepared text, terminator included.
    pub(crate) fn end_of_input(&self) -> usize {
        self.text.len()
    }

    /// Character at `pos`.
    pub(crate) fn char_at(&self, pos: usize) -> Option<char> {
        self.text.get(pos..)?.chars().next()
    }

    /// Character just before `pos`.
    pub(crate) fn char_before(&self, pos: usize) -> Option<char> {
        self.text.get(..pos)?.chars().next_back()
    }

    pub(crate) fn starts_with(&self, pos: usize, s: &str) -> bool {
        self.text.get(pos..).is_some_and(|rest| rest.starts_with(s))
    }

    /// Source text between two positions (empty if the range is invalid).
    pub(crate) fn slice(&self, start: usize, end: usize) -> &'a str {
        self.text.get(start..end).unwrap_or_default()
    }

    /// Skip spaces and tabs.
    pub(crate) fn sp(&self, pos: usize) -> usize {
        let rest = self.text.get(pos..).unwrap_or_default();
        pos + rest.len() - rest.trim_start_matches([' ', '\t']).len()
    }

    /// Match a line terminator (`\n` or `\r\n`).
    pub(crate) fn newline(&self, pos: usize) -> Option<usize> {
        if self.starts_with(pos, "\n") {
            Some(pos + 1)
        } else if self.starts_with(pos, "\r\n") {
            Some(pos + 2)
        } else {
            None
        }
    }

    /// Spaces, optionally followed by one line terminator and more spaces.
    pub(crate) fn spn1(&self, pos: usize) -> usize {
        let pos = self.sp(pos);
        self.newline(pos).map_or(pos, |next| self.sp(next))
    }

    /// Position just past the current line's terminator.
    pub(crate) fn next_line(&self, pos: usize) -> usize {
        self.text
            .get(pos..)
            .and_then(|rest| rest.find('\n'))
            .map_or(self.text.len(), |offset| pos + offset + 1)
    }

    /// Position where the current line's content ends (before `\r\n`/`\n`).
    pub(crate) fn content_end(&self, pos: usize) -> usize {
        let end = self.next_line(pos);
        let line = self.slice(pos, end);
        let content = line.strip_suffix('\n').unwrap_or(line);
        let content = content.strip_suffix('\r').unwrap_or(content);
        pos + content.len()
    }

    pub(crate) fn is_blank_line(&self, pos: usize) -> bool {
        let pos = self.sp(pos);
        pos >= self.text.len() || self.newline(pos).is_some()
    }

    fn skip_blank_lines(&self, mut pos: usize) -> usize {
        while pos < self.text.len() && self.is_blank_line(pos) {
            pos = self.next_line(pos);
        }
        pos
    }

    /// Length of the run of `c` starting at `pos`, and the position after it.
    pub(crate) fn run(&self, pos: usize, c: char) -> (usize, usize) {
        let rest = self.text.get(pos..).unwrap_or_default();
        let count = rest.chars().take_while(|&ch| ch == c).count();
        (count, pos + count * c.len_utf8())
    }
}
