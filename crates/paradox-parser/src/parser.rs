//! Public parser entry point.

use crate::ast::Node;
use crate::grammar::parse_document;
use crate::{ParseError, ParserConfig};

/// Markdown parser with directive support.
///
/// A parser holds only its immutable configuration, so one instance can be
/// shared between threads and used for any number of parses.
///
/// # Example
///
/// ```
/// use paradox_parser::Parser;
///
/// let parser = Parser::default();
/// let root = parser.parse("Read @ref[the guide](guide.md){.external}.").unwrap();
///
/// let directive = root
///     .descendants()
///     .find_map(|node| node.as_directive())
///     .unwrap();
/// assert_eq!(directive.name, "ref");
/// assert_eq!(directive.label, "the guide");
/// assert_eq!(directive.attributes.classes(), ["external"]);
/// ```
#[derive(Clone, Debug, Default)]
pub struct Parser {
    config: ParserConfig,
}

impl Parser {
    #[must_use]
    pub fn new(config: ParserConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Parse a markdown document into a tree rooted at a `Root` node.
    ///
    /// Node offsets are byte offsets into `markdown`, including nodes parsed
    /// from container directive bodies.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::Timeout`] if parsing (nested container bodies
    /// included) takes longer than the configured time budget.
    pub fn parse(&self, markdown: &str) -> Result<Node, ParseError> {
        parse_document(markdown, &self.config)
    }
}
