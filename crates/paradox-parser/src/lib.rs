//! Markdown parser with generic directive syntax.
//!
//! Besides a core markdown grammar (paragraphs, ATX headers, fenced code,
//! emphasis, code spans, links), the parser recognizes three directive forms
//! whose names are not interpreted, leaving their meaning to the renderer:
//!
//! - Inline: `@name[label](source){#id .class key=value}`
//! - Leaf block: `@@name [label](source){attributes}` on its own line
//! - Container block: `@@@name ...`, a body, and a closing `@@@` line
//!
//! Container bodies are parsed recursively, and every node in the resulting
//! tree carries byte offsets into the original document. Variable
//! substitutions (`$name$`) become inline directives named `var`.
//!
//! The directive and variable markers, header anchor links and the parsing
//! time budget are set through [`ParserConfig`].
//!
//! # Example
//!
//! ```
//! use paradox_parser::{Parser, ParserConfig, ast::Format};
//!
//! let parser = Parser::new(ParserConfig::new().with_directive_marker(':'));
//! let root = parser.parse(":::note [Heads up]\nBody with :kbd[Ctrl].\n:::\n").unwrap();
//!
//! let note = root.children()[0].as_directive().unwrap();
//! assert_eq!(note.format, Format::ContainerBlock);
//! assert_eq!(note.label, "Heads up");
//! assert_eq!(note.contents, "Body with :kbd[Ctrl].\n");
//! ```

pub mod ast;
mod config;
mod directive;
mod error;
mod grammar;
mod parser;

pub use config::{
    DEFAULT_DIRECTIVE_MARKER, DEFAULT_MAX_PARSING_TIME, DEFAULT_VAR_MARKER, Extensions,
    ParserConfig,
};
pub use error::ParseError;
pub use parser::Parser;
