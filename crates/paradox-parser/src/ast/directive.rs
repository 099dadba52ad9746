//! Directive nodes.
//!
//! All three directive forms (`@name[...]`, `@@name ...`, `@@@name ... @@@`)
//! produce a [`DirectiveNode`]; the [`Format`] records which one matched.

use std::fmt;

use super::{DirectiveAttributes, Node};

/// Which directive syntax produced a node.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Format {
    /// `@name[label](source){attrs}` inside running text.
    Inline,
    /// `@@name [label](source){attrs}` on a line of its own.
    LeafBlock,
    /// Fenced block opened and closed by runs of three or more markers.
    ContainerBlock,
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Inline => "Inline",
            Self::LeafBlock => "LeafBlock",
            Self::ContainerBlock => "ContainerBlock",
        })
    }
}

/// Where a directive's payload comes from.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Source {
    /// No source given (or an explicit `[]`).
    #[default]
    Empty,
    /// Inline literal `(value)` with `\X` escapes resolved.
    Direct(String),
    /// Named reference `[name]`, resolved by the renderer.
    Reference(String),
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => Ok(()),
            Self::Direct(value) => write!(f, "({})", value.escape_debug()),
            Self::Reference(name) => write!(f, "[{name}]"),
        }
    }
}

/// A parsed directive.
///
/// For inline and leaf forms `contents` equals `label` and `contents_node`
/// holds the parsed label inlines. For container forms `contents` is the raw
/// fenced body and `contents_node` is the root of the nested document parsed
/// from it, with offsets already relative to the outer document.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct DirectiveNode {
    /// Syntax form that matched.
    pub format: Format,
    /// Directive name (any identifier; interpretation is up to the renderer).
    pub name: String,
    /// Label text without brackets, possibly empty.
    pub label: String,
    /// Payload source.
    pub source: Source,
    /// Attributes from the `{...}` clause.
    pub attributes: DirectiveAttributes,
    /// Raw, unparsed payload.
    pub contents: String,
    /// Parsed payload. Never absent; empty payloads give an empty group node.
    pub contents_node: Box<Node>,
}

impl DirectiveNode {
    /// Create a directive whose contents are its label.
    #[must_use]
    pub fn new(
        format: Format,
        name: impl Into<String>,
        label: impl Into<String>,
        source: Source,
        attributes: DirectiveAttributes,
        label_node: Node,
    ) -> Self {
        let label = label.into();
        Self {
            format,
            name: name.into(),
            contents: label.clone(),
            label,
            source,
            attributes,
            contents_node: Box::new(label_node),
        }
    }

    /// Create a directive with separate raw contents, as container blocks have.
    #[must_use]
    pub fn with_contents(
        format: Format,
        name: impl Into<String>,
        label: impl Into<String>,
        source: Source,
        attributes: DirectiveAttributes,
        contents: impl Into<String>,
        contents_node: Node,
    ) -> Self {
        Self {
            format,
            name: name.into(),
            label: label.into(),
            source,
            attributes,
            contents: contents.into(),
            contents_node: Box::new(contents_node),
        }
    }
}

impl fmt::Display for DirectiveNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} '{}'", self.format, self.name)?;
        if !self.label.is_empty() {
            write!(f, " [{}]", self.label.escape_debug())?;
        }
        if self.source != Source::Empty {
            write!(f, " {}", self.source)?;
        }
        if !self.attributes.is_empty() {
            write!(f, " {}", self.attributes)?;
        }
        Ok(())
    }
}
