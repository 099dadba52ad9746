//! Decorated link nodes.

use super::Node;

/// Link marked as pointing at the currently active page.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ActiveLinkNode {
    /// Link target.
    pub href: String,
    /// Visible link content.
    pub child: Box<Node>,
}

impl ActiveLinkNode {
    #[must_use]
    pub fn new(href: impl Into<String>, child: Node) -> Self {
        Self {
            href: href.into(),
            child: Box::new(child),
        }
    }
}

/// Explicit link carrying a CSS class attribute.
///
/// Produced for `[text](href){.class}` links.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ClassyLinkNode {
    /// Link target.
    pub href: String,
    /// Space-separated class list, if any.
    pub class_attribute: Option<String>,
    /// Visible link content.
    pub child: Box<Node>,
}

impl ClassyLinkNode {
    #[must_use]
    pub fn new(href: impl Into<String>, class_attribute: Option<String>, child: Node) -> Self {
        Self {
            href: href.into(),
            class_attribute,
            child: Box::new(child),
        }
    }
}
