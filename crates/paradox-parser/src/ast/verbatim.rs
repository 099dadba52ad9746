//! Verbatim (code) blocks with group metadata.

/// Code block with an optional language, tab group, classes and source URL.
///
/// Fields are fixed once built; use the `with_*` methods while constructing.
///
/// # Example
///
/// ```
/// use paradox_parser::ast::VerbatimGroupNode;
///
/// let node = VerbatimGroupNode::new("println!(\"hi\");\n", "rust")
///     .with_group("rust")
///     .with_classes(vec!["compact".to_owned()]);
///
/// assert_eq!(node.lang(), "rust");
/// assert_eq!(node.group(), "rust");
/// assert_eq!(node.source_url(), None);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct VerbatimGroupNode {
    text: String,
    lang: String,
    group: String,
    classes: Vec<String>,
    source_url: Option<String>,
}

impl VerbatimGroupNode {
    /// Create an ungrouped block. An empty `lang` means no language.
    #[must_use]
    pub fn new(text: impl Into<String>, lang: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            lang: lang.into(),
            ..Self::default()
        }
    }

    /// Set the group identifier.
    #[must_use]
    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = group.into();
        self
    }

    /// Set the CSS classes.
    #[must_use]
    pub fn with_classes(mut self, classes: Vec<String>) -> Self {
        self.classes = classes;
        self
    }

    /// Set the URL the code was taken from.
    #[must_use]
    pub fn with_source_url(mut self, source_url: impl Into<String>) -> Self {
        self.source_url = Some(source_url.into());
        self
    }

    /// Verbatim text, including its final newline.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Language type, empty when unspecified.
    #[must_use]
    pub fn lang(&self) -> &str {
        &self.lang
    }

    /// Group identifier, empty when ungrouped.
    #[must_use]
    pub fn group(&self) -> &str {
        &self.group
    }

    #[must_use]
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    #[must_use]
    pub fn source_url(&self) -> Option<&str> {
        self.source_url.as_deref()
    }
}
