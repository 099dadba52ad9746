//! Header anchor links.
//!
//! Anchored headers keep all of their inline children (emphasis, code,
//! directives) inside the anchor instead of flattening them to plain text.

use super::{Node, NodeKind};

/// Anchor link wrapping arbitrary inline nodes.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct AnchorLinkSuperNode {
    /// Slug derived from the text of `contents`, possibly empty.
    pub name: String,
    /// Group node holding the header's original children.
    pub contents: Box<Node>,
}

impl AnchorLinkSuperNode {
    /// Wrap `contents`, deriving the anchor name from its children.
    #[must_use]
    pub fn new(contents: Node) -> Self {
        Self {
            name: slugify(contents.children()),
            contents: Box::new(contents),
        }
    }
}

/// Derive a URL-safe slug from the text of `nodes`.
///
/// Alphanumeric characters are lower-cased; every run of other characters
/// becomes a single hyphen, and no hyphen is emitted before the first
/// alphanumeric character. Only text-bearing nodes contribute.
///
/// # Example
///
/// ```
/// use paradox_parser::ast::{Node, NodeKind, slugify};
///
/// let text = Node::new(0, 17, NodeKind::Text("Hello, World! 2.0".to_owned()));
/// assert_eq!(slugify(&[text]), "hello-world-2-0");
/// ```
#[must_use]
pub fn slugify(nodes: &[Node]) -> String {
    let mut slug = String::new();
    for node in nodes {
        append_slug(node, &mut slug);
    }
    slug
}

fn append_slug(node: &Node, slug: &mut String) {
    if let Some(text) = node.text() {
        for c in text.chars() {
            if c.is_alphanumeric() {
                slug.extend(c.to_lowercase());
            } else if !slug.is_empty() && !slug.ends_with('-') {
                slug.push('-');
            }
        }
    }
    for child in node.children() {
        append_slug(child, slug);
    }
}

/// Replace a header's children with a single anchor node wrapping them.
///
/// The anchor and its inner group span from the first child's start to the
/// last child's end. An empty child list is returned unchanged.
#[must_use]
pub fn wrap_in_anchor(children: Vec<Node>) -> Vec<Node> {
    let (start, end) = match (children.first(), children.last()) {
        (Some(first), Some(last)) => (first.start, last.end),
        _ => return children,
    };
    let group = Node::new(start, end, NodeKind::Super(children));
    let anchor = AnchorLinkSuperNode::new(group);
    vec![Node::new(start, end, NodeKind::AnchorLink(anchor))]
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn text(start: usize, s: &str) -> Node {
        Node::new(start, start + s.len(), NodeKind::Text(s.to_owned()))
    }

    #[test]
    fn test_slug_collapses_punctuation() {
        assert_eq!(slugify(&[text(0, "Hello, World! 2.0")]), "hello-world-2-0");
    }

    #[test]
    fn test_slug_only_punctuation_is_empty() {
        assert_eq!(slugify(&[text(0, "?!... --")]), "");
    }

    #[test]
    fn test_slug_no_leading_hyphen() {
        assert_eq!(slugify(&[text(0, "  -- Intro")]), "intro");
    }

    #[test]
    fn test_slug_keeps_trailing_separator() {
        assert_eq!(slugify(&[text(0, "What?")]), "what-");
    }

    #[test]
    fn test_slug_unicode() {
        assert_eq!(slugify(&[text(0, "Über Straße")]), "über-straße");
    }

    #[test]
    fn test_slug_reads_nested_text() {
        let emph = Node::new(6, 13, NodeKind::Emph(vec![text(7, "World")]));
        let code = Node::new(14, 19, NodeKind::Code("x_y".to_owned()));
        let nodes = [text(0, "Hello "), emph, text(13, " "), code];
        assert_eq!(slugify(&nodes), "hello-world-x-y");
    }

    #[test]
    fn test_slug_skips_empty_groups() {
        let nodes = [text(0, "A"), Node::new(1, 1, NodeKind::Super(Vec::new()))];
        assert_eq!(slugify(&nodes), "a");
    }

    #[test]
    fn test_slug_is_idempotent() {
        let nodes = [text(0, "Getting Started"), text(15, "!")];
        let first = slugify(&nodes);
        let second = slugify(&nodes);
        assert_eq!(first, second);
        assert_eq!(first, "getting-started-");
    }

    #[test]
    fn test_wrap_in_anchor() {
        let children = vec![text(2, "Hello "), text(8, "World")];
        let wrapped = wrap_in_anchor(children.clone());

        assert_eq!(wrapped.len(), 1);
        let anchor = &wrapped[0];
        assert_eq!((anchor.start, anchor.end), (2, 13));
        let NodeKind::AnchorLink(link) = &anchor.kind else {
            panic!("expected anchor link, got {anchor:?}");
        };
        assert_eq!(link.name, "hello-world");
        assert_eq!((link.contents.start, link.contents.end), (2, 13));
        assert_eq!(link.contents.children(), children.as_slice());
    }

    #[test]
    fn test_wrap_in_anchor_empty() {
        assert!(wrap_in_anchor(Vec::new()).is_empty());
    }
}
