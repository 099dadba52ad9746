//! Leaf block directives.

use crate::ast::{DirectiveNode, Format, Node, NodeKind};
use crate::grammar::{Grammar, RuleResult, Scope};

impl Grammar<'_> {
    /// `@@name [label](source){attributes}` on a line of its own.
    ///
    /// The label is optional; without one the directive gets an empty label
    /// and an empty group node positioned just after the name.
    pub(crate) fn leaf_block_directive(&self, pos: usize) -> RuleResult<Node> {
        let marker = self.config.directive_marker;
        if self.run(pos, marker).0 != 2 {
            return Ok(None);
        }
        let name_start = self.sp(pos + 2 * marker.len_utf8());
        let Some((name, p)) = self.directive_name(name_start) else {
            return Ok(None);
        };
        let line_end = self.content_end(p);

        let (label_node, p) = match self.directive_label(self.sp(p), Scope::new(line_end))? {
            Some(label) => label,
            None => (Node::new(p, p, NodeKind::Super(Vec::new())), p),
        };
        let (source, p) = self.directive_source(p, line_end);
        let (attributes, p) = self.maybe_directive_attributes(p, line_end);
        let Some(next) = self.newline(self.sp(p)) else {
            return Ok(None);
        };

        tracing::trace!(name = %name, start = pos, "Matched leaf directive");
        let label = self.label_text(&label_node);
        let directive =
            DirectiveNode::new(Format::LeafBlock, name, label, source, attributes, label_node);
        let end = self.span_end(next);
        Ok(Some((Node::new(pos, end, NodeKind::Directive(directive)), next)))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::Parser;
    use crate::ast::{Format, Node, NodeKind, Source};

    fn parse(input: &str) -> Node {
        Parser::default().parse(input).unwrap()
    }

    #[test]
    fn test_leaf_with_everything() {
        let root = parse("@@include [Example](snippets/a.rs){ lang=rust .wide }\n");
        let node = &root.children()[0];
        assert_eq!((node.start, node.end), (0, 54));
        let directive = node.as_directive().unwrap();
        assert_eq!(directive.format, Format::LeafBlock);
        assert_eq!(directive.name, "include");
        assert_eq!(directive.label, "Example");
        assert_eq!(directive.source, Source::Direct("snippets/a.rs".to_owned()));
        assert_eq!(directive.attributes.value("lang"), Some("rust"));
        assert_eq!(directive.attributes.classes(), ["wide"]);
    }

    #[test]
    fn test_leaf_without_label() {
        let root = parse("@@toc { depth=2 }");
        let directive = root.children()[0].as_directive().unwrap();
        assert_eq!(directive.name, "toc");
        assert_eq!(directive.label, "");
        assert_eq!(directive.contents, "");
        assert_eq!(directive.attributes.int_value("depth", 0), 2);
        let label = &directive.contents_node;
        assert_eq!((label.start, label.end), (5, 5));
        assert!(label.children().is_empty());
    }

    #[test]
    fn test_leaf_at_end_of_input_ends_at_source_length() {
        let root = parse("@@toc");
        let node = &root.children()[0];
        assert_eq!((node.start, node.end), (0, 5));
        assert_eq!(root.end, 5);
    }

    #[test]
    fn test_leaf_name_after_spaces() {
        let root = parse("@@  toc\n");
        assert_eq!(root.children()[0].as_directive().unwrap().name, "toc");
    }

    #[test]
    fn test_leaf_with_trailing_text_is_paragraph() {
        let root = parse("@@toc and more");
        assert!(matches!(root.children()[0].kind, NodeKind::Para(_)));
    }

    #[test]
    fn test_leaf_label_can_hold_directives() {
        let root = parse("@@figure [See @ref[x]](img.png)");
        let directive = root.children()[0].as_directive().unwrap();
        assert_eq!(directive.label, "See @ref[x]");
        let inner = directive.contents_node.children()[1].as_directive().unwrap();
        assert_eq!(inner.name, "ref");
    }

    #[test]
    fn test_three_markers_are_not_a_leaf() {
        let root = parse("@@@note");
        assert!(matches!(root.children()[0].kind, NodeKind::Para(_)));
    }
}
