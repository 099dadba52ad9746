//! Inline directives and variable substitutions.

use crate::ast::{DirectiveAttributes, DirectiveNode, Format, Node, NodeKind, Source};
use crate::grammar::{Grammar, Match, RuleResult, Scope};

/// Directive name given to `$name$` substitutions.
const VAR_DIRECTIVE: &str = "var";

impl Grammar<'_> {
    /// `@name[label](source){attributes}`; the label is required.
    pub(crate) fn inline_directive(&self, pos: usize, scope: Scope) -> RuleResult<Node> {
        let marker = self.config.directive_marker;
        if self.char_at(pos) != Some(marker) {
            return Ok(None);
        }
        let Some((name, p)) = self.directive_name(pos + marker.len_utf8()) else {
            return Ok(None);
        };
        let Some((label_node, p)) = self.directive_label(p, scope)? else {
            return Ok(None);
        };
        let (source, p) = self.directive_source(p, scope.limit);
        let (attributes, end) = self.maybe_directive_attributes(p, scope.limit);

        tracing::trace!(name = %name, start = pos, end, "Matched inline directive");
        let label = self.label_text(&label_node);
        let directive =
            DirectiveNode::new(Format::Inline, name, label, source, attributes, label_node);
        Ok(Some((Node::new(pos, end, NodeKind::Directive(directive)), end)))
    }

    /// `$name$`, producing an inline `var` directive labelled `name`.
    ///
    /// A marker inside the name is written as `\$`.
    pub(crate) fn var_substitution(&self, pos: usize) -> Match<Node> {
        let marker = self.config.var_marker;
        if self.char_at(pos) != Some(marker) {
            return None;
        }
        let mut p = pos + marker.len_utf8();
        let first = self.char_at(p).filter(char::is_ascii_alphabetic)?;
        let mut name = String::from(first);
        p += first.len_utf8();

        loop {
            match self.char_at(p) {
                Some(c) if c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '_' | '.') => {
                    name.push(c);
                    p += c.len_utf8();
                }
                Some('\\') if self.char_at(p + 1) == Some(marker) => {
                    name.push(marker);
                    p += 1 + marker.len_utf8();
                }
                _ => break,
            }
        }
        if self.char_at(p) != Some(marker) {
            return None;
        }
        let end = p + marker.len_utf8();

        tracing::trace!(name = %name, start = pos, end, "Matched variable substitution");
        let label_node = Node::new(pos, pos, NodeKind::Super(Vec::new()));
        let directive = DirectiveNode::new(
            Format::Inline,
            VAR_DIRECTIVE,
            name,
            Source::Empty,
            DirectiveAttributes::new(),
            label_node,
        );
        Some((Node::new(pos, end, NodeKind::Directive(directive)), end))
    }

    /// `\$`: a literal variable marker.
    pub(crate) fn escaped_var_marker(&self, pos: usize) -> Match<Node> {
        let marker = self.config.var_marker;
        if self.char_at(pos) != Some('\\') || self.char_at(pos + 1) != Some(marker) {
            return None;
        }
        let end = pos + 1 + marker.len_utf8();
        Some((Node::new(pos, end, NodeKind::SpecialText(marker.to_string())), end))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::ast::{Format, Node, NodeKind, Source};
    use crate::{Parser, ParserConfig};

    fn first_para(parser: &Parser, input: &str) -> Vec<Node> {
        let root = parser.parse(input).unwrap();
        root.children()[0].children().to_vec()
    }

    #[test]
    fn test_inline_directive_full() {
        let nodes = first_para(&Parser::default(), "@note[hi](http://x){.warn #n1}");
        assert_eq!(nodes.len(), 1);
        let node = &nodes[0];
        assert_eq!((node.start, node.end), (0, 30));
        let directive = node.as_directive().unwrap();
        assert_eq!(directive.format, Format::Inline);
        assert_eq!(directive.name, "note");
        assert_eq!(directive.label, "hi");
        assert_eq!(directive.contents, "hi");
        assert_eq!(directive.source, Source::Direct("http://x".to_owned()));
        assert_eq!(directive.attributes.classes(), ["warn"]);
        assert_eq!(directive.attributes.identifier(), Some("n1"));

        let label = &directive.contents_node;
        assert_eq!((label.start, label.end), (5, 9));
        assert_eq!(label.children()[0], Node::new(6, 8, NodeKind::Text("hi".to_owned())));
    }

    #[test]
    fn test_inline_directive_in_text() {
        let nodes = first_para(&Parser::default(), "see @ref[Intro] [chap1] now");
        assert_eq!(nodes[0].text(), Some("see "));
        let directive = nodes[1].as_directive().unwrap();
        assert_eq!(directive.name, "ref");
        assert_eq!(directive.source, Source::Reference("chap1".to_owned()));
        assert_eq!(nodes[2].text(), Some(" now"));
    }

    #[test]
    fn test_label_keeps_inline_markup() {
        let nodes = first_para(&Parser::default(), "@span[a *b* `c`]");
        let directive = nodes[0].as_directive().unwrap();
        assert_eq!(directive.label, "a *b* `c`");
        let lines: Vec<_> = directive
            .contents_node
            .children()
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(
            lines,
            ["Text [6-8] 'a '", "Emph [8-11]", "Text [11-12] ' '", "Code [12-15] 'c'"]
        );
    }

    #[test]
    fn test_empty_label_is_not_a_directive() {
        let nodes = first_para(&Parser::default(), "mail @x[] here");
        assert_eq!(nodes.len(), 1);
        assert_eq!(nodes[0].text(), Some("mail @x[] here"));
    }

    #[test]
    fn test_marker_without_label_is_text() {
        let nodes = first_para(&Parser::default(), "user@example.com");
        assert_eq!(nodes, [Node::new(0, 16, NodeKind::Text("user@example.com".to_owned()))]);
    }

    #[test]
    fn test_custom_directive_marker() {
        let parser = Parser::new(ParserConfig::new().with_directive_marker(':'));
        let nodes = first_para(&parser, "a :kbd[Ctrl] @kbd[x]");
        assert_eq!(nodes[1].as_directive().unwrap().name, "kbd");
        assert_eq!(nodes[2].text(), Some(" @kbd[x]"));
    }

    #[test]
    fn test_var_substitution() {
        let nodes = first_para(&Parser::default(), "v$project.version$!");
        assert_eq!(nodes[0].text(), Some("v"));
        let var = &nodes[1];
        assert_eq!((var.start, var.end), (1, 18));
        let directive = var.as_directive().unwrap();
        assert_eq!(directive.name, "var");
        assert_eq!(directive.label, "project.version");
        assert!(directive.contents_node.children().is_empty());
        assert_eq!(nodes[2].text(), Some("!"));
    }

    #[test]
    fn test_escaped_var_marker() {
        let nodes = first_para(&Parser::default(), r"costs \$5 and $6");
        assert_eq!(nodes[1], Node::new(6, 8, NodeKind::SpecialText("$".to_owned())));
        assert!(nodes.iter().all(|n| n.as_directive().is_none()));
    }

    #[test]
    fn test_var_with_escaped_marker_in_name() {
        let nodes = first_para(&Parser::default(), r"$a\$b$");
        assert_eq!(nodes[0].as_directive().unwrap().label, "a$b");
    }

    #[test]
    fn test_unclosed_nested_labels_stay_text() {
        let input = "@a[".repeat(40);
        let root = Parser::default().parse(&input).unwrap();
        assert!(root.descendants().all(|n| n.as_directive().is_none()));
        let para = &root.children()[0];
        assert_eq!((para.start, para.end), (0, input.len()));
    }

    #[test]
    fn test_deeply_nested_labels() {
        let input = format!("{}x{}", "@a[".repeat(30), "]".repeat(30));
        let root = Parser::default().parse(&input).unwrap();
        let directives = root.descendants().filter(|n| n.as_directive().is_some());
        assert_eq!(directives.count(), 30);
    }

    #[test]
    fn test_names_are_ascii() {
        let root = Parser::default().parse("$naïve$ @café[x]").unwrap();
        assert!(root.descendants().all(|n| n.as_directive().is_none()));
    }
}
