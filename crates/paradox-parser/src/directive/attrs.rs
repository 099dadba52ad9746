//! Directive attribute parsing.
//!
//! Parses the `{#id .class key=value key="quoted value"}` clause shared by
//! directives, fenced code info strings and classy links.

use crate::ast::{CLASS_KEY, DirectiveAttributes, IDENTIFIER_KEY};
use crate::grammar::{Grammar, Match};

impl Grammar<'_> {
    /// Optional attribute clause preceded by spaces.
    ///
    /// Yields an empty set (consuming nothing) when there is no well-formed
    /// clause ending at or before `limit`.
    pub(crate) fn maybe_directive_attributes(
        &self,
        pos: usize,
        limit: usize,
    ) -> (DirectiveAttributes, usize) {
        self.attributes(self.sp(pos))
            .filter(|(_, end)| *end <= limit)
            .unwrap_or_else(|| (DirectiveAttributes::new(), pos))
    }

    /// Attribute clause `{...}`.
    ///
    /// Items are separated by whitespace (a single line break included).
    /// Repeated keys accumulate values in encounter order.
    pub(crate) fn attributes(&self, pos: usize) -> Match<DirectiveAttributes> {
        if self.char_at(pos) != Some('{') {
            return None;
        }
        let mut attributes = DirectiveAttributes::new();
        let mut p = self.spn1(pos + 1);
        while let Some(((key, value), end)) = self.attribute(p) {
            let next = self.spn1(end);
            if next == end && self.char_at(next) != Some('}') {
                break;
            }
            attributes.add(key, value);
            p = next;
        }
        (self.char_at(p) == Some('}')).then_some((attributes, p + 1))
    }

    /// `#id`, `.class` or `key=value`.
    fn attribute(&self, pos: usize) -> Match<(String, String)> {
        match self.char_at(pos)? {
            '#' => self.keyed_identifier(pos + 1, IDENTIFIER_KEY),
            '.' => self.keyed_identifier(pos + 1, CLASS_KEY),
            _ => {
                let key_end = self.identifier_end(pos)?;
                if self.char_at(key_end) != Some('=') {
                    return None;
                }
                let (value, end) = self.attribute_value(key_end + 1)?;
                Some(((self.slice(pos, key_end).to_owned(), value), end))
            }
        }
    }

    fn keyed_identifier(&self, pos: usize, key: &str) -> Match<(String, String)> {
        let end = self.identifier_end(pos)?;
        Some(((key.to_owned(), self.slice(pos, end).to_owned()), end))
    }

    /// Quoted value (escapes kept as written) or a run of non-space characters.
    ///
    /// Unquoted values stop at `}` so `{lang=en}` closes the clause.
    fn attribute_value(&self, pos: usize) -> Match<String> {
        let quoted = ['"', '\'']
            .into_iter()
            .find_map(|quote| self.enclosed_literal(pos, quote, quote));
        if let Some((value, end)) = quoted {
            return Some((value.to_owned(), end));
        }

        let len = self
            .slice(pos, self.end_of_input())
            .find(|c: char| c.is_whitespace() || c == '}')?;
        (len > 0).then(|| (self.slice(pos, pos + len).to_owned(), pos + len))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::ParserConfig;

    fn parse_attrs(text: &str) -> Option<(DirectiveAttributes, usize)> {
        let config = ParserConfig::default();
        Grammar::for_text(text, &config, |g| g.attributes(0))
    }

    #[test]
    fn test_identifier_and_classes() {
        let (attrs, end) = parse_attrs("{.warn #n1}").unwrap();
        assert_eq!(end, 11);
        assert_eq!(attrs.identifier(), Some("n1"));
        assert_eq!(attrs.classes(), ["warn"]);
    }

    #[test]
    fn test_repeated_classes_keep_order_and_duplicates() {
        let (attrs, _) = parse_attrs("{.a .b .a}").unwrap();
        assert_eq!(attrs.classes(), ["a", "b", "a"]);
        assert_eq!(attrs.classes_string(), "a b a");
    }

    #[test]
    fn test_key_values() {
        let input = r#"{ width=100 title="A \"quoted\" title" alt='x y' }"#;
        let (attrs, _) = parse_attrs(input).unwrap();
        assert_eq!(attrs.int_value("width", 0), 100);
        assert_eq!(attrs.value("title"), Some(r#"A \"quoted\" title"#));
        assert_eq!(attrs.value("alt"), Some("x y"));
        assert_eq!(attrs.keys().collect::<Vec<_>>(), ["width", "title", "alt"]);
    }

    #[test]
    fn test_unquoted_value_stops_at_brace() {
        let (attrs, end) = parse_attrs("{lang=en}").unwrap();
        assert_eq!(attrs.value("lang"), Some("en"));
        assert_eq!(end, 9);
    }

    #[test]
    fn test_dotted_class_is_single_identifier() {
        let (attrs, _) = parse_attrs("{.a.b}").unwrap();
        assert_eq!(attrs.classes(), ["a.b"]);
    }

    #[test]
    fn test_items_may_span_one_line_break() {
        let (attrs, _) = parse_attrs("{.a\n  .b}").unwrap();
        assert_eq!(attrs.classes(), ["a", "b"]);
    }

    #[test]
    fn test_empty_clause() {
        let (attrs, end) = parse_attrs("{}").unwrap();
        assert!(attrs.is_empty());
        assert_eq!(end, 2);
    }

    #[test]
    fn test_malformed_clause_fails() {
        assert!(parse_attrs("{.a").is_none());
        assert!(parse_attrs("{=x}").is_none());
        assert!(parse_attrs("{.a#b}").is_none());
        assert!(parse_attrs("{key=}").is_none());
    }

    #[test]
    fn test_maybe_attributes_without_clause() {
        let config = ParserConfig::default();
        let (attrs, end) =
            Grammar::for_text("  text", &config, |g| g.maybe_directive_attributes(0, 6));
        assert!(attrs.is_empty());
        assert_eq!(end, 0);
    }
}
