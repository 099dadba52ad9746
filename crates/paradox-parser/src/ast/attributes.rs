//! Directive attribute model.
//!
//! Holds the values parsed from the `{#id .class key=value}` clause of a
//! directive. Keys map to one or more values in encounter order.

use std::fmt;

/// Key under which `#name` attribute items are stored.
pub const IDENTIFIER_KEY: &str = "identifier";

/// Key under which `.name` attribute items are stored.
pub const CLASS_KEY: &str = "class";

/// Attributes parsed from a directive's `{...}` clause.
///
/// Keys are not deduplicated: every item appends a value under its key, so
/// `{.a .b .a}` yields `classes() == ["a", "b", "a"]`. Missing keys never
/// fail; accessors fall back to empty results or the caller's default.
///
/// # Example
///
/// ```
/// use paradox_parser::ast::DirectiveAttributes;
///
/// let attrs: DirectiveAttributes = [
///     ("identifier", "intro"),
///     ("class", "note"),
///     ("class", "wide"),
///     ("width", "560"),
/// ]
/// .into_iter()
/// .collect();
///
/// assert_eq!(attrs.identifier(), Some("intro"));
/// assert_eq!(attrs.classes_string(), "note wide");
/// assert_eq!(attrs.int_value("width", 0), 560);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct DirectiveAttributes {
    /// Keys in first-insertion order, each with its values in encounter order.
    entries: Vec<(String, Vec<String>)>,
}

impl DirectiveAttributes {
    /// Create an empty attribute set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a value under `key`.
    pub(crate) fn add(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, values)) => values.push(value),
            None => self.entries.push((key, vec![value])),
        }
    }

    /// All attribute keys.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    /// The `identifier` value (explicit or marked with `#`).
    #[must_use]
    pub fn identifier(&self) -> Option<&str> {
        self.value(IDENTIFIER_KEY)
    }

    /// All `class` values (explicit or marked with `.`).
    #[must_use]
    pub fn classes(&self) -> &[String] {
        self.values(CLASS_KEY)
    }

    /// The `class` values joined with spaces.
    #[must_use]
    pub fn classes_string(&self) -> String {
        self.classes().join(" ")
    }

    /// First value for a key.
    #[must_use]
    pub fn value(&self, key: &str) -> Option<&str> {
        self.values(key).first().map(String::as_str)
    }

    /// First value for a key, otherwise `default`.
    #[must_use]
    pub fn value_or<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.value(key).unwrap_or(default)
    }

    /// All values for a key, empty if the key is absent.
    #[must_use]
    pub fn values(&self, key: &str) -> &[String] {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map_or(&[] as &[String], |(_, values)| values.as_slice())
    }

    /// First value for a key as an integer.
    ///
    /// Returns `default` when the key is absent or the value is not a number.
    #[must_use]
    pub fn int_value(&self, key: &str, default: i32) -> i32 {
        self.value(key)
            .and_then(|value| value.parse().ok())
            .unwrap_or(default)
    }

    /// First value for a key as a boolean.
    ///
    /// Accepts `true`/`on`/`yes` and `false`/`off`/`no`; anything else
    /// (including an absent key) yields `default`.
    #[must_use]
    pub fn boolean_value(&self, key: &str, default: bool) -> bool {
        match self.value(key) {
            Some("true" | "on" | "yes") => true,
            Some("false" | "off" | "no") => false,
            _ => default,
        }
    }

    /// Whether no attributes were defined.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for DirectiveAttributes {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut attrs = Self::new();
        for (key, value) in iter {
            attrs.add(key, value);
        }
        attrs
    }
}

impl fmt::Display for DirectiveAttributes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (key, values) in &self.entries {
            write!(f, " {key}=[{}]", values.join(", "))?;
        }
        f.write_str(" }")
    }
}
