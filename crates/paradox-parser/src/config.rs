//! Parser configuration.

use std::ops::BitOr;
use std::time::Duration;

/// Default directive marker.
pub const DEFAULT_DIRECTIVE_MARKER: char = '@';

/// Default variable substitution marker.
pub const DEFAULT_VAR_MARKER: char = '$';

/// Default wall-clock parsing budget.
pub const DEFAULT_MAX_PARSING_TIME: Duration = Duration::from_millis(2000);

/// Set of optional grammar extensions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Extensions(u32);

impl Extensions {
    /// No extensions.
    pub const NONE: Self = Self(0);
    /// Wrap header contents in anchor links.
    pub const ANCHOR_LINKS: Self = Self(1);

    /// Whether every extension in `other` is enabled.
    #[must_use]
    pub fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Enable or disable the extensions in `other`.
    #[must_use]
    pub fn set(self, other: Self, enabled: bool) -> Self {
        if enabled {
            Self(self.0 | other.0)
        } else {
            Self(self.0 & !other.0)
        }
    }
}

impl BitOr for Extensions {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

/// Immutable parser configuration.
///
/// The same value drives the top-level parse and every recursive parse of a
/// container directive's body, so nested documents are always parsed with
/// the same markers and extensions as their parent.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use paradox_parser::{Extensions, ParserConfig};
///
/// let config = ParserConfig::new()
///     .with_directive_marker(':')
///     .with_extensions(Extensions::ANCHOR_LINKS)
///     .with_max_parsing_time(Some(Duration::from_secs(5)));
///
/// assert_eq!(config.directive_marker, ':');
/// assert!(config.extensions.contains(Extensions::ANCHOR_LINKS));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParserConfig {
    /// Character introducing directives (`@name`, `@@name`, `@@@name`).
    pub directive_marker: char,
    /// Character delimiting variable substitutions (`$name$`).
    pub var_marker: char,
    /// Enabled grammar extensions.
    pub extensions: Extensions,
    /// Wall-clock budget for a whole parse, `None` for unlimited.
    pub max_parsing_time: Option<Duration>,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl ParserConfig {
    /// Create a configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self {
            directive_marker: DEFAULT_DIRECTIVE_MARKER,
            var_marker: DEFAULT_VAR_MARKER,
            extensions: Extensions::NONE,
            max_parsing_time: Some(DEFAULT_MAX_PARSING_TIME),
        }
    }

    /// Set the directive marker.
    #[must_use]
    pub fn with_directive_marker(mut self, marker: char) -> Self {
        self.directive_marker = marker;
        self
    }

    /// Set the variable substitution marker.
    #[must_use]
    pub fn with_var_marker(mut self, marker: char) -> Self {
        self.var_marker = marker;
        self
    }

    /// Set the enabled extensions.
    #[must_use]
    pub fn with_extensions(mut self, extensions: Extensions) -> Self {
        self.extensions = extensions;
        self
    }

    /// Set the parsing time budget.
    #[must_use]
    pub fn with_max_parsing_time(mut self, limit: Option<Duration>) -> Self {
        self.max_parsing_time = limit;
        self
    }

    /// Whether header anchor links are enabled.
    #[must_use]
    pub fn anchor_links(&self) -> bool {
        self.extensions.contains(Extensions::ANCHOR_LINKS)
    }
}
