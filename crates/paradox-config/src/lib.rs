//! Configuration management for Paradox.
//!
//! Parses `paradox.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! ```toml
//! [parser]
//! directive_marker = "@"
//! var_marker = "$"
//! anchor_links = true
//! max_parsing_time_ms = 2000   # 0 disables the time budget
//! ```
//!
//! CLI settings can be applied during load via [`CliSettings`].

use std::path::{Path, PathBuf};
use std::time::Duration;

use paradox_parser::{
    DEFAULT_DIRECTIVE_MARKER, DEFAULT_MAX_PARSING_TIME, DEFAULT_VAR_MARKER, Extensions,
    ParserConfig,
};
use serde::Deserialize;

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override the directive marker.
    pub directive_marker: Option<char>,
    /// Override the variable marker.
    pub var_marker: Option<char>,
    /// Override header anchor links.
    pub anchor_links: Option<bool>,
    /// Override the parsing time budget in milliseconds (0 disables it).
    pub max_parsing_time_ms: Option<u64>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "paradox.toml";

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Parser configuration as written in the file.
    pub parser: ParserSection,

    /// Validated parser configuration (set after loading).
    #[serde(skip)]
    pub parser_resolved: ParserConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// `[parser]` section.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ParserSection {
    /// Directive marker, a single character.
    pub directive_marker: String,
    /// Variable substitution marker, a single character.
    pub var_marker: String,
    /// Whether header contents are wrapped in anchor links.
    pub anchor_links: bool,
    /// Parsing time budget in milliseconds; 0 disables the budget.
    pub max_parsing_time_ms: u64,
}

impl Default for ParserSection {
    fn default() -> Self {
        Self {
            directive_marker: DEFAULT_DIRECTIVE_MARKER.to_string(),
            var_marker: DEFAULT_VAR_MARKER.to_string(),
            anchor_links: false,
            max_parsing_time_ms: u64::try_from(DEFAULT_MAX_PARSING_TIME.as_millis())
                .unwrap_or(u64::MAX),
        }
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
}

impl Config {
    /// Load configuration from file or use defaults.
    ///
    /// If `config_path` is given, loads that file. Otherwise searches for
    /// `paradox.toml` in the current directory and its parents, falling back
    /// to defaults when none is found.
    ///
    /// CLI settings are applied after loading, so they take precedence over
    /// config file values. The result is validated either way.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails,
    /// or the resulting values are invalid.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }
        config.resolve()?;

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(marker) = settings.directive_marker {
            self.parser.directive_marker = marker.to_string();
        }
        if let Some(marker) = settings.var_marker {
            self.parser.var_marker = marker.to_string();
        }
        if let Some(anchor_links) = settings.anchor_links {
            self.parser.anchor_links = anchor_links;
        }
        if let Some(ms) = settings.max_parsing_time_ms {
            self.parser.max_parsing_time_ms = ms;
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;
        config.config_path = Some(path.to_path_buf());
        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Markers must be single characters that are neither whitespace nor
    /// alphanumeric, and the two markers must differ.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_markers().map(|_| ())
    }

    fn validate_markers(&self) -> Result<(char, char), ConfigError> {
        let directive = require_marker(&self.parser.directive_marker, "parser.directive_marker")?;
        let var = require_marker(&self.parser.var_marker, "parser.var_marker")?;
        if directive == var {
            return Err(ConfigError::Validation(
                "parser.directive_marker and parser.var_marker must differ".to_owned(),
            ));
        }
        Ok((directive, var))
    }

    /// Validate and build [`Self::parser_resolved`] from the `[parser]` section.
    fn resolve(&mut self) -> Result<(), ConfigError> {
        let (directive_marker, var_marker) = self.validate_markers()?;
        let max_parsing_time = match self.parser.max_parsing_time_ms {
            0 => None,
            ms => Some(Duration::from_millis(ms)),
        };

        self.parser_resolved = ParserConfig::new()
            .with_directive_marker(directive_marker)
            .with_var_marker(var_marker)
            .with_extensions(
                Extensions::NONE.set(Extensions::ANCHOR_LINKS, self.parser.anchor_links),
            )
            .with_max_parsing_time(max_parsing_time);
        Ok(())
    }
}

/// Require a string field to hold a single usable marker character.
fn require_marker(value: &str, field: &str) -> Result<char, ConfigError> {
    let mut chars = value.chars();
    let (Some(marker), None) = (chars.next(), chars.next()) else {
        return Err(ConfigError::Validation(format!(
            "{field} must be a single character, got {value:?}"
        )));
    };
    if marker.is_whitespace() || marker.is_alphanumeric() {
        return Err(ConfigError::Validation(format!(
            "{field} cannot be whitespace or alphanumeric, got {value:?}"
        )));
    }
    Ok(marker)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn resolved(toml: &str) -> Result<Config, ConfigError> {
        let mut config: Config = toml::from_str(toml)?;
        config.resolve()?;
        Ok(config)
    }

    #[test]
    fn test_default_config() {
        let mut config = Config::default();
        config.resolve().unwrap();
        assert_eq!(config.parser.directive_marker, "@");
        assert_eq!(config.parser.var_marker, "$");
        assert!(!config.parser.anchor_links);
        assert_eq!(config.parser.max_parsing_time_ms, 2000);
        assert_eq!(config.parser_resolved, ParserConfig::default());
        assert!(config.config_path.is_none());
    }

    #[test]
    fn test_parse_minimal_config() {
        let config = resolved("").unwrap();
        assert_eq!(config.parser_resolved, ParserConfig::default());
    }

    #[test]
    fn test_parse_parser_config() {
        let toml = r#"
[parser]
directive_marker = ":"
var_marker = "%"
anchor_links = true
max_parsing_time_ms = 500
"#;
        let config = resolved(toml).unwrap();
        let parser = &config.parser_resolved;
        assert_eq!(parser.directive_marker, ':');
        assert_eq!(parser.var_marker, '%');
        assert!(parser.anchor_links());
        assert_eq!(parser.max_parsing_time, Some(Duration::from_millis(500)));
    }

    #[test]
    fn test_zero_budget_disables_limit() {
        let config = resolved("[parser]\nmax_parsing_time_ms = 0\n").unwrap();
        assert_eq!(config.parser_resolved.max_parsing_time, None);
    }

    #[test]
    fn test_multi_char_marker_rejected() {
        let err = resolved("[parser]\ndirective_marker = \"@@\"\n").unwrap_err();
        assert!(
            matches!(err, ConfigError::Validation(_)),
            "Expected ConfigError::Validation, got {err:?}"
        );
        assert!(err.to_string().contains("parser.directive_marker"));
    }

    #[test]
    fn test_empty_marker_rejected() {
        let err = resolved("[parser]\nvar_marker = \"\"\n").unwrap_err();
        assert!(err.to_string().contains("single character"));
    }

    #[test]
    fn test_alphanumeric_and_whitespace_markers_rejected() {
        for marker in ["a", "7", " ", "\t"] {
            let toml = format!("[parser]\ndirective_marker = {marker:?}\n");
            let err = resolved(&toml).unwrap_err();
            assert!(
                err.to_string().contains("whitespace or alphanumeric"),
                "marker {marker:?}: {err}"
            );
        }
    }

    #[test]
    fn test_identical_markers_rejected() {
        let err = resolved("[parser]\ndirective_marker = \"$\"\n").unwrap_err();
        assert!(err.to_string().contains("must differ"));
    }

    #[test]
    fn test_unknown_type_is_parse_error() {
        let err = resolved("[parser]\nanchor_links = \"yes\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)), "got {err:?}");
    }

    #[test]
    fn test_apply_cli_settings() {
        let mut config: Config = toml::from_str("[parser]\ndirective_marker = \":\"\n").unwrap();
        let overrides = CliSettings {
            anchor_links: Some(true),
            max_parsing_time_ms: Some(0),
            ..Default::default()
        };

        config.apply_cli_settings(&overrides);
        config.resolve().unwrap();

        assert_eq!(config.parser_resolved.directive_marker, ':'); // Unchanged
        assert!(config.parser_resolved.anchor_links());
        assert_eq!(config.parser_resolved.max_parsing_time, None);
    }

    #[test]
    fn test_cli_settings_are_validated() {
        let mut config = Config::default();
        let overrides = CliSettings {
            var_marker: Some('@'),
            ..Default::default()
        };

        config.apply_cli_settings(&overrides);

        assert!(matches!(config.resolve(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_load_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        std::fs::write(&path, "[parser]\nanchor_links = true\n").unwrap();

        let settings = CliSettings {
            directive_marker: Some('!'),
            ..Default::default()
        };
        let config = Config::load(Some(&path), Some(&settings)).unwrap();

        assert_eq!(config.config_path.as_deref(), Some(path.as_path()));
        assert!(config.parser_resolved.anchor_links());
        assert_eq!(config.parser_resolved.directive_marker, '!');
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.toml");

        let err = Config::load(Some(&path), None).unwrap_err();

        assert!(matches!(err, ConfigError::NotFound(_)), "got {err:?}");
        assert!(err.to_string().contains("missing.toml"));
    }

    #[test]
    fn test_load_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        std::fs::write(&path, "[parser\n").unwrap();

        let err = Config::load(Some(&path), None).unwrap_err();

        assert!(matches!(err, ConfigError::Parse(_)), "got {err:?}");
    }
}
