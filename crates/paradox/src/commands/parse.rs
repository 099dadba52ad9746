//! `paradox parse` command implementation.

use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::{Args, ValueEnum};
use paradox_config::{CliSettings, Config};
use paradox_parser::Parser;
use paradox_parser::ast::Node;

use crate::error::CliError;
use crate::output::Output;

/// How the syntax tree is printed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub(crate) enum TreeFormat {
    /// Indented tree, one node per line.
    #[default]
    Tree,
    /// Pretty-printed JSON.
    Json,
}

/// Arguments for the parse command.
#[derive(Args)]
pub(crate) struct ParseArgs {
    /// Markdown file to parse (default: read stdin; `-` also reads stdin).
    input: Option<PathBuf>,

    /// Path to configuration file (default: auto-discover paradox.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output format.
    #[arg(short, long, value_enum, default_value_t)]
    format: TreeFormat,

    /// Directive marker character (overrides config).
    #[arg(short, long)]
    marker: Option<char>,

    /// Variable substitution marker character (overrides config).
    #[arg(long)]
    var_marker: Option<char>,

    /// Wrap header contents in anchor links (overrides config).
    #[arg(long)]
    anchor_links: Option<bool>,

    /// Disable header anchor links.
    #[arg(long, conflicts_with = "anchor_links")]
    no_anchor_links: bool,

    /// Parsing time budget in milliseconds, 0 for unlimited (overrides config).
    #[arg(long)]
    timeout_ms: Option<u64>,

    /// Enable verbose output (show configuration and timing logs).
    #[arg(short, long)]
    pub verbose: bool,
}

impl ParseArgs {
    /// Execute the parse command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails, the input cannot be read,
    /// or parsing exceeds its time budget.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            directive_marker: self.marker,
            var_marker: self.var_marker,
            anchor_links: self.resolve_anchor_links(),
            max_parsing_time_ms: self.timeout_ms,
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        if let Some(path) = &config.config_path {
            tracing::info!(path = %path.display(), "Loaded configuration");
        }

        let markdown = read_input(self.input.as_deref())?;
        let parser = Parser::new(config.parser_resolved);

        let started = Instant::now();
        let root = parser.parse(&markdown)?;
        tracing::info!(
            bytes = markdown.len(),
            nodes = root.descendants().count(),
            elapsed_ms = started.elapsed().as_millis(),
            "Parsed document"
        );

        output.result(&render(&root, self.format)?)?;
        Ok(())
    }

    /// Resolve `anchor_links` from --anchor-links/--no-anchor-links flags.
    fn resolve_anchor_links(&self) -> Option<bool> {
        self.no_anchor_links.then_some(false).or(self.anchor_links)
    }
}

/// Read the document from a file, or from stdin for `None` and `-`.
fn read_input(path: Option<&Path>) -> Result<String, CliError> {
    match path {
        Some(path) if path != Path::new("-") => Ok(std::fs::read_to_string(path)?),
        _ => {
            let mut markdown = String::new();
            std::io::stdin().read_to_string(&mut markdown)?;
            Ok(markdown)
        }
    }
}

/// Render a syntax tree in the requested format, newline-terminated.
fn render(root: &Node, format: TreeFormat) -> Result<String, CliError> {
    match format {
        TreeFormat::Tree => Ok(root.dump()),
        TreeFormat::Json => {
            let mut json = serde_json::to_string_pretty(root)?;
            json.push('\n');
            Ok(json)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser as _;
    use pretty_assertions::assert_eq;

    #[derive(clap::Parser)]
    struct TestCli {
        #[command(flatten)]
        args: ParseArgs,
    }

    fn args(argv: &[&str]) -> ParseArgs {
        let argv = std::iter::once("paradox-parse").chain(argv.iter().copied());
        TestCli::try_parse_from(argv).unwrap().args
    }

    #[test]
    fn test_anchor_link_flags() {
        assert_eq!(args(&[]).resolve_anchor_links(), None);
        assert_eq!(args(&["--anchor-links", "true"]).resolve_anchor_links(), Some(true));
        assert_eq!(args(&["--no-anchor-links"]).resolve_anchor_links(), Some(false));
    }

    #[test]
    fn test_conflicting_anchor_flags_rejected() {
        let argv = ["paradox-parse", "--anchor-links", "true", "--no-anchor-links"];
        assert!(TestCli::try_parse_from(argv).is_err());
    }

    #[test]
    fn test_marker_and_format_args() {
        let parsed = args(&["doc.md", "-m", ":", "--format", "json", "--timeout-ms", "0"]);
        assert_eq!(parsed.input, Some(PathBuf::from("doc.md")));
        assert_eq!(parsed.marker, Some(':'));
        assert_eq!(parsed.format, TreeFormat::Json);
        assert_eq!(parsed.timeout_ms, Some(0));
    }

    #[test]
    fn test_read_input_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.md");
        std::fs::write(&path, "# Title\n").unwrap();
        assert_eq!(read_input(Some(&path)).unwrap(), "# Title\n");
    }

    #[test]
    fn test_read_missing_input_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_input(Some(&dir.path().join("missing.md"))).unwrap_err();
        assert!(matches!(err, CliError::Io(_)), "got {err:?}");
    }

    #[test]
    fn test_render_tree() {
        let root = Parser::default().parse("@@toc").unwrap();
        assert_eq!(
            render(&root, TreeFormat::Tree).unwrap(),
            "Root [0-5]\n  Directive [0-5] LeafBlock 'toc'\n    Super [5-5]\n"
        );
    }

    #[test]
    fn test_render_json() {
        let root = Parser::default().parse("@x[y]").unwrap();
        let json = render(&root, TreeFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["start"], 0);
        assert_eq!(value["end"], 5);
        let directive = &value["kind"]["Root"][0]["kind"]["Para"][0]["kind"]["Directive"];
        assert_eq!(directive["name"], "x");
        assert_eq!(directive["format"], "Inline");
        assert_eq!(directive["label"], "y");
    }
}
