//! CLI argument parsing
//!
//! ```text
//! clinical-ner [--config-root <path>] [tui]
//! clinical-ner [--config-root <path>] annotate [TEXT] [--file <path>] [--json]
//! ```
//!
//! `annotate` reads stdin when neither TEXT nor `--file` is given.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Parsed CLI arguments
#[derive(Debug, Clone, PartialEq, Eq, Parser)]
#[command(
    name = "clinical-ner",
    version,
    about = "Extract clinical named entities from free text"
)]
pub struct Args {
    /// Directory holding config.toml and logs (default: $CLINICAL_NER_HOME, then .)
    #[arg(long, global = true, value_name = "PATH")]
    pub config_root: Option<PathBuf>,

    #[command(subcommand)]
    pub mode: Option<Mode>,
}

/// CLI modes
#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Mode {
    /// Interactive form (default)
    Tui,

    /// Annotate text once and print the results
    Annotate {
        /// Text to annotate
        #[arg(conflicts_with = "file")]
        text: Option<String>,

        /// Read the text from a file ("-" for stdin)
        #[arg(long, value_name = "PATH")]
        file: Option<PathBuf>,

        /// Print the raw result array as JSON
        #[arg(long)]
        json: bool,
    },
}

impl Args {
    /// Mode to run (TUI when none given)
    pub fn mode(&self) -> Mode {
        self.mode.clone().unwrap_or(Mode::Tui)
    }
}

/// Where `annotate` takes its text from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextSource {
    Inline(String),
    File(PathBuf),
    Stdin,
}

impl TextSource {
    /// Resolve from `annotate` arguments
    pub fn from_args(text: Option<String>, file: Option<PathBuf>) -> Self {
        match (text, file) {
            (Some(text), _) => TextSource::Inline(text),
            (None, Some(path)) if path.as_os_str() == "-" => TextSource::Stdin,
            (None, Some(path)) => TextSource::File(path),
            (None, None) => TextSource::Stdin,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_source() {
        assert_eq!(
            TextSource::from_args(Some("x".to_string()), None),
            TextSource::Inline("x".to_string())
        );
        assert_eq!(
            TextSource::from_args(None, Some(PathBuf::from("-"))),
            TextSource::Stdin
        );
        assert_eq!(
            TextSource::from_args(None, Some(PathBuf::from("note.txt"))),
            TextSource::File(PathBuf::from("note.txt"))
        );
        assert_eq!(TextSource::from_args(None, None), TextSource::Stdin);
    }

    #[test]
    fn test_command_definition_is_valid() {
        use clap::CommandFactory;
        Args::command().debug_assert();
    }
}
