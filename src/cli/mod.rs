//! CLI module
//!
//! Provides:
//! - Argument parsing (clap)
//! - Config root resolution (flag → env → cwd)
//! - One-shot `annotate` dispatch

pub mod args;
pub mod config_root;
pub mod dispatch;

// Re-exports
pub use args::{Args, Mode, TextSource};
pub use config_root::resolve_config_root;
pub use dispatch::{annotate_to_writer, run_annotate};

use crate::annotate::error::AnnotateError;
use crate::config::ConfigError;
use crate::logging::LoggingError;

/// CLI errors
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid arguments: {0}")]
    InvalidArgs(String),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Logging setup failed: {0}")]
    Logging(#[from] LoggingError),

    #[error("{0}")]
    Annotate(#[from] AnnotateError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Exit codes (deterministic)
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILURE: i32 = 1;
pub const EXIT_CONFIG_ERROR: i32 = 2;

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, Error>;
