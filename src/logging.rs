//! Logging bootstrap
//!
//! `tracing` subscriber setup for both run modes:
//! - TUI: daily-rolling file under the log directory (the terminal belongs to the UI)
//! - one-shot CLI: stderr
//!
//! Clinical text and API keys are never logged; call sites log lengths only.

use crate::config::{LogFormat, LoggingConfig};
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

/// Log file prefix (files are `clinical-ner.log.YYYY-MM-DD`)
pub const LOG_FILE_PREFIX: &str = "clinical-ner.log";

/// Env var overriding the configured filter
pub const ENV_LOG_FILTER: &str = "CLINICAL_NER_LOG";

/// Logging errors
#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error("Invalid log filter '{filter}': {message}")]
    InvalidFilter { filter: String, message: String },

    #[error("Failed to create log directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Log destination
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogSink {
    File(PathBuf),
    Stderr,
}

/// Build the filter: `CLINICAL_NER_LOG` wins over the configured level
pub fn build_filter(configured: &str) -> Result<EnvFilter, LoggingError> {
    let directive = std::env::var(ENV_LOG_FILTER)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| configured.to_string());

    EnvFilter::try_new(&directive).map_err(|e| LoggingError::InvalidFilter {
        filter: directive.clone(),
        message: e.to_string(),
    })
}

/// Install the global subscriber
///
/// Returns the appender guard for file sinks; keep it alive until exit so
/// buffered lines are flushed. A second call is a no-op.
pub fn init_logging(
    config: &LoggingConfig,
    sink: LogSink,
) -> Result<Option<WorkerGuard>, LoggingError> {
    let filter = build_filter(&config.level)?;

    match sink {
        LogSink::File(dir) => {
            std::fs::create_dir_all(&dir).map_err(|source| LoggingError::CreateDir {
                path: dir.clone(),
                source,
            })?;
            let appender = tracing_appender::rolling::daily(&dir, LOG_FILE_PREFIX);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let builder = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(writer)
                .with_ansi(false);
            let _ = match config.format {
                LogFormat::Json => builder.json().try_init(),
                LogFormat::Text => builder.try_init(),
            };
            Ok(Some(guard))
        }
        LogSink::Stderr => {
            let builder = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr);
            let _ = match config.format {
                LogFormat::Json => builder.json().try_init(),
                LogFormat::Text => builder.try_init(),
            };
            Ok(None)
        }
    }
}
