//! One-shot `annotate` mode
//!
//! Loads config, logs to stderr, sends one request on the calling thread and
//! prints either the rendered cards or the JSON array to stdout.

use std::io::{Read, Write};
use std::path::Path;
use tracing::error;

use crate::annotate::client::AnnotationClient;
use crate::annotate::display::format_results;
use crate::cli::args::TextSource;
use crate::cli::config_root::resolve_config_root;
use crate::cli::{Error, Result, EXIT_CONFIG_ERROR, EXIT_FAILURE, EXIT_SUCCESS};
use crate::config::AppConfig;
use crate::logging::{init_logging, LogSink};

/// Run `annotate` and return the process exit code
pub fn run_annotate(
    config_root: Option<&Path>,
    source: TextSource,
    json_output: bool,
) -> i32 {
    let setup = resolve_config_root(config_root)
        .and_then(|root| AppConfig::load(&root).map_err(Error::from))
        .and_then(|config| {
            // Stderr sink holds no appender guard
            init_logging(&config.logging, LogSink::Stderr)?;
            AnnotationClient::from_config(config.service).map_err(Error::from)
        });

    let client = match setup {
        Ok(client) => client,
        Err(e) => {
            eprintln!("Error: {}", e);
            return EXIT_CONFIG_ERROR;
        }
    };

    let text = match read_text(&source) {
        Ok(text) => text,
        Err(e) => {
            eprintln!("Error: {}", e);
            return EXIT_FAILURE;
        }
    };

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match annotate_to_writer(&client, &text, json_output, &mut out) {
        Ok(()) => EXIT_SUCCESS,
        Err(Error::Annotate(e)) => {
            error!(kind = e.kind(), "annotate command failed");
            eprintln!("Error: {}", e.user_message());
            EXIT_FAILURE
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            EXIT_FAILURE
        }
    }
}

/// Annotate `text` and write the output
pub fn annotate_to_writer<W: Write>(
    client: &AnnotationClient,
    text: &str,
    json_output: bool,
    out: &mut W,
) -> Result<()> {
    let results = client.annotate(text)?;
    if json_output {
        serde_json::to_writer_pretty(&mut *out, &results)?;
        writeln!(out)?;
    } else {
        write!(out, "{}", format_results(&results))?;
    }
    Ok(())
}

/// Read input text from its source
pub fn read_text(source: &TextSource) -> Result<String> {
    match source {
        TextSource::Inline(text) => Ok(text.clone()),
        TextSource::File(path) => std::fs::read_to_string(path).map_err(Error::from),
        TextSource::Stdin => {
            let mut text = String::new();
            std::io::stdin().read_to_string(&mut text)?;
            Ok(text)
        }
    }
}
