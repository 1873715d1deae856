//! clinical-ner CLI
//!
//! Modes:
//! - TUI (default): interactive form, one request in flight at a time
//! - annotate: one request, results to stdout
//!
//! EXIT: Esc or Ctrl+C from any state

use std::io;
use std::path::Path;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use crossterm::{
    event::{poll, read, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::info;

use clinical_ner::annotate::AnnotationClient;
use clinical_ner::cli::{
    resolve_config_root, run_annotate, Args, Mode, TextSource, EXIT_CONFIG_ERROR,
};
use clinical_ner::config::AppConfig;
use clinical_ner::logging::{init_logging, LogSink};
use clinical_ner::ui::{apply_action, map_key, render, App};

/// Event poll interval for the TUI loop
const POLL_INTERVAL: Duration = Duration::from_millis(100);

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    match args.mode() {
        Mode::Annotate { text, file, json } => {
            let source = TextSource::from_args(text, file);
            let exit_code = run_annotate(args.config_root.as_deref(), source, json);
            std::process::exit(exit_code);
        }
        Mode::Tui => run_tui_mode(args.config_root.as_deref()),
    }
}

/// Run TUI mode
fn run_tui_mode(explicit_root: Option<&Path>) -> anyhow::Result<()> {
    let config_root = match resolve_config_root(explicit_root) {
        Ok(path) => path,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(EXIT_CONFIG_ERROR);
        }
    };

    let config = match AppConfig::load(&config_root) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(EXIT_CONFIG_ERROR);
        }
    };

    let log_dir = config.logging.log_dir(&config_root);
    let _log_guard = init_logging(&config.logging, LogSink::File(log_dir.clone()))
        .with_context(|| format!("failed to initialise logging in {}", log_dir.display()))?;

    let client = match AnnotationClient::from_config(config.service) {
        Ok(client) => client,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(EXIT_CONFIG_ERROR);
        }
    };
    info!(config_root = %config_root.display(), "starting TUI");

    // Setup terminal
    enable_raw_mode().context("failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("failed to create terminal")?;

    let mut app = App::new(client);
    let outcome = event_loop(&mut terminal, &mut app);

    // Cancel any in-flight request before restoring the terminal
    app.shutdown();

    // Cleanup runs even when the loop failed
    disable_raw_mode().context("failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("failed to leave alternate screen")?;
    terminal.show_cursor().context("failed to show cursor")?;

    info!("TUI exited");
    outcome
}

/// Main event loop: render, poll keys, drain worker events
fn event_loop<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> anyhow::Result<()> {
    while !app.should_quit() {
        render(terminal, app).context("failed to draw")?;

        if poll(POLL_INTERVAL)? {
            if let Event::Key(key) = read()? {
                apply_action(app, map_key(key));
            }
        }

        // Non-blocking: applies the in-flight outcome if it arrived
        app.process_events();
    }
    Ok(())
}
