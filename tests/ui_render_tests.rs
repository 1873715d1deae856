//! Form rendering against ratatui's TestBackend

use std::time::Duration;

use clinical_ner::annotate::display::EMPTY_RESULTS_PLACEHOLDER;
use clinical_ner::annotate::{AnnotationClient, FakeResponse, FakeTransport};
use clinical_ner::config::ServiceConfig;
use clinical_ner::ui::view::{INPUT_PLACEHOLDER, LOADING_LABEL, SUBMIT_LABEL, TITLE};
use clinical_ner::ui::{render, App};
use ratatui::{backend::TestBackend, Terminal};

const WIDTH: u16 = 120;
const HEIGHT: u16 = 40;
const WAIT: Duration = Duration::from_secs(5);

const BODY: &str = r#"[{"matchedtext": "hypertension", "start": 20, "length": 12, "evlist": [
  {"conceptinfo": {"cui": "C0020538", "preferredname": "Hypertensive disease", "semantictypes": ["dsyn", "fndg"]}}
]}]"#;

fn app_with(transport: FakeTransport) -> App {
    App::new(AnnotationClient::new(ServiceConfig::new("http://test", "k"), transport).unwrap())
}

/// Render once and return the screen as text rows
fn screen(app: &App) -> Vec<String> {
    let mut terminal = Terminal::new(TestBackend::new(WIDTH, HEIGHT)).unwrap();
    render(&mut terminal, app).unwrap();
    terminal
        .backend()
        .buffer()
        .content()
        .chunks(WIDTH as usize)
        .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
        .collect()
}

fn shows(rows: &[String], needle: &str) -> bool {
    rows.iter().any(|row| row.contains(needle))
}

#[test]
fn test_initial_form() {
    let app = app_with(FakeTransport::new("[]"));
    let rows = screen(&app);

    assert!(shows(&rows, TITLE));
    assert!(shows(&rows, INPUT_PLACEHOLDER));
    assert!(shows(&rows, SUBMIT_LABEL));
    assert!(shows(&rows, "Results (0)"));
    assert!(shows(&rows, EMPTY_RESULTS_PLACEHOLDER));
}

#[test]
fn test_typed_text_replaces_placeholder() {
    let mut app = app_with(FakeTransport::new("[]"));
    for c in "BP 160/100".chars() {
        app.handle_char(c);
    }
    let rows = screen(&app);
    assert!(shows(&rows, "BP 160/100"));
    assert!(!shows(&rows, INPUT_PLACEHOLDER));
}

#[test]
fn test_loading_shows_processing_label() {
    let (transport, gate) = FakeTransport::new(BODY).gated();
    let mut app = app_with(transport);
    app.input_buffer = "hypertension".to_string();
    app.submit().unwrap();

    let rows = screen(&app);
    assert!(shows(&rows, LOADING_LABEL));
    assert!(!shows(&rows, &format!("[ {} ]", SUBMIT_LABEL)));

    gate.release();
    assert!(app.wait_for_idle(WAIT));
    assert!(shows(&screen(&app), &format!("[ {} ]", SUBMIT_LABEL)));
}

#[test]
fn test_result_card_rendered() {
    let mut app = app_with(FakeTransport::new(BODY));
    app.input_buffer = "Patient history of hypertension".to_string();
    app.submit().unwrap();
    assert!(app.wait_for_idle(WAIT));

    let rows = screen(&app);
    assert!(shows(&rows, "Results (1)"));
    assert!(shows(&rows, "hypertension"));
    assert!(shows(&rows, "CUI: C0020538"));
    assert!(shows(&rows, "Name: Hypertensive disease"));
    assert!(shows(&rows, "Position: 20-32"));
    assert!(shows(&rows, "Semantic Types: dsyn, fndg"));
    assert!(!shows(&rows, EMPTY_RESULTS_PLACEHOLDER));
}

#[test]
fn test_error_replaces_placeholder() {
    let mut app = app_with(FakeTransport::with_status(500));
    app.input_buffer = "fever".to_string();
    app.submit().unwrap();
    assert!(app.wait_for_idle(WAIT));

    let rows = screen(&app);
    assert!(shows(&rows, "500"));
    assert!(!shows(&rows, EMPTY_RESULTS_PLACEHOLDER));
}

#[test]
fn test_error_shown_alongside_previous_results() {
    let transport = FakeTransport::with_sequence(vec![
        FakeResponse::Body(BODY.to_string()),
        FakeResponse::NetworkError("connection refused".to_string()),
    ]);
    let mut app = app_with(transport);
    app.input_buffer = "hypertension".to_string();
    app.submit().unwrap();
    assert!(app.wait_for_idle(WAIT));
    app.submit().unwrap();
    assert!(app.wait_for_idle(WAIT));

    let rows = screen(&app);
    assert!(shows(&rows, "Could not reach the annotation service"));
    assert!(shows(&rows, "CUI: C0020538"));
}
