//! Form rendering
//!
//! Layout, top to bottom:
//! - Title
//! - Input box ("Enter Clinical Text")
//! - Submit line ("Extract Entities" / "Processing...") with key hints
//! - Error or notice line
//! - Results (cards per annotation, scrollable)

use ratatui::style::Stylize;
use ratatui::{
    backend::Backend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame, Terminal,
};

use crate::annotate::display::{evidence_rows, EMPTY_RESULTS_PLACEHOLDER};
use crate::annotate::types::AnnotationResult;
use crate::ui::input::key_hints;
use crate::ui::state::App;

/// Page title
pub const TITLE: &str = "Clinical Named Entity Extraction";
/// Input box label
pub const INPUT_LABEL: &str = "Enter Clinical Text";
/// Shown in the empty input box
pub const INPUT_PLACEHOLDER: &str = "Enter clinical text here...";
/// Submit affordance when idle
pub const SUBMIT_LABEL: &str = "Extract Entities";
/// Submit affordance while loading
pub const LOADING_LABEL: &str = "Processing...";

/// Render the form into a terminal
pub fn render<B: Backend>(terminal: &mut Terminal<B>, app: &App) -> std::io::Result<()> {
    terminal.draw(|f| draw(f, app))?;
    Ok(())
}

/// Draw the form into a frame
pub fn draw(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(8),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(f.area());

    render_title(f, chunks[0]);
    render_input(f, app, chunks[1]);
    render_submit_line(f, app, chunks[2]);
    render_status_line(f, app, chunks[3]);
    render_results(f, app, chunks[4]);
}

fn render_title(f: &mut Frame, area: Rect) {
    let title = Paragraph::new(Line::from(TITLE.bold()))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::BOTTOM));
    f.render_widget(title, area);
}

fn render_input(f: &mut Frame, app: &App, area: Rect) {
    let border_style = if app.is_loading() {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default().fg(Color::Green)
    };

    let text: Vec<Line> = if app.input_buffer.is_empty() {
        vec![Line::from(Span::styled(
            INPUT_PLACEHOLDER,
            Style::default().fg(Color::DarkGray),
        ))]
    } else {
        app.input_buffer.split('\n').map(Line::from).collect()
    };

    // Keep the cursor line visible once the text outgrows the box
    let inner_height = area.height.saturating_sub(2) as usize;
    let scroll = text.len().saturating_sub(inner_height) as u16;

    let input = Paragraph::new(text)
        .block(
            Block::default()
                .title(format!(" {} ", INPUT_LABEL))
                .borders(Borders::ALL)
                .border_style(border_style),
        )
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0));
    f.render_widget(input, area);
}

fn render_submit_line(f: &mut Frame, app: &App, area: Rect) {
    let button = if app.is_loading() {
        Span::styled(
            format!("[ {} ]", LOADING_LABEL),
            Style::default().fg(Color::Yellow),
        )
    } else if app.can_submit() {
        Span::styled(
            format!("[ {} ]", SUBMIT_LABEL),
            Style::default().fg(Color::Black).bg(Color::Green),
        )
    } else {
        Span::styled(
            format!("[ {} ]", SUBMIT_LABEL),
            Style::default().fg(Color::DarkGray),
        )
    };

    let line = Line::from(vec![
        button,
        Span::raw("  "),
        Span::styled(key_hints(), Style::default().fg(Color::DarkGray)),
    ]);
    f.render_widget(Paragraph::new(line).alignment(Alignment::Center), area);
}

fn render_status_line(f: &mut Frame, app: &App, area: Rect) {
    let line = if let Some(error) = app.error_message() {
        Line::from(Span::styled(error, Style::default().fg(Color::Red)))
    } else if let Some(ref notice) = app.notice {
        Line::from(Span::styled(
            notice.as_str(),
            Style::default().fg(Color::Yellow),
        ))
    } else {
        Line::from("")
    };
    f.render_widget(Paragraph::new(line).alignment(Alignment::Center), area);
}

fn render_results(f: &mut Frame, app: &App, area: Rect) {
    let results = app.results();
    let block = Block::default()
        .title(format!(" Results ({}) ", results.len()))
        .borders(Borders::ALL);

    if results.is_empty() {
        if app.error_message().is_none() {
            let placeholder = Paragraph::new(Span::styled(
                EMPTY_RESULTS_PLACEHOLDER,
                Style::default().fg(Color::DarkGray),
            ))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(block);
            f.render_widget(placeholder, area);
        } else {
            f.render_widget(block, area);
        }
        return;
    }

    let lines = result_lines(results);
    let max_scroll = lines.len().saturating_sub(1);
    let scroll = app.results_scroll.min(max_scroll) as u16;

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0));
    f.render_widget(paragraph, area);
}

/// Styled lines for all result cards
pub fn result_lines(results: &[AnnotationResult]) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for (index, result) in results.iter().enumerate() {
        if index > 0 {
            lines.push(Line::from(""));
        }
        lines.push(Line::from(Span::styled(
            result.matched_text.clone(),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )));

        for (ev_index, evidence) in result.evidence.iter().enumerate() {
            if ev_index > 0 {
                lines.push(Line::from(""));
            }
            for (label, value) in evidence_rows(result, &evidence.concept_info) {
                lines.push(Line::from(vec![
                    Span::styled(format!("  {}: ", label), Style::default().bold()),
                    Span::raw(value),
                ]));
            }
        }
    }
    lines
}
