//! Key mapping for the annotation form
//!
//! Keys map to [`InputAction`]s; `handlers` applies them to the [`App`].
//! Editing stays possible while a request runs, submitting does not.
//!
//! [`App`]: crate::ui::state::App

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Lines moved by PageUp/PageDown
pub const PAGE_LINES: usize = 10;

/// Action requested by a key press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    None,
    Quit,
    Submit,
    Insert(char),
    Newline,
    Backspace,
    ClearInput,
    ScrollUp(usize),
    ScrollDown(usize),
    ScrollTop,
}

/// Map a key event to an action
///
/// # Examples
/// ```
/// use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
/// use clinical_ner::ui::input::{map_key, InputAction};
///
/// assert_eq!(map_key(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE)), InputAction::Submit);
/// assert_eq!(map_key(KeyEvent::new(KeyCode::Enter, KeyModifiers::ALT)), InputAction::Newline);
/// assert_eq!(map_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)), InputAction::Quit);
/// assert_eq!(map_key(KeyEvent::new(KeyCode::Char('x'), KeyModifiers::NONE)), InputAction::Insert('x'));
/// ```
pub fn map_key(key: KeyEvent) -> InputAction {
    if key.kind == KeyEventKind::Release {
        return InputAction::None;
    }

    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let alt = key.modifiers.contains(KeyModifiers::ALT);

    match key.code {
        KeyCode::Char('c') | KeyCode::Char('q') if ctrl => InputAction::Quit,
        KeyCode::Char('s') if ctrl => InputAction::Submit,
        KeyCode::Char('j') if ctrl => InputAction::Newline,
        KeyCode::Char('u') if ctrl => InputAction::ClearInput,
        KeyCode::Char(_) if ctrl => InputAction::None,
        KeyCode::Char(c) => InputAction::Insert(c),
        KeyCode::Enter if alt || key.modifiers.contains(KeyModifiers::SHIFT) => {
            InputAction::Newline
        }
        KeyCode::Enter => InputAction::Submit,
        KeyCode::Tab => InputAction::Insert('\t'),
        KeyCode::Backspace => InputAction::Backspace,
        KeyCode::Esc => InputAction::Quit,
        KeyCode::Up => InputAction::ScrollUp(1),
        KeyCode::Down => InputAction::ScrollDown(1),
        KeyCode::PageUp => InputAction::ScrollUp(PAGE_LINES),
        KeyCode::PageDown => InputAction::ScrollDown(PAGE_LINES),
        KeyCode::Home => InputAction::ScrollTop,
        _ => InputAction::None,
    }
}

/// Key help shown under the form
pub fn key_hints() -> &'static str {
    "Enter/Ctrl+S extract · Alt+Enter newline · Ctrl+U clear · ↑↓ PgUp PgDn scroll · Esc quit"
}
