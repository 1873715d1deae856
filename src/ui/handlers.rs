//! TUI action handlers
//!
//! Applies [`InputAction`]s to the [`App`]. Submission goes through
//! `App::submit`, which enforces the blank-input and in-flight guards; the
//! handler only turns refusals into a notice.

use crate::ui::input::InputAction;
use crate::ui::state::{App, SubmitError};

/// Apply one action
pub fn apply_action(app: &mut App, action: InputAction) {
    match action {
        InputAction::None => {}
        InputAction::Quit => app.quit(),
        InputAction::Submit => handle_submit(app),
        InputAction::Insert(c) => app.handle_char(c),
        InputAction::Newline => app.handle_newline(),
        InputAction::Backspace => app.handle_backspace(),
        InputAction::ClearInput => app.clear_input(),
        InputAction::ScrollUp(n) => app.scroll_up(n),
        InputAction::ScrollDown(n) => app.scroll_down(n),
        InputAction::ScrollTop => app.scroll_to_top(),
    }
}

/// Handle the submit action
pub fn handle_submit(app: &mut App) {
    match app.submit() {
        Ok(_) => {}
        Err(SubmitError::EmptyInput) => {
            app.notice = Some("Enter clinical text before extracting entities.".to_string());
        }
        Err(SubmitError::InFlight(_)) => {
            app.notice = Some("Still processing the previous request.".to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotate::client::AnnotationClient;
    use crate::annotate::transport::FakeTransport;
    use crate::config::ServiceConfig;
    use std::time::Duration;

    fn app(transport: FakeTransport) -> App {
        let config = ServiceConfig::new("http://test/annotate", "k");
        App::new(AnnotationClient::new(config, transport).unwrap())
    }

    #[test]
    fn test_typing_then_submit() {
        let transport = FakeTransport::new("[]");
        let requests = transport.requests();
        let mut app = app(transport);

        for c in "cough".chars() {
            apply_action(&mut app, InputAction::Insert(c));
        }
        apply_action(&mut app, InputAction::Submit);
        assert!(app.wait_for_idle(Duration::from_secs(5)));

        assert_eq!(requests.len(), 1);
        assert_eq!(
            requests.last().unwrap().form_value("inputtext"),
            Some("cough")
        );
    }

    #[test]
    fn test_empty_submit_sets_notice() {
        let mut app = app(FakeTransport::new("[]"));
        apply_action(&mut app, InputAction::Submit);
        assert!(app.notice.as_deref().unwrap().contains("Enter clinical text"));
        assert!(!app.is_loading());
    }

    #[test]
    fn test_in_flight_submit_sets_notice() {
        let (transport, gate) = FakeTransport::new("[]").gated();
        let mut app = app(transport);
        app.input_buffer = "fever".to_string();

        apply_action(&mut app, InputAction::Submit);
        apply_action(&mut app, InputAction::Submit);
        assert!(app.notice.as_deref().unwrap().contains("Still processing"));

        gate.release();
        assert!(app.wait_for_idle(Duration::from_secs(5)));
    }

    #[test]
    fn test_quit() {
        let mut app = app(FakeTransport::new("[]"));
        apply_action(&mut app, InputAction::Quit);
        assert!(app.should_quit());
    }
}
