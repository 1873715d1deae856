//! Application state for the annotation form
//!
//! State is split between:
//! - Transient UI state (input buffer, scroll, notice)
//! - Request state machine (idle / loading / success / failed), which also
//!   owns the displayed results
//!
//! Single-flight: at most one worker exists; `submit` refuses while loading.
//! Worker outcomes are matched by request id, so nothing but the in-flight
//! request can change the results.

use crate::annotate::client::AnnotationClient;
use crate::annotate::error::AnnotateError;
use crate::annotate::events::{AnnotateEvent, AnnotateReceiver, AnnotateSender};
use crate::annotate::types::AnnotationResult;
use crate::annotate::worker::{spawn_annotate_worker, AnnotateWorkerHandle};
use std::sync::mpsc::{self, TryRecvError};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Request lifecycle
///
/// `retained` carries the last good results so they stay on screen while a
/// new request runs and after it fails.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum RequestState {
    /// Nothing submitted yet
    #[default]
    Idle,
    /// Request in flight
    Loading {
        request_id: u64,
        retained: Vec<AnnotationResult>,
    },
    /// Last request succeeded
    Success(Vec<AnnotationResult>),
    /// Last request failed; previous results kept
    Failed {
        error: AnnotateError,
        retained: Vec<AnnotationResult>,
    },
}

impl RequestState {
    /// Results to display
    pub fn results(&self) -> &[AnnotationResult] {
        match self {
            RequestState::Idle => &[],
            RequestState::Loading { retained, .. } => retained,
            RequestState::Success(results) => results,
            RequestState::Failed { retained, .. } => retained,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, RequestState::Loading { .. })
    }

    /// Error of the last request, if it failed
    pub fn error(&self) -> Option<&AnnotateError> {
        match self {
            RequestState::Failed { error, .. } => Some(error),
            _ => None,
        }
    }

    /// Id of the in-flight request
    pub fn in_flight(&self) -> Option<u64> {
        match self {
            RequestState::Loading { request_id, .. } => Some(*request_id),
            _ => None,
        }
    }

    fn take_results(&mut self) -> Vec<AnnotationResult> {
        match std::mem::take(self) {
            RequestState::Idle => Vec::new(),
            RequestState::Loading { retained, .. } => retained,
            RequestState::Success(results) => results,
            RequestState::Failed { retained, .. } => retained,
        }
    }
}

/// Why a submit was refused
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubmitError {
    #[error("Input text is empty")]
    EmptyInput,

    #[error("Request {0} is still in progress")]
    InFlight(u64),
}

/// Main application state
pub struct App {
    /// Current input text
    pub input_buffer: String,
    /// Transient status line (rejected submits, hints)
    pub notice: Option<String>,
    /// Results scroll offset in lines (0 = top)
    pub results_scroll: usize,
    client: Arc<AnnotationClient>,
    request_state: RequestState,
    next_request_id: u64,
    worker: Option<AnnotateWorkerHandle>,
    event_tx: AnnotateSender,
    event_rx: AnnotateReceiver,
    should_quit: bool,
}

impl App {
    /// Create app around an annotation client
    pub fn new(client: AnnotationClient) -> Self {
        let (event_tx, event_rx) = mpsc::channel();
        Self {
            input_buffer: String::new(),
            notice: None,
            results_scroll: 0,
            client: Arc::new(client),
            request_state: RequestState::Idle,
            next_request_id: 1,
            worker: None,
            event_tx,
            event_rx,
            should_quit: false,
        }
    }

    pub fn request_state(&self) -> &RequestState {
        &self.request_state
    }

    pub fn results(&self) -> &[AnnotationResult] {
        self.request_state.results()
    }

    pub fn is_loading(&self) -> bool {
        self.request_state.is_loading()
    }

    /// User-facing error line, if the last request failed
    pub fn error_message(&self) -> Option<String> {
        self.request_state.error().map(AnnotateError::user_message)
    }

    /// Whether the submit affordance is enabled
    pub fn can_submit(&self) -> bool {
        !self.is_loading() && !self.input_buffer.trim().is_empty()
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Submit the current input buffer
    ///
    /// Spawns one worker and moves to `Loading`. Refuses (without touching
    /// the request state) when the text is blank or a request is in flight.
    pub fn submit(&mut self) -> Result<u64, SubmitError> {
        if let Some(request_id) = self.request_state.in_flight() {
            debug!(request_id, "submit rejected: request in flight");
            return Err(SubmitError::InFlight(request_id));
        }
        if self.input_buffer.trim().is_empty() {
            return Err(SubmitError::EmptyInput);
        }

        let request_id = self.next_request_id;
        self.next_request_id += 1;

        let retained = self.request_state.take_results();
        self.request_state = RequestState::Loading {
            request_id,
            retained,
        };
        self.notice = None;

        info!(
            request_id,
            input_chars = self.input_buffer.chars().count(),
            "annotation submitted"
        );
        self.worker = Some(spawn_annotate_worker(
            Arc::clone(&self.client),
            self.input_buffer.clone(),
            request_id,
            self.event_tx.clone(),
        ));
        Ok(request_id)
    }

    /// Drain worker events and apply the one for the in-flight request
    ///
    /// Non-blocking. Returns true when the request state changed.
    pub fn process_events(&mut self) -> bool {
        let mut changed = self.drain_events();

        // A finished worker that reported nothing must not leave us loading.
        let vanished = self
            .worker
            .as_ref()
            .map(|w| !w.is_running())
            .unwrap_or(false);
        if vanished && self.is_loading() {
            // The event may have landed between the drain and the check.
            changed |= self.drain_events();
            if let Some(request_id) = self.request_state.in_flight() {
                warn!(request_id, "annotation worker exited without an outcome");
                self.apply_event(AnnotateEvent::Failed {
                    request_id,
                    error: AnnotateError::Transport(
                        "request ended without a response".to_string(),
                    ),
                });
                changed = true;
            }
        }
        changed
    }

    fn drain_events(&mut self) -> bool {
        let mut changed = false;
        loop {
            match self.event_rx.try_recv() {
                Ok(event) => changed |= self.apply_event(event),
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
        changed
    }

    fn apply_event(&mut self, event: AnnotateEvent) -> bool {
        let Some(in_flight) = self.request_state.in_flight() else {
            debug!(request_id = event.request_id(), "ignoring event: nothing in flight");
            return false;
        };
        if event.request_id() != in_flight {
            debug!(
                request_id = event.request_id(),
                in_flight, "ignoring stale event"
            );
            return false;
        }

        let retained = self.request_state.take_results();
        self.request_state = match event {
            AnnotateEvent::Completed { results, .. } => {
                self.results_scroll = 0;
                RequestState::Success(results)
            }
            AnnotateEvent::Failed { error, .. } => RequestState::Failed { error, retained },
        };
        self.worker = None;
        true
    }

    /// Poll events until the in-flight request settles or `timeout` elapses
    ///
    /// Returns true when no request is in flight on return.
    pub fn wait_for_idle(&mut self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        loop {
            self.process_events();
            if !self.is_loading() {
                return true;
            }
            if Instant::now() >= deadline {
                return false;
            }
            std::thread::sleep(Duration::from_millis(10));
        }
    }

    /// Cancel the in-flight worker; its outcome will be discarded
    pub fn shutdown(&mut self) {
        if let Some(worker) = self.worker.take() {
            info!(request_id = worker.request_id(), "cancelling in-flight annotation");
            worker.cancel();
        }
    }

    // Input editing

    pub fn handle_char(&mut self, c: char) {
        self.input_buffer.push(c);
        self.notice = None;
    }

    pub fn handle_newline(&mut self) {
        self.input_buffer.push('\n');
    }

    pub fn handle_backspace(&mut self) {
        self.input_buffer.pop();
    }

    pub fn clear_input(&mut self) {
        self.input_buffer.clear();
    }

    // Results scrolling

    pub fn scroll_up(&mut self, lines: usize) {
        self.results_scroll = self.results_scroll.saturating_sub(lines);
    }

    pub fn scroll_down(&mut self, lines: usize) {
        self.results_scroll = self.results_scroll.saturating_add(lines);
    }

    pub fn scroll_to_top(&mut self) {
        self.results_scroll = 0;
    }

    #[cfg(test)]
    pub(crate) fn event_sender(&self) -> AnnotateSender {
        self.event_tx.clone()
    }
}

impl Drop for App {
    fn drop(&mut self) {
        self.shutdown();
    }
}
