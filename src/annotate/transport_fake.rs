//! Fake transport for testing
//!
//! Uses fixture responses instead of real HTTP calls and records every
//! request it receives. A gated fake holds each call until released, which
//! lets tests observe a request while it is still in flight.

use crate::annotate::request::AnnotationRequest;
use crate::annotate::transport_types::{AnnotateError, SyncTransport};
use std::sync::{Arc, Condvar, Mutex, MutexGuard};

/// Canned outcome returned by [`FakeTransport`]
#[derive(Debug, Clone)]
pub enum FakeResponse {
    /// 2xx with this body
    Body(String),
    /// Non-2xx status
    Status(u16),
    /// Connection-level failure
    NetworkError(String),
    /// Panic inside the call, so the caller never reports
    Panic,
}

/// Shared log of requests seen by a fake transport
#[derive(Debug, Clone, Default)]
pub struct RecordedRequests {
    inner: Arc<Mutex<Vec<AnnotationRequest>>>,
}

impl RecordedRequests {
    fn lock(&self) -> MutexGuard<'_, Vec<AnnotationRequest>> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn push(&self, request: AnnotationRequest) {
        self.lock().push(request);
    }

    /// Number of requests received
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Most recent request
    pub fn last(&self) -> Option<AnnotationRequest> {
        self.lock().last().cloned()
    }

    /// Snapshot of all requests
    pub fn all(&self) -> Vec<AnnotationRequest> {
        self.lock().clone()
    }
}

/// Release handle for a gated [`FakeTransport`]
#[derive(Debug, Clone, Default)]
pub struct FakeGate {
    state: Arc<(Mutex<bool>, Condvar)>,
}

impl FakeGate {
    /// Let all pending and future calls through
    pub fn release(&self) {
        let (open, signal) = &*self.state;
        *open.lock().unwrap_or_else(|p| p.into_inner()) = true;
        signal.notify_all();
    }

    fn wait(&self) {
        let (open, signal) = &*self.state;
        let mut guard = open.lock().unwrap_or_else(|p| p.into_inner());
        while !*guard {
            guard = signal.wait(guard).unwrap_or_else(|p| p.into_inner());
        }
    }
}

/// Fake transport for testing (uses fixture responses)
///
/// Responses are served in order; the last one repeats.
#[derive(Debug)]
pub struct FakeTransport {
    responses: Mutex<Vec<FakeResponse>>,
    requests: RecordedRequests,
    gate: Option<FakeGate>,
}

impl FakeTransport {
    /// Fake returning a 2xx with `body`
    pub fn new(body: &str) -> Self {
        Self::with_response(FakeResponse::Body(body.to_string()))
    }

    /// Fake returning a non-2xx status
    pub fn with_status(status: u16) -> Self {
        Self::with_response(FakeResponse::Status(status))
    }

    /// Fake returning a network error
    pub fn with_error(msg: &str) -> Self {
        Self::with_response(FakeResponse::NetworkError(msg.to_string()))
    }

    pub fn with_response(response: FakeResponse) -> Self {
        Self::with_sequence(vec![response])
    }

    /// Fake serving `responses` in order, repeating the last one
    pub fn with_sequence(responses: Vec<FakeResponse>) -> Self {
        Self {
            responses: Mutex::new(responses),
            requests: RecordedRequests::default(),
            gate: None,
        }
    }

    fn next_response(&self) -> FakeResponse {
        let mut responses = self.responses.lock().unwrap_or_else(|p| p.into_inner());
        match responses.len() {
            0 => FakeResponse::NetworkError("no fake response configured".to_string()),
            1 => responses[0].clone(),
            _ => responses.remove(0),
        }
    }

    /// Hold every call until the returned gate is released
    pub fn gated(mut self) -> (Self, FakeGate) {
        let gate = FakeGate::default();
        self.gate = Some(gate.clone());
        (self, gate)
    }

    /// Handle to the request log (stays valid after the fake is moved)
    pub fn requests(&self) -> RecordedRequests {
        self.requests.clone()
    }
}

impl SyncTransport for FakeTransport {
    fn post_form(&self, request: &AnnotationRequest) -> Result<String, AnnotateError> {
        self.requests.push(request.clone());

        if let Some(gate) = &self.gate {
            gate.wait();
        }

        match self.next_response() {
            FakeResponse::Body(body) => Ok(body),
            FakeResponse::Status(status) => Err(AnnotateError::Service {
                status,
                message: format!("HTTP {}", status),
            }),
            FakeResponse::NetworkError(msg) => Err(AnnotateError::Transport(msg)),
            FakeResponse::Panic => panic!("fake transport panicked"),
        }
    }
}
