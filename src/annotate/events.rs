//! Annotation worker events
//!
//! Sent from the background worker to the UI thread via mpsc::channel.
//! Every event names the request it belongs to so stale outcomes can be
//! dropped.

use crate::annotate::error::AnnotateError;
use crate::annotate::types::AnnotationResult;
use std::sync::mpsc;

/// Channel sender for annotation events
pub type AnnotateSender = mpsc::Sender<AnnotateEvent>;
/// Channel receiver for annotation events
pub type AnnotateReceiver = mpsc::Receiver<AnnotateEvent>;

/// Terminal outcome of one submission
#[derive(Debug, Clone, PartialEq)]
pub enum AnnotateEvent {
    /// Service answered with a parsed result list
    Completed {
        request_id: u64,
        results: Vec<AnnotationResult>,
    },
    /// Submission failed (transport, service or parse)
    Failed { request_id: u64, error: AnnotateError },
}

impl AnnotateEvent {
    /// Build the event for a client outcome
    pub fn from_outcome(
        request_id: u64,
        outcome: Result<Vec<AnnotationResult>, AnnotateError>,
    ) -> Self {
        match outcome {
            Ok(results) => AnnotateEvent::Completed {
                request_id,
                results,
            },
            Err(error) => AnnotateEvent::Failed { request_id, error },
        }
    }

    /// Request this event belongs to
    pub fn request_id(&self) -> u64 {
        match self {
            AnnotateEvent::Completed { request_id, .. } => *request_id,
            AnnotateEvent::Failed { request_id, .. } => *request_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_outcome() {
        let ok = AnnotateEvent::from_outcome(3, Ok(Vec::new()));
        assert!(matches!(ok, AnnotateEvent::Completed { request_id: 3, .. }));

        let err = AnnotateEvent::from_outcome(4, Err(AnnotateError::Parse("bad".to_string())));
        assert_eq!(err.request_id(), 4);
        assert!(matches!(err, AnnotateEvent::Failed { .. }));
    }
}
