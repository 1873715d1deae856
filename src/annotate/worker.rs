//! Annotation worker thread
//!
//! Spawns a fire-and-forget thread for one annotation request.
//! The thread does only network I/O and reports exactly one event, unless
//! it was cancelled first, in which case the outcome is discarded.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use tracing::{debug, error};

use crate::annotate::client::AnnotationClient;
use crate::annotate::events::{AnnotateEvent, AnnotateSender};

/// Active worker handle
#[derive(Debug)]
pub struct AnnotateWorkerHandle {
    handle: Option<JoinHandle<()>>,
    cancelled: Arc<AtomicBool>,
    request_id: u64,
}

impl AnnotateWorkerHandle {
    /// Request this worker serves
    pub fn request_id(&self) -> u64 {
        self.request_id
    }

    /// Check if thread is still running
    pub fn is_running(&self) -> bool {
        self.handle
            .as_ref()
            .map(|h| !h.is_finished())
            .unwrap_or(false)
    }

    /// Discard the outcome when it arrives
    ///
    /// The in-flight HTTP call is not interrupted; it ends at the latest
    /// when the transport timeout fires.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    /// Block until the thread exits
    pub fn join(mut self) -> thread::Result<()> {
        match self.handle.take() {
            Some(handle) => handle.join(),
            None => Ok(()),
        }
    }
}

/// Spawn a background thread submitting `text`
///
/// The worker sends one [`AnnotateEvent`] on `tx` tagged with `request_id`.
pub fn spawn_annotate_worker(
    client: Arc<AnnotationClient>,
    text: String,
    request_id: u64,
    tx: AnnotateSender,
) -> AnnotateWorkerHandle {
    let cancelled = Arc::new(AtomicBool::new(false));
    let cancelled_flag = cancelled.clone();

    let handle = thread::Builder::new()
        .name(format!("annotate-{}", request_id))
        .spawn(move || {
            let outcome = client.annotate(&text);

            if cancelled_flag.load(Ordering::SeqCst) {
                debug!(request_id, "discarding outcome of cancelled request");
                return;
            }

            // Receiver gone means the view was torn down; nothing to update.
            if tx.send(AnnotateEvent::from_outcome(request_id, outcome)).is_err() {
                debug!(request_id, "receiver dropped before outcome was delivered");
            }
        });

    // A worker that never started reports nothing; the controller treats a
    // non-running worker without an event as a transport failure.
    let handle = match handle {
        Ok(handle) => Some(handle),
        Err(err) => {
            error!(request_id, error = %err, "failed to spawn annotation worker");
            None
        }
    };

    AnnotateWorkerHandle {
        handle,
        cancelled,
        request_id,
    }
}
