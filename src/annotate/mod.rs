//! Clinical annotation service integration
//!
//! - `types`: typed response model
//! - `request`/`parse`: wire format in and out
//! - `transport*`: HTTP (ureq) and fixture transports behind [`SyncTransport`]
//! - `client`: one validated request per call
//! - `worker`/`events`: background thread reporting over mpsc
//! - `display`: plain-text result cards

pub mod client;
pub mod display;
pub mod error;
pub mod events;
pub mod parse;
pub mod request;
pub mod transport;
pub mod transport_fake;
pub mod transport_types;
pub mod transport_ureq;
pub mod types;
pub mod worker;

// Re-exports
pub use client::AnnotationClient;
pub use error::AnnotateError;
pub use events::{AnnotateEvent, AnnotateReceiver, AnnotateSender};
pub use parse::parse_annotations;
pub use request::AnnotationRequest;
pub use transport::{FakeGate, FakeResponse, FakeTransport, SyncTransport, Transport, UreqTransport};
pub use types::{AnnotationResult, ConceptInfo, Evidence};
pub use worker::{spawn_annotate_worker, AnnotateWorkerHandle};
