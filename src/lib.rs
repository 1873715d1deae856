//! clinical-ner: clinical named-entity extraction client
//!
//! Submits free-text clinical notes to a MetaMapLite-style annotation
//! service and renders the returned concepts, either in a terminal form or
//! as one-shot CLI output.

pub mod annotate;
pub mod cli;
pub mod config;
pub mod logging;
pub mod ui;

// Re-export the client surface for convenience
pub use annotate::{
    AnnotateError, AnnotationClient, AnnotationResult, ConceptInfo, Evidence, FakeTransport,
    Transport, UreqTransport,
};
pub use config::{AppConfig, KeyPlacement, ServiceConfig};
pub use ui::{App, RequestState, SubmitError};
