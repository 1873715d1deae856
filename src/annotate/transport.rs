//! HTTP transport for the annotation client
//!
//! Uses ureq for blocking I/O; a fixture-backed fake stands in for tests.

pub use crate::annotate::transport_fake::{FakeGate, FakeResponse, FakeTransport, RecordedRequests};
pub use crate::annotate::transport_types::{AnnotateError, SyncTransport};
pub use crate::annotate::transport_ureq::UreqTransport;

use crate::annotate::request::AnnotationRequest;
use crate::config::ServiceConfig;

/// Concrete transport enum
///
/// Wraps all transport types, avoiding dyn compatibility issues.
#[derive(Debug)]
pub enum Transport {
    Real(UreqTransport),
    Fake(FakeTransport),
}

impl Transport {
    /// Real transport honoring the configured timeout
    pub fn from_config(config: &ServiceConfig) -> Self {
        Transport::Real(UreqTransport::with_timeout(config.timeout_secs))
    }
}

impl SyncTransport for Transport {
    fn post_form(&self, request: &AnnotationRequest) -> Result<String, AnnotateError> {
        match self {
            Transport::Real(t) => t.post_form(request),
            Transport::Fake(t) => t.post_form(request),
        }
    }
}

impl Default for Transport {
    fn default() -> Self {
        Transport::Real(UreqTransport::new())
    }
}

impl From<FakeTransport> for Transport {
    fn from(fake: FakeTransport) -> Self {
        Transport::Fake(fake)
    }
}

impl From<UreqTransport> for Transport {
    fn from(real: UreqTransport) -> Self {
        Transport::Real(real)
    }
}
