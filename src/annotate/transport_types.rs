//! Transport types
//!
//! Common trait shared across transport implementations.

pub use crate::annotate::error::AnnotateError;
use crate::annotate::request::AnnotationRequest;

/// Synchronous HTTP transport
///
/// Abstraction over the HTTP client to enable testing with FakeTransport.
pub trait SyncTransport: Send + Sync {
    /// POST a form-encoded request and return the 2xx response body
    ///
    /// Non-2xx statuses map to [`AnnotateError::Service`], connection-level
    /// failures to [`AnnotateError::Transport`].
    fn post_form(&self, request: &AnnotationRequest) -> Result<String, AnnotateError>;
}
