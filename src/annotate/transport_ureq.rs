//! Real HTTP transport using ureq
//!
//! Synchronous blocking HTTP client, one call per submission.

use crate::annotate::request::AnnotationRequest;
use crate::annotate::transport_types::{AnnotateError, SyncTransport};
use crate::config::DEFAULT_TIMEOUT_SECS;
use std::time::Duration;
use tracing::debug;

/// Real HTTP transport using ureq
#[derive(Debug)]
pub struct UreqTransport {
    /// Timeout in seconds for the whole request
    timeout: u64,
}

impl UreqTransport {
    /// Create new transport with default timeout (30s)
    pub fn new() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Create transport with custom timeout
    pub fn with_timeout(timeout_secs: u64) -> Self {
        Self {
            timeout: timeout_secs,
        }
    }

    /// Configured timeout
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl SyncTransport for UreqTransport {
    fn post_form(&self, request: &AnnotationRequest) -> Result<String, AnnotateError> {
        debug!(
            url = %request.url,
            timeout_secs = self.timeout,
            input_chars = request.input_chars(),
            "POST annotation request"
        );

        let mut http = ureq::post(&request.url).timeout(self.timeout());
        for (key, value) in &request.query {
            http = http.query(key, value);
        }
        for (key, value) in &request.headers {
            http = http.set(key, value);
        }

        let form: Vec<(&str, &str)> = request
            .form
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();

        // 4xx/5xx come back as ureq::Error::Status and map to Service.
        let response = http.send_form(&form)?;

        let status = response.status();
        debug!(status, "annotation response received");
        if !(200..300).contains(&status) {
            return Err(AnnotateError::Service {
                status,
                message: format!("HTTP {}", status),
            });
        }

        let body = response.into_string()?;
        Ok(body)
    }
}
