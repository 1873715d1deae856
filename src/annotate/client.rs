//! Annotation client
//!
//! One call = one request: validate the text, build the form, send it
//! through the transport, parse the body. No retries.

use crate::annotate::error::AnnotateError;
use crate::annotate::parse::parse_annotations;
use crate::annotate::request::AnnotationRequest;
use crate::annotate::transport::{SyncTransport, Transport};
use crate::annotate::types::AnnotationResult;
use crate::config::ServiceConfig;
use std::time::Instant;
use tracing::{info, warn};

/// Client for the clinical annotation service
pub struct AnnotationClient {
    config: ServiceConfig,
    api_key: String,
    transport: Transport,
}

impl AnnotationClient {
    /// Create a client over `transport`
    ///
    /// Fails with [`AnnotateError::Configuration`] when no API key is
    /// configured or the service settings are invalid.
    pub fn new(config: ServiceConfig, transport: impl Into<Transport>) -> Result<Self, AnnotateError> {
        config
            .validate()
            .map_err(|e| AnnotateError::Configuration(e.to_string()))?;

        let api_key = config
            .api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| {
                AnnotateError::Configuration(format!(
                    "no API key configured; set service.api_key in config.toml or {}",
                    crate::config::ENV_API_KEY
                ))
            })?;

        Ok(Self {
            config,
            api_key,
            transport: transport.into(),
        })
    }

    /// Create a client with the real HTTP transport
    pub fn from_config(config: ServiceConfig) -> Result<Self, AnnotateError> {
        let transport = Transport::from_config(&config);
        Self::new(config, transport)
    }

    /// Service settings in use
    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    /// Build the request that [`annotate`](Self::annotate) would send
    pub fn build_request(&self, text: &str) -> AnnotationRequest {
        AnnotationRequest::build(&self.config, &self.api_key, text)
    }

    /// Submit `text` and return the parsed annotations
    ///
    /// Whitespace-only text is rejected before any request is made.
    pub fn annotate(&self, text: &str) -> Result<Vec<AnnotationResult>, AnnotateError> {
        if text.trim().is_empty() {
            return Err(AnnotateError::EmptyInput);
        }

        let request = self.build_request(text);
        let started = Instant::now();
        info!(
            endpoint = %self.config.endpoint,
            input_chars = request.input_chars(),
            "submitting annotation request"
        );

        let outcome = self
            .transport
            .post_form(&request)
            .and_then(|body| parse_annotations(&body));

        let elapsed_ms = started.elapsed().as_millis() as u64;
        match &outcome {
            Ok(results) => info!(results = results.len(), elapsed_ms, "annotation succeeded"),
            Err(err) => warn!(kind = err.kind(), error = %err, elapsed_ms, "annotation failed"),
        }
        outcome
    }
}

impl std::fmt::Debug for AnnotationClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnnotationClient")
            .field("config", &self.config)
            .field("transport", &self.transport)
            .finish_non_exhaustive()
    }
}
