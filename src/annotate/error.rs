//! Annotation errors
//!
//! Three terminal outcomes of a submission (transport, service, parse) plus
//! two local preconditions. None of them is retried.

/// Annotation errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AnnotateError {
    /// Request could not be sent or no response arrived (DNS, refused, timeout, reset)
    #[error("Transport error: {0}")]
    Transport(String),

    /// Service answered with a non-2xx status
    #[error("Service error: HTTP {status}: {message}")]
    Service { status: u16, message: String },

    /// Body is not JSON or does not match the annotation shape
    #[error("Parse error: {0}")]
    Parse(String),

    /// Input text is empty or whitespace only
    #[error("Input text is empty")]
    EmptyInput,

    /// Client cannot be built from the given configuration
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl AnnotateError {
    /// Single human-readable line shown to the user
    pub fn user_message(&self) -> String {
        match self {
            AnnotateError::Transport(detail) => format!(
                "Could not reach the annotation service ({}). Please try again.",
                detail
            ),
            AnnotateError::Service { status, .. } => format!(
                "The annotation service responded with HTTP {}. Please try again.",
                status
            ),
            AnnotateError::Parse(_) => {
                "The annotation service returned an unreadable response. Please try again."
                    .to_string()
            }
            AnnotateError::EmptyInput => {
                "Enter clinical text before extracting entities.".to_string()
            }
            AnnotateError::Configuration(detail) => format!("Configuration problem: {}", detail),
        }
    }

    /// Short category name (used in logs and JSON output)
    pub fn kind(&self) -> &'static str {
        match self {
            AnnotateError::Transport(_) => "transport",
            AnnotateError::Service { .. } => "service",
            AnnotateError::Parse(_) => "parse",
            AnnotateError::EmptyInput => "empty_input",
            AnnotateError::Configuration(_) => "configuration",
        }
    }
}

impl From<std::io::Error> for AnnotateError {
    fn from(err: std::io::Error) -> Self {
        // Body read failures happen mid-response: the connection broke.
        AnnotateError::Transport(err.to_string())
    }
}

impl From<serde_json::Error> for AnnotateError {
    fn from(err: serde_json::Error) -> Self {
        AnnotateError::Parse(err.to_string())
    }
}

impl From<ureq::Error> for AnnotateError {
    fn from(err: ureq::Error) -> Self {
        match err {
            ureq::Error::Status(code, response) => AnnotateError::Service {
                status: code,
                message: response.status_text().to_string(),
            },
            ureq::Error::Transport(err) => AnnotateError::Transport(transport_detail(&err)),
        }
    }
}

/// Describe a ureq transport failure without its URL
///
/// ureq's `Display` starts with the request URL, whose query string may
/// carry the API key.
fn transport_detail(err: &ureq::Transport) -> String {
    let mut detail = err.kind().to_string();
    if let Some(message) = err.message() {
        detail.push_str(": ");
        detail.push_str(message);
    }
    let mut source = std::error::Error::source(err);
    while let Some(cause) = source {
        detail.push_str(": ");
        detail.push_str(&cause.to_string());
        source = cause.source();
    }
    detail
}
