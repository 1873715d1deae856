//! Annotation request construction
//!
//! Builds the form-encoded POST the service expects. The API key goes either
//! into the form body or the query string, per [`KeyPlacement`].

use crate::config::{KeyPlacement, ServiceConfig};

/// Form field carrying the user's text
pub const FIELD_INPUT_TEXT: &str = "inputtext";
/// Form field naming the document format
pub const FIELD_DOC_FORMAT: &str = "docformat";
/// Form field naming the result format
pub const FIELD_RESULT_FORMAT: &str = "resultformat";

/// Fields every request carries; the key field may not reuse them
pub const RESERVED_FIELDS: [&str; 3] = [FIELD_INPUT_TEXT, FIELD_DOC_FORMAT, FIELD_RESULT_FORMAT];

/// Only free-text documents are submitted
pub const DOC_FORMAT_FREETEXT: &str = "freetext";
/// Results are always requested as JSON
pub const RESULT_FORMAT_JSON: &str = "json";

/// Fully built request, independent of the HTTP client
#[derive(Clone, PartialEq, Eq)]
pub struct AnnotationRequest {
    pub url: String,
    pub query: Vec<(String, String)>,
    pub headers: Vec<(String, String)>,
    pub form: Vec<(String, String)>,
}

impl AnnotationRequest {
    /// Build the request for `text` (sent as-is, untrimmed)
    pub fn build(config: &ServiceConfig, api_key: &str, text: &str) -> Self {
        let mut query = Vec::new();
        let mut form = vec![
            (FIELD_INPUT_TEXT.to_string(), text.to_string()),
            (FIELD_DOC_FORMAT.to_string(), DOC_FORMAT_FREETEXT.to_string()),
            (FIELD_RESULT_FORMAT.to_string(), RESULT_FORMAT_JSON.to_string()),
        ];

        let key = (config.key_field.clone(), api_key.to_string());
        match config.key_placement {
            KeyPlacement::Body => form.push(key),
            KeyPlacement::Query => query.push(key),
        }

        Self {
            url: config.endpoint.clone(),
            query,
            headers: vec![("Accept".to_string(), "application/json".to_string())],
            form,
        }
    }

    /// Value of a form field
    pub fn form_value(&self, name: &str) -> Option<&str> {
        lookup(&self.form, name)
    }

    /// Value of a query parameter
    pub fn query_value(&self, name: &str) -> Option<&str> {
        lookup(&self.query, name)
    }

    /// Value of a header (case-insensitive name)
    pub fn header_value(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Length of the submitted text in characters
    pub fn input_chars(&self) -> usize {
        self.form_value(FIELD_INPUT_TEXT)
            .map(|t| t.chars().count())
            .unwrap_or(0)
    }
}

fn lookup<'a>(pairs: &'a [(String, String)], name: &str) -> Option<&'a str> {
    pairs
        .iter()
        .find(|(k, _)| k == name)
        .map(|(_, v)| v.as_str())
}

// Never print the clinical text or the key.
impl std::fmt::Debug for AnnotationRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names = |pairs: &[(String, String)]| -> Vec<String> {
            pairs.iter().map(|(k, _)| k.clone()).collect()
        };
        f.debug_struct("AnnotationRequest")
            .field("url", &self.url)
            .field("query", &names(&self.query))
            .field("headers", &self.headers)
            .field("form", &names(&self.form))
            .field("input_chars", &self.input_chars())
            .finish()
    }
}
