//! Annotation response model
//!
//! Typed mirror of the service's JSON array. Field names on the wire are
//! all-lowercase (`matchedtext`, `evlist`, `conceptinfo`, ...); unknown
//! fields are ignored so richer service responses still parse.

use serde::{Deserialize, Serialize};

/// One annotated span of the submitted text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotationResult {
    /// Text span as it appears in the input
    #[serde(rename = "matchedtext")]
    pub matched_text: String,
    /// Character offset of the span
    pub start: u64,
    /// Span length in characters
    pub length: u64,
    /// Concepts matched for this span, in service order
    #[serde(rename = "evlist")]
    pub evidence: Vec<Evidence>,
}

impl AnnotationResult {
    /// Exclusive end offset (`start + length`)
    pub fn end_offset(&self) -> u64 {
        self.start.saturating_add(self.length)
    }
}

/// One matched concept for a span
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Evidence {
    #[serde(rename = "conceptinfo")]
    pub concept_info: ConceptInfo,
}

/// Concept identity as reported by the service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConceptInfo {
    /// Concept Unique Identifier
    pub cui: String,
    #[serde(rename = "preferredname")]
    pub preferred_name: String,
    /// Semantic type codes (e.g. `dsyn`, `phsu`)
    #[serde(rename = "semantictypes")]
    pub semantic_types: Vec<String>,
}
