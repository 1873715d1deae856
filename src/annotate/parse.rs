//! Response body parsing
//!
//! The service body is untrusted: anything that is not an array of
//! well-formed annotations is rejected as a whole.

use crate::annotate::error::AnnotateError;
use crate::annotate::types::AnnotationResult;

/// Parse a service response body into annotation results
pub fn parse_annotations(body: &str) -> Result<Vec<AnnotationResult>, AnnotateError> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return Err(AnnotateError::Parse("empty response body".to_string()));
    }

    let results: Vec<AnnotationResult> = serde_json::from_str(trimmed)?;

    for (index, result) in results.iter().enumerate() {
        for evidence in &result.evidence {
            if evidence.concept_info.cui.trim().is_empty() {
                return Err(AnnotateError::Parse(format!(
                    "result {} ('{}') has evidence without a CUI",
                    index, result.matched_text
                )));
            }
        }
    }

    Ok(results)
}
