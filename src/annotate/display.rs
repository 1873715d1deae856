//! Result rendering helpers
//!
//! Plain-text form of the result cards. The TUI styles the same labels;
//! the `annotate` subcommand prints [`format_results`] directly.

use crate::annotate::types::{AnnotationResult, ConceptInfo};

/// Shown when there are no results and no error
pub const EMPTY_RESULTS_PLACEHOLDER: &str =
    "No results to display. Enter clinical text and click \"Extract Entities\" to begin.";

/// `start-end` label for a result span
pub fn position_label(result: &AnnotationResult) -> String {
    format!("{}-{}", result.start, result.end_offset())
}

/// Semantic types joined for display
pub fn semantic_types_label(concept: &ConceptInfo) -> String {
    concept.semantic_types.join(", ")
}

/// Labelled rows for one evidence entry, in display order
pub fn evidence_rows(result: &AnnotationResult, concept: &ConceptInfo) -> [(&'static str, String); 4] {
    [
        ("CUI", concept.cui.clone()),
        ("Name", concept.preferred_name.clone()),
        ("Position", position_label(result)),
        ("Semantic Types", semantic_types_label(concept)),
    ]
}

/// Render all result cards as plain text
pub fn format_results(results: &[AnnotationResult]) -> String {
    if results.is_empty() {
        return format!("{}\n", EMPTY_RESULTS_PLACEHOLDER);
    }

    let mut out = String::new();
    for (index, result) in results.iter().enumerate() {
        if index > 0 {
            out.push('\n');
        }
        out.push_str(&result.matched_text);
        out.push('\n');
        for evidence in &result.evidence {
            for (label, value) in evidence_rows(result, &evidence.concept_info) {
                out.push_str(&format!("  {}: {}\n", label, value));
            }
        }
    }
    out
}
