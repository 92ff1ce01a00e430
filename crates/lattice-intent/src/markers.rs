//! Deterministic keyword markers that override model classification.

use lattice_core::Intent;

/// Marker tables checked in fixed precedence order. A question mentioning
/// concepts wins over one mentioning a gap, and so on down the list; the
/// model's opinion only stands when no marker fires.
const MARKER_TABLE: &[(Intent, &[&str])] = &[
    (
        Intent::Concepts,
        &["concept", "definition", "define", "terminology", "taxonomy"],
    ),
    (
        Intent::Gap,
        &["limitation", "limit", "gap", "future work", "open problem", "unexplored"],
    ),
    (
        Intent::Comparison,
        &["compare", "comparison", "difference", "versus", " vs ", "vs.", "better than"],
    ),
    (
        Intent::DeepAnalysis,
        &["analyze", "analysis", "insight", "in depth", "in-depth", "deep dive"],
    ),
    (
        Intent::Summary,
        &["summarize", "summary", "overview", "main findings", "key points"],
    ),
];

/// Return the highest-precedence intent whose markers appear in the question,
/// or `None` when no marker fires.
pub fn marker_override(question: &str) -> Option<Intent> {
    let low = question.to_lowercase();
    for (intent, markers) in MARKER_TABLE {
        if markers.iter().any(|m| low.contains(m)) {
            return Some(*intent);
        }
    }
    None
}
