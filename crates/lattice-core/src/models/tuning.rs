use serde::{Deserialize, Serialize};

/// Adjustable per-run parameter set.
///
/// A retry never mutates the tuning of a finished run; it is seeded with a
/// patched copy (see `TuningPatch::apply`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Retrieval depth. Policies keep this within [0, 12].
    pub top_k: usize,
    /// Minimum question/passage token overlap for the passage gate.
    pub min_overlap: f64,
    /// LLM sampling temperature. Policies keep this >= 0.05.
    pub temperature: f64,
    /// Whether the evaluator runs the LLM critique pass.
    pub critique_enabled: bool,
    /// Whether the concepts stage commits to the persistent graph.
    pub graph_update_enabled: bool,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            top_k: 6,
            min_overlap: 1.0,
            temperature: 0.2,
            critique_enabled: true,
            graph_update_enabled: true,
        }
    }
}
