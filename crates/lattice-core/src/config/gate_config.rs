use serde::{Deserialize, Serialize};

use super::defaults;

/// Passage-gate configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GateConfig {
    /// Target number of passages to keep.
    pub top_k: usize,
    /// Minimum question/passage overlap score to qualify.
    pub min_overlap: f64,
    /// Whether to run MMR diversity selection.
    pub diversify: bool,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            top_k: defaults::DEFAULT_GATE_TOP_K,
            min_overlap: defaults::DEFAULT_GATE_MIN_OVERLAP,
            diversify: defaults::DEFAULT_GATE_DIVERSIFY,
        }
    }
}
