use serde::{Deserialize, Serialize};

/// Per-dimension proxy scores, each in [0, 1].
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Scores {
    pub faithfulness: f64,
    pub coverage: f64,
    pub coherence: f64,
    pub insight_depth: f64,
}

/// Result of one evaluation pass over a produced answer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationResult {
    pub scores: Scores,
    /// Weighted mean of the four scores, rounded to 3 decimals.
    pub global_score: f64,
    /// Issues raised by the optional critique pass.
    #[serde(default)]
    pub issues: Vec<String>,
    /// Recommendations raised by the optional critique pass.
    #[serde(default)]
    pub recommendations: Vec<String>,
}
