use serde::{Deserialize, Serialize};

/// Output of the insight-synthesis stage.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InsightOutcome {
    pub analysis: String,
    #[serde(default)]
    pub gaps: Vec<String>,
    #[serde(default)]
    pub contradictions: Vec<String>,
    #[serde(default)]
    pub future_directions: Vec<String>,
}
