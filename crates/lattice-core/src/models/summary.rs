use serde::{Deserialize, Serialize};

/// Output of the summarize stage.
///
/// `citations` index into the passage window the prompt was built over.
/// A non-grounded fallback answer always carries an empty citation list.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SummaryOutcome {
    pub answer: String,
    #[serde(default)]
    pub highlights: Vec<String>,
    #[serde(default)]
    pub citations: Vec<usize>,
}
