use serde::{Deserialize, Serialize};

use crate::intent::Intent;

use super::{
    AdaptationAction, EvaluationResult, GraphUpdateOutcome, InsightOutcome, Passage,
    SummaryOutcome, Tuning,
};

/// Aggregate state of one pipeline run.
///
/// One instance per run; a retry creates a fresh state seeded with patched
/// tuning and `retry_count + 1`. Stages fill their own fields and never
/// overwrite earlier ones.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineState {
    pub question: String,

    pub intent: Option<Intent>,
    #[serde(default)]
    pub sub_tasks: Vec<String>,

    #[serde(default)]
    pub passages: Vec<Passage>,
    pub summary: Option<SummaryOutcome>,
    /// Concept labels extracted by the concepts branch.
    #[serde(default)]
    pub concepts: Vec<String>,
    /// Commit counts when the concepts branch updated the shared graph.
    pub graph_update: Option<GraphUpdateOutcome>,
    /// Quality-gate issues, populated whether or not the candidate was accepted.
    #[serde(default)]
    pub graph_issues: Vec<String>,
    pub insight: Option<InsightOutcome>,

    pub evaluation: Option<EvaluationResult>,
    pub final_answer: Option<String>,

    pub tuning: Tuning,
    pub retry_count: u32,
    pub can_retry: bool,
    #[serde(default)]
    pub adaptation_actions: Vec<AdaptationAction>,

    /// Wall-clock latency of the run, set before the adapt stage.
    pub latency_ms: Option<u64>,
}

impl PipelineState {
    pub fn new(question: impl Into<String>, tuning: Tuning, retry_count: u32) -> Self {
        Self {
            question: question.into(),
            intent: None,
            sub_tasks: Vec::new(),
            passages: Vec::new(),
            summary: None,
            concepts: Vec::new(),
            graph_update: None,
            graph_issues: Vec::new(),
            insight: None,
            evaluation: None,
            final_answer: None,
            tuning,
            retry_count,
            can_retry: false,
            adaptation_actions: Vec::new(),
            latency_ms: None,
        }
    }

    /// The intent to route on; unresolved intent falls back to summary.
    pub fn routing_intent(&self) -> Intent {
        self.intent.unwrap_or(Intent::Summary)
    }
}
