//! The classifier: optional model pass, deterministic overrides on top.

use std::sync::Arc;
use std::time::Duration;

use lattice_core::llm_json::{string_list, LlmJson};
use lattice_core::traits::ITextCompletion;
use lattice_core::Intent;
use tracing::{debug, warn};

use crate::markers::marker_override;
use crate::subtasks::{default_sub_tasks, normalize_sub_tasks};

const CLASSIFY_TEMPERATURE: f64 = 0.0;

/// Final classification handed to the orchestrator.
#[derive(Debug, Clone, PartialEq)]
pub struct IntentResult {
    pub intent: Intent,
    pub sub_tasks: Vec<String>,
}

/// Classifies questions. The model pass is optional; marker overrides and
/// sub-task normalization run either way, so two identical questions always
/// classify identically once the model output is fixed.
pub struct IntentClassifier {
    llm: Option<Arc<dyn ITextCompletion>>,
    timeout: Duration,
}

impl IntentClassifier {
    pub fn new(llm: Option<Arc<dyn ITextCompletion>>, timeout: Duration) -> Self {
        IntentClassifier { llm, timeout }
    }

    /// Marker-only classifier, no model pass.
    pub fn deterministic() -> Self {
        IntentClassifier {
            llm: None,
            timeout: Duration::ZERO,
        }
    }

    pub fn classify(&self, question: &str) -> IntentResult {
        let (model_intent, model_tasks) = self.model_pass(question);

        let intent = match marker_override(question) {
            Some(marked) => {
                if model_intent.is_some_and(|m| m != marked) {
                    debug!(%marked, "marker overrode model intent");
                }
                marked
            }
            None => model_intent.unwrap_or_default(),
        };

        let mut sub_tasks = normalize_sub_tasks(intent, &model_tasks);
        if sub_tasks.is_empty() {
            sub_tasks = default_sub_tasks(intent);
        }

        IntentResult { intent, sub_tasks }
    }

    /// Ask the model for an intent and sub-tasks. Any failure, transport or
    /// parse, yields nothing; classification falls back to markers.
    fn model_pass(&self, question: &str) -> (Option<Intent>, Vec<String>) {
        let Some(llm) = &self.llm else {
            return (None, Vec::new());
        };

        let prompt = build_classify_prompt(question);
        let raw = match llm.complete(&prompt, CLASSIFY_TEMPERATURE, self.timeout) {
            Ok(raw) => raw,
            Err(err) => {
                warn!(provider = llm.name(), %err, "intent model pass failed, using markers");
                return (None, Vec::new());
            }
        };

        match LlmJson::parse(&raw).into_value() {
            Some(v) => {
                let intent = v
                    .get("intent")
                    .and_then(|i| i.as_str())
                    .map(Intent::parse_lenient);
                (intent, string_list(&v, "sub_tasks"))
            }
            None => {
                warn!(provider = llm.name(), "intent reply was not JSON, using markers");
                (None, Vec::new())
            }
        }
    }
}

fn build_classify_prompt(question: &str) -> String {
    format!(
        "Classify the research question and decompose it into at most 6 short\n\
         imperative sub-tasks (8 words each at most).\n\
         Valid intents: summary, comparison, concepts, gap, deep_analysis, other.\n\n\
         Question:\n{question}\n\n\
         Return JSON ONLY:\n\
         {{\n  \"intent\": \"summary\",\n  \"sub_tasks\": [\"...\"]\n}}"
    )
}
