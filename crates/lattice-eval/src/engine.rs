//! Score aggregation and the evaluation entry point.

use std::sync::Arc;
use std::time::Duration;

use lattice_core::models::{EvaluationResult, Scores};
use lattice_core::traits::ITextCompletion;
use tracing::info;

use crate::critique::run_critique;
use crate::scores::{coherence_score, coverage_score, faithfulness_score, insight_depth_score};

const WEIGHT_FAITHFULNESS: f64 = 0.40;
const WEIGHT_COVERAGE: f64 = 0.25;
const WEIGHT_COHERENCE: f64 = 0.20;
const WEIGHT_INSIGHT: f64 = 0.15;

/// Scores an answer with the four deterministic proxies and, when asked,
/// runs the critique pass for issues/recommendations.
pub struct Evaluator {
    llm: Arc<dyn ITextCompletion>,
    timeout: Duration,
}

impl Evaluator {
    pub fn new(llm: Arc<dyn ITextCompletion>, timeout: Duration) -> Self {
        Evaluator { llm, timeout }
    }

    pub fn evaluate(
        &self,
        question: &str,
        answer: &str,
        passages: &[String],
        sub_tasks: &[String],
        with_critique: bool,
    ) -> EvaluationResult {
        let scores = Scores {
            faithfulness: faithfulness_score(answer, passages),
            coverage: coverage_score(question, answer, sub_tasks),
            coherence: coherence_score(answer),
            insight_depth: insight_depth_score(answer),
        };
        let global_score = global_score(&scores);

        let (issues, recommendations) = if with_critique {
            run_critique(self.llm.as_ref(), question, answer, self.timeout)
        } else {
            (Vec::new(), Vec::new())
        };

        info!(
            faithfulness = scores.faithfulness,
            coverage = scores.coverage,
            coherence = scores.coherence,
            insight_depth = scores.insight_depth,
            global_score,
            "answer evaluated"
        );

        EvaluationResult {
            scores,
            global_score,
            issues,
            recommendations,
        }
    }
}

/// Weighted mean of the four scores, rounded to 3 decimals.
pub fn global_score(scores: &Scores) -> f64 {
    let weighted = WEIGHT_FAITHFULNESS * scores.faithfulness
        + WEIGHT_COVERAGE * scores.coverage
        + WEIGHT_COHERENCE * scores.coherence
        + WEIGHT_INSIGHT * scores.insight_depth;
    (weighted * 1000.0).round() / 1000.0
}
