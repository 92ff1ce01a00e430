//! The rule table. Rules fire independently; each appends one named action.

use lattice_core::constants::{
    LATENCY_GUARD_MS, TEMPERATURE_FLOOR, TEMPERATURE_STEP, TOP_K_CEILING, TOP_K_INTENT_BOOST,
    TOP_K_RETRY_STEP,
};
use lattice_core::models::{
    AdaptationAction, AdaptationDecision, EvaluationResult, Tuning, TuningPatch,
};
use lattice_core::Intent;
use tracing::info;

const COVERAGE_FLOOR: f64 = 0.55;
const GLOBAL_FLOOR: f64 = 0.55;
const FAITHFULNESS_FLOOR: f64 = 0.60;
const COHERENCE_FLOOR: f64 = 0.55;

/// Compute adaptation recommendations for a finished run.
///
/// Pure function of its inputs. Without an evaluation there is nothing to
/// adapt to and the decision is a no-op. `retry_with` is only populated when
/// weak coverage recommends rerunning with deeper retrieval.
pub fn decide(
    intent: Intent,
    tuning: &Tuning,
    evaluation: Option<&EvaluationResult>,
    latency_ms: Option<u64>,
) -> AdaptationDecision {
    let Some(evaluation) = evaluation else {
        return AdaptationDecision::no_op(tuning.clone());
    };

    let mut decision = AdaptationDecision::no_op(tuning.clone());
    let scores = &evaluation.scores;

    if latency_ms.is_some_and(|ms| ms > LATENCY_GUARD_MS) && tuning.critique_enabled {
        decision.actions.push(AdaptationAction::new(
            "disable_llm_critique",
            "High latency detected; disabling critique for speed.",
            TuningPatch {
                critique_enabled: Some(false),
                ..TuningPatch::default()
            },
        ));
    }

    if scores.coverage < COVERAGE_FLOOR {
        let new_top_k = (tuning.top_k + TOP_K_RETRY_STEP).min(TOP_K_CEILING);
        if new_top_k != tuning.top_k {
            decision.actions.push(AdaptationAction::new(
                "increase_top_k",
                format!(
                    "Coverage low ({:.2}); expanding retrieval context.",
                    scores.coverage
                ),
                TuningPatch {
                    top_k: Some(new_top_k),
                    ..TuningPatch::default()
                },
            ));
        }
        decision.should_retry = true;
        let mut retry = tuning.clone();
        retry.top_k = new_top_k;
        decision.retry_with = Some(retry);
    }

    if evaluation.global_score < GLOBAL_FLOOR {
        decision.should_retry = true;
    }

    if scores.faithfulness < FAITHFULNESS_FLOOR {
        let new_temp = (tuning.temperature - TEMPERATURE_STEP).max(TEMPERATURE_FLOOR);
        decision.actions.push(AdaptationAction::new(
            "reduce_temperature",
            format!(
                "Faithfulness low ({:.2}); reducing temperature.",
                scores.faithfulness
            ),
            TuningPatch {
                temperature: Some(new_temp),
                ..TuningPatch::default()
            },
        ));
        decision.actions.push(AdaptationAction::new(
            "enable_llm_critique",
            "Faithfulness low; enabling critique to enforce grounding.",
            TuningPatch {
                critique_enabled: Some(true),
                ..TuningPatch::default()
            },
        ));
    }

    if scores.coherence < COHERENCE_FLOOR {
        decision.actions.push(AdaptationAction::new(
            "enable_llm_critique",
            format!("Coherence low ({:.2}); enabling critique for structure.", scores.coherence),
            TuningPatch {
                critique_enabled: Some(true),
                ..TuningPatch::default()
            },
        ));
    }

    if matches!(intent, Intent::Comparison | Intent::Gap) && tuning.top_k < TOP_K_INTENT_BOOST {
        decision.actions.push(AdaptationAction::new(
            "intent_boost_top_k",
            format!("Intent={intent}; boosting retrieval depth."),
            TuningPatch {
                top_k: Some(TOP_K_INTENT_BOOST),
                ..TuningPatch::default()
            },
        ));
    }

    info!(
        %intent,
        actions = decision.actions.len(),
        should_retry = decision.should_retry,
        "adaptation decision"
    );
    decision
}

#[cfg(test)]
mod tests {
    use super::*;
    use lattice_core::models::Scores;

    fn eval(faithfulness: f64, coverage: f64, coherence: f64, insight_depth: f64) -> EvaluationResult {
        let scores = Scores {
            faithfulness,
            coverage,
            coherence,
            insight_depth,
        };
        let global_score = 0.40 * faithfulness + 0.25 * coverage + 0.20 * coherence
            + 0.15 * insight_depth;
        EvaluationResult {
            scores,
            global_score,
            issues: Vec::new(),
            recommendations: Vec::new(),
        }
    }

    fn action_names(d: &AdaptationDecision) -> Vec<&str> {
        d.actions.iter().map(|a| a.name.as_str()).collect()
    }

    #[test]
    fn no_evaluation_is_a_no_op() {
        let d = decide(Intent::Summary, &Tuning::default(), None, Some(20_000));
        assert!(d.actions.is_empty());
        assert!(!d.should_retry);
    }

    #[test]
    fn weak_coverage_expands_retrieval_and_recommends_retry() {
        let d = decide(
            Intent::Summary,
            &Tuning::default(),
            Some(&eval(0.80, 0.40, 0.90, 0.50)),
            None,
        );
        assert_eq!(action_names(&d), vec!["increase_top_k"]);
        assert!(d.should_retry);
        let retry = d.retry_with.expect("retry tuning");
        assert_eq!(retry.top_k, Tuning::default().top_k + TOP_K_RETRY_STEP);
    }

    #[test]
    fn top_k_never_exceeds_the_ceiling() {
        let mut tuning = Tuning::default();
        tuning.top_k = 10;
        let d = decide(Intent::Summary, &tuning, Some(&eval(0.9, 0.3, 0.9, 0.9)), None);
        assert_eq!(d.retry_with.unwrap().top_k, TOP_K_CEILING);

        tuning.top_k = TOP_K_CEILING;
        let d = decide(Intent::Summary, &tuning, Some(&eval(0.9, 0.3, 0.9, 0.9)), None);
        // already at the ceiling: retry still recommended, no action emitted
        assert!(d.should_retry);
        assert!(action_names(&d).is_empty());
        assert_eq!(d.retry_with.unwrap().top_k, TOP_K_CEILING);
    }

    #[test]
    fn weak_faithfulness_cools_sampling_and_enables_critique() {
        let d = decide(
            Intent::Summary,
            &Tuning::default(),
            Some(&eval(0.50, 0.90, 0.90, 0.90)),
            None,
        );
        let names = action_names(&d);
        assert!(names.contains(&"reduce_temperature"));
        assert!(names.contains(&"enable_llm_critique"));
        let temp_action = d.actions.iter().find(|a| a.name == "reduce_temperature").unwrap();
        let expected = Tuning::default().temperature - TEMPERATURE_STEP;
        assert!((temp_action.patch.temperature.unwrap() - expected).abs() < 1e-9);
        assert!(!d.should_retry);
    }

    #[test]
    fn temperature_reduction_respects_the_floor() {
        let mut tuning = Tuning::default();
        tuning.temperature = 0.08;
        let d = decide(Intent::Summary, &tuning, Some(&eval(0.2, 0.9, 0.9, 0.9)), None);
        let temp_action = d.actions.iter().find(|a| a.name == "reduce_temperature").unwrap();
        assert_eq!(temp_action.patch.temperature, Some(TEMPERATURE_FLOOR));
    }

    #[test]
    fn weak_global_score_alone_recommends_retry() {
        // every dimension mediocre but above its own floor
        let d = decide(
            Intent::Summary,
            &Tuning::default(),
            Some(&eval(0.61, 0.56, 0.56, 0.0)),
            None,
        );
        assert!(d.should_retry);
        assert!(d.retry_with.is_none());
    }

    #[test]
    fn high_latency_disables_critique() {
        let d = decide(
            Intent::Summary,
            &Tuning::default(),
            Some(&eval(0.9, 0.9, 0.9, 0.9)),
            Some(LATENCY_GUARD_MS + 1),
        );
        assert_eq!(action_names(&d), vec!["disable_llm_critique"]);
    }

    #[test]
    fn comparison_intent_boosts_shallow_retrieval() {
        let d = decide(
            Intent::Comparison,
            &Tuning::default(),
            Some(&eval(0.9, 0.9, 0.9, 0.9)),
            None,
        );
        let boost = d.actions.iter().find(|a| a.name == "intent_boost_top_k").unwrap();
        assert_eq!(boost.patch.top_k, Some(TOP_K_INTENT_BOOST));

        let mut deep = Tuning::default();
        deep.top_k = 9;
        let d = decide(Intent::Comparison, &deep, Some(&eval(0.9, 0.9, 0.9, 0.9)), None);
        assert!(action_names(&d).is_empty());
    }
}
