//! Property tests for the shared data model and defensive JSON parsing.

use lattice_core::llm_json::LlmJson;
use lattice_core::models::{Tuning, TuningPatch};
use proptest::prelude::*;

fn arb_patch() -> impl Strategy<Value = TuningPatch> {
    (
        prop::option::of(0usize..16),
        prop::option::of(0.0f64..4.0),
        prop::option::of(0.0f64..1.5),
        prop::option::of(any::<bool>()),
        prop::option::of(any::<bool>()),
    )
        .prop_map(
            |(top_k, min_overlap, temperature, critique_enabled, graph_update_enabled)| {
                TuningPatch {
                    top_k,
                    min_overlap,
                    temperature,
                    critique_enabled,
                    graph_update_enabled,
                }
            },
        )
}

proptest! {
    #[test]
    fn applying_a_patch_twice_equals_applying_it_once(patch in arb_patch()) {
        let mut once = Tuning::default();
        patch.apply(&mut once);

        let mut twice = once.clone();
        patch.apply(&mut twice);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn patched_fields_take_and_unset_fields_keep(patch in arb_patch()) {
        let before = Tuning::default();
        let mut after = before.clone();
        patch.apply(&mut after);

        prop_assert_eq!(after.top_k, patch.top_k.unwrap_or(before.top_k));
        prop_assert_eq!(
            after.critique_enabled,
            patch.critique_enabled.unwrap_or(before.critique_enabled)
        );
        prop_assert_eq!(
            after.graph_update_enabled,
            patch.graph_update_enabled.unwrap_or(before.graph_update_enabled)
        );
    }

    #[test]
    fn llm_json_parse_never_panics(raw in ".{0,400}") {
        let _ = LlmJson::parse(&raw);
    }

    #[test]
    fn json_wrapped_in_noise_is_still_salvaged(payload in "[a-z]{1,12}") {
        let wrapped = format!("model said: {{\"k\": \"{payload}\"}} hope that helps");
        let v = LlmJson::parse(&wrapped).into_value().unwrap();
        prop_assert_eq!(v["k"].as_str(), Some(payload.as_str()));
    }
}
