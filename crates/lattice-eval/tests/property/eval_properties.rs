//! Property tests: every proxy score stays in the unit interval and never
//! panics, whatever the input.

use lattice_eval::{coherence_score, coverage_score, faithfulness_score, insight_depth_score};
use proptest::prelude::*;

fn unit(x: f64) -> bool {
    (0.0..=1.0).contains(&x)
}

proptest! {
    #[test]
    fn faithfulness_stays_in_unit_interval(
        answer in ".{0,200}",
        passages in prop::collection::vec(".{0,120}", 0..6),
    ) {
        prop_assert!(unit(faithfulness_score(&answer, &passages)));
    }

    #[test]
    fn coverage_stays_in_unit_interval(
        question in ".{0,80}",
        answer in ".{0,200}",
        sub_tasks in prop::collection::vec(".{0,40}", 0..6),
    ) {
        prop_assert!(unit(coverage_score(&question, &answer, &sub_tasks)));
    }

    #[test]
    fn coherence_stays_in_unit_interval(answer in ".{0,400}") {
        prop_assert!(unit(coherence_score(&answer)));
    }

    #[test]
    fn insight_depth_stays_in_unit_interval(answer in ".{0,400}") {
        prop_assert!(unit(insight_depth_score(&answer)));
    }
}

#[test]
fn empty_inputs_score_zero_everywhere() {
    assert_eq!(faithfulness_score("", &[]), 0.0);
    assert_eq!(coverage_score("", "", &[]), 0.0);
    assert_eq!(coherence_score(""), 0.0);
    assert_eq!(insight_depth_score(""), 0.0);
}
