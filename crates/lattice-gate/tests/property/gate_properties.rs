//! Property tests for the passage gate.

use lattice_gate::gate_passages;
use proptest::prelude::*;

fn arb_passages() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[a-z ]{0,60}", 0..12)
}

proptest! {
    #[test]
    fn never_returns_more_than_top_k(
        question in "[a-z ]{0,40}",
        passages in arb_passages(),
        top_k in 0usize..8,
    ) {
        let out = gate_passages(&question, &passages, top_k, 1.0, true);
        prop_assert!(out.passages.len() <= top_k);
        prop_assert_eq!(out.passages.len(), out.scores.len());
    }

    #[test]
    fn is_deterministic(
        question in "[a-z ]{0,40}",
        passages in arb_passages(),
        top_k in 1usize..8,
        diversify in any::<bool>(),
    ) {
        let a = gate_passages(&question, &passages, top_k, 1.0, diversify);
        let b = gate_passages(&question, &passages, top_k, 1.0, diversify);
        prop_assert_eq!(a.passages, b.passages);
    }

    #[test]
    fn scores_are_non_negative(
        question in "[a-z ]{0,40}",
        passages in arb_passages(),
    ) {
        let out = gate_passages(&question, &passages, 6, 0.0, false);
        for s in out.scores {
            prop_assert!(s >= 0.0);
        }
    }
}
