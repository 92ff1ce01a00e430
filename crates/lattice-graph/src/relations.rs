//! The closed relation vocabulary.
//!
//! Edges whose relation is not listed here are never committed. Structural
//! relations additionally require evidence that lexically covers both
//! endpoints; the rest only need evidence touching one endpoint.

/// Relations whose evidence must overlap both endpoints.
pub const STRICT_EVIDENCE_RELATIONS: &[&str] = &[
    "is_a",
    "part_of",
    "component_of",
    "variant_of",
    "extends",
    "depends_on",
    "requires",
    "parameter",
];

/// Every relation an edge may carry.
pub const ALLOWED_RELATIONS: &[&str] = &[
    // taxonomy / structure
    "is_a",
    "instance_of",
    "subclass_of",
    "part_of",
    "has_part",
    "component_of",
    "variant_of",
    "extends",
    "derived_from",
    "based_on",
    "special_case_of",
    "extension_of",
    // dependency / configuration
    "depends_on",
    "requires",
    "prerequisite_for",
    "constrains",
    "parameter",
    "has_parameter",
    "configured_by",
    "controlled_by",
    "defined_by",
    "modeled_by",
    // usage
    "uses",
    "used_for",
    "applied_to",
    "leverages",
    "incorporates",
    "integrates",
    "relies_on",
    "builds_on",
    // effect
    "enables",
    "facilitates",
    "supports",
    "accelerates",
    "improves",
    "enhances",
    "optimizes",
    "stabilizes",
    "regularizes",
    "reduces",
    "mitigates",
    "limits",
    "prevents",
    "increases",
    "produces",
    "generates",
    "yields",
    "results_in",
    "leads_to",
    "causes",
    "affects",
    "influences",
    "transforms",
    "maps_to",
    // measurement / evaluation
    "measures",
    "quantifies",
    "estimates",
    "evaluates",
    "computes",
    "predicts",
    "classifies",
    "measured_by",
    "evaluated_on",
    "tested_on",
    "trained_on",
    "benchmarked_on",
    // comparison
    "compares_to",
    "outperforms",
    "underperforms",
    "matches",
    "replaces",
    "alternatives_to",
    "competes_with",
    "complements",
    // training / adaptation
    "trains",
    "fine_tunes",
    "distills",
    "adapts_to",
    "generalizes_to",
    "fails_on",
    "robust_to",
    "sensitive_to",
    "scales_with",
    "bounded_by",
    "limited_by",
    // discourse
    "related_to",
    "associated_with",
    "correlated_with",
    "addresses",
    "solves",
    "targets",
    "assumes",
    "guarantees",
    "tradeoff_with",
];

pub fn is_allowed(relation: &str) -> bool {
    ALLOWED_RELATIONS.contains(&relation)
}

pub fn is_strict(relation: &str) -> bool {
    STRICT_EVIDENCE_RELATIONS.contains(&relation)
}

/// Comma-joined vocabulary for extraction prompts.
pub fn prompt_list() -> String {
    ALLOWED_RELATIONS.join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strict_relations_are_all_allowed() {
        for rel in STRICT_EVIDENCE_RELATIONS {
            assert!(is_allowed(rel), "{rel} missing from the vocabulary");
        }
    }

    #[test]
    fn unknown_relation_is_rejected() {
        assert!(!is_allowed("hugs"));
        assert!(!is_allowed(""));
    }
}
