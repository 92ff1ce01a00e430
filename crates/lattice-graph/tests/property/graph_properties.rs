use lattice_core::config::QualityConfig;
use lattice_core::models::{CandidateConcept, CandidateGraph};
use lattice_core::traits::IGraphStore;
use lattice_graph::normalize::normalize_label;
use lattice_graph::{assess_graph, ConceptGraphBuilder, ConceptGraphStore};
use proptest::prelude::*;

fn concept(label: &str) -> CandidateConcept {
    CandidateConcept {
        label: label.to_string(),
        concept_type: "concept".to_string(),
        aliases: Vec::new(),
    }
}

proptest! {
    #[test]
    fn normalize_label_is_idempotent(raw in ".{0,80}") {
        let once = normalize_label(&raw);
        let twice = normalize_label(&once);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn normalized_labels_are_lowercase_and_trimmed(raw in ".{0,80}") {
        let normalized = normalize_label(&raw);
        prop_assert_eq!(normalized.clone(), normalized.to_lowercase());
        prop_assert_eq!(normalized.clone(), normalized.trim().to_string());
        prop_assert!(!normalized.contains("  "));
    }

    #[test]
    fn assessment_is_deterministic(
        labels in proptest::collection::vec("[a-z]{3,12} [a-z]{3,12}", 0..10),
        question in "[a-z ]{0,40}",
    ) {
        let candidate = CandidateGraph {
            concepts: labels.iter().map(|l| concept(l)).collect(),
            edges: Vec::new(),
        };
        let config = QualityConfig::default();
        let a = assess_graph(&candidate, &config, Some(&question));
        let b = assess_graph(&candidate, &config, Some(&question));
        prop_assert_eq!(a, b);
    }

    #[test]
    fn committing_twice_never_grows_the_node_set(
        labels in proptest::collection::vec("[a-z]{3,12} [a-z]{3,12}", 1..8),
    ) {
        let candidate = CandidateGraph {
            concepts: labels.iter().map(|l| concept(l)).collect(),
            edges: Vec::new(),
        };
        let mut store = ConceptGraphStore::in_memory();
        let builder = ConceptGraphBuilder::new(true);

        builder.commit(&mut store, &candidate).unwrap();
        let after_first = store.node_count();
        builder.commit(&mut store, &candidate).unwrap();
        prop_assert_eq!(store.node_count(), after_first);
    }
}

#[test]
fn case_variants_merge_with_both_surface_forms_as_aliases() {
    let candidate = CandidateGraph {
        concepts: vec![
            concept("Large Language Model"),
            concept("large language models"),
        ],
        edges: Vec::new(),
    };
    let mut store = ConceptGraphStore::in_memory();
    let builder = ConceptGraphBuilder::new(true);
    builder.commit(&mut store, &candidate).unwrap();

    assert_eq!(store.node_count(), 1);
    let node = store.node("large language model").unwrap();
    assert!(node.aliases.contains("Large Language Model"));
    assert!(node.aliases.contains("large language models"));
}

#[test]
fn sparse_candidates_are_rejected_for_too_few_concepts() {
    let candidate = CandidateGraph {
        concepts: vec![
            concept("alpha routine"),
            concept("beta routine"),
            concept("gamma routine"),
        ],
        edges: Vec::new(),
    };
    let report = assess_graph(&candidate, &QualityConfig::default(), None);
    assert!(!report.accepted);
    assert!(report.issues.iter().any(|i| i.starts_with("too few concepts")));
}
