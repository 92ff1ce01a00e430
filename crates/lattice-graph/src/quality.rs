//! Admission control for candidate graphs.
//!
//! Every check appends zero or more issue strings; the candidate is accepted
//! iff no fatal issue fired. Question alignment and small weak-overlap
//! counts are reported but never fatal on their own.

use std::collections::{BTreeMap, BTreeSet};

use lattice_core::config::QualityConfig;
use lattice_core::models::CandidateGraph;
use lattice_text::{acronyms_of, content_tokens};
use tracing::info;

use crate::evidence::{
    evidence_mentions_any, evidence_overlap_ok, grounding_tokens, is_title_like_evidence,
};
use crate::labels::{is_noise_label, is_too_generic};
use crate::relations;

/// Outcome of one quality assessment. Identical inputs always produce an
/// identical report.
#[derive(Debug, Clone, PartialEq)]
pub struct QualityReport {
    pub accepted: bool,
    pub issues: Vec<String>,
}

struct Issues {
    entries: Vec<String>,
    fatal: usize,
}

impl Issues {
    fn new() -> Self {
        Issues {
            entries: Vec::new(),
            fatal: 0,
        }
    }

    fn fatal(&mut self, text: String) {
        self.entries.push(text);
        self.fatal += 1;
    }

    fn warning(&mut self, text: String) {
        self.entries.push(text);
    }
}

/// Assess a candidate graph against the configured thresholds.
pub fn assess_graph(
    candidate: &CandidateGraph,
    config: &QualityConfig,
    question: Option<&str>,
) -> QualityReport {
    let mut issues = Issues::new();

    if candidate.concepts.len() < config.min_concepts {
        issues.fatal(format!(
            "too few concepts ({} < {})",
            candidate.concepts.len(),
            config.min_concepts
        ));
    }

    let labels: Vec<&str> = candidate
        .concepts
        .iter()
        .map(|c| c.label.trim())
        .filter(|l| !l.is_empty())
        .collect();

    let noise: Vec<&str> = labels.iter().copied().filter(|l| is_noise_label(l)).collect();
    if !noise.is_empty() {
        let sample: Vec<&str> = noise.iter().copied().take(6).collect();
        issues.fatal(format!("noise concepts detected: {sample:?}"));
    }

    if !labels.is_empty() {
        let generic = labels.iter().filter(|l| is_too_generic(l)).count();
        let ratio = generic as f64 / labels.len() as f64;
        if ratio > config.max_generic_ratio {
            issues.fatal(format!(
                "too many generic concepts ({generic}/{} = {ratio:.2})",
                labels.len()
            ));
        }
    }

    if candidate.edges.len() < config.min_edges {
        issues.fatal(format!(
            "too few edges ({} < {})",
            candidate.edges.len(),
            config.min_edges
        ));
    }

    let label_set: BTreeSet<String> = labels.iter().map(|l| l.to_lowercase()).collect();

    let mut bad_edges = 0usize;
    let mut missing_evidence = 0usize;
    let mut title_like = 0usize;
    let mut weak_overlap = 0usize;
    let mut dangling = 0usize;
    let mut relation_counts: BTreeMap<&str, usize> = BTreeMap::new();

    for edge in &candidate.edges {
        let source = edge.source.trim();
        let target = edge.target.trim();
        let relation = edge.relation.trim();
        let evidence = edge.evidence.trim();

        if source.is_empty() || target.is_empty() || relation.is_empty() {
            bad_edges += 1;
            continue;
        }

        *relation_counts.entry(relation).or_default() += 1;

        if config.require_evidence {
            if evidence.is_empty() {
                missing_evidence += 1;
            } else if is_title_like_evidence(evidence) {
                title_like += 1;
            } else {
                let grounded = if relations::is_strict(relation) {
                    evidence_overlap_ok(source, target, evidence, 2)
                } else {
                    evidence_mentions_any(source, target, evidence)
                };
                if !grounded {
                    weak_overlap += 1;
                }
            }
        }

        if !label_set.contains(&source.to_lowercase()) || !label_set.contains(&target.to_lowercase())
        {
            dangling += 1;
        }

        if relation == "evaluated_on" && is_noise_label(target) {
            bad_edges += 1;
        }
    }

    if bad_edges > 0 {
        issues.fatal(format!("bad edges: {bad_edges}"));
    }
    if config.require_evidence && missing_evidence > 0 {
        issues.fatal(format!("edges missing evidence: {missing_evidence}"));
    }
    if dangling > 0 {
        issues.fatal(format!(
            "dangling edges (source/target not in concepts): {dangling}"
        ));
    }
    if config.require_evidence && title_like > 0 {
        issues.fatal(format!("title-like evidence edges: {title_like}"));
    }

    let total_edges = candidate.edges.len();
    if config.require_evidence && weak_overlap > 0 {
        let ratio = weak_overlap as f64 / total_edges.max(1) as f64;
        if total_edges >= 4 && ratio >= 0.5 {
            issues.fatal(format!(
                "weak evidence overlap edges: {weak_overlap} (ratio={ratio:.2})"
            ));
        } else if total_edges < 4 && weak_overlap >= 2 {
            issues.fatal(format!(
                "weak evidence overlap edges: {weak_overlap} (small-graph)"
            ));
        } else {
            issues.warning(format!(
                "weak evidence overlap edges (warning): {weak_overlap}/{total_edges}"
            ));
        }
    }

    let counted: usize = relation_counts.values().sum();
    if counted >= 4 {
        if relation_counts.len() < config.min_relation_diversity {
            issues.fatal(format!(
                "low relation diversity ({} < {})",
                relation_counts.len(),
                config.min_relation_diversity
            ));
        }
        if let Some((dominant, count)) = relation_counts
            .iter()
            .max_by(|a, b| a.1.cmp(b.1).then(b.0.cmp(a.0)))
        {
            let ratio = *count as f64 / counted as f64;
            if ratio > config.max_single_relation_ratio {
                issues.fatal(format!(
                    "too many '{dominant}' edges ({count}/{counted} = {ratio:.2})"
                ));
            }
        }
    }

    if let Some(question) = question.map(str::trim).filter(|q| !q.is_empty()) {
        if !labels.is_empty() {
            let mut topic = content_tokens(question);
            topic.extend(acronyms_of(question));
            if !topic.is_empty() {
                let hits = labels
                    .iter()
                    .filter(|l| !grounding_tokens(l).is_disjoint(&topic))
                    .count();
                if hits < config.min_question_alignment_hits {
                    issues.warning(format!(
                        "low question alignment (only {hits} concepts overlap topic tokens)"
                    ));
                }
            }
        }
    }

    let accepted = issues.fatal == 0;
    info!(
        accepted,
        concepts = candidate.concepts.len(),
        edges = candidate.edges.len(),
        issues = issues.entries.len(),
        "graph quality assessed"
    );
    QualityReport {
        accepted,
        issues: issues.entries,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lattice_core::models::{CandidateConcept, CandidateEdge};

    fn concept(label: &str) -> CandidateConcept {
        CandidateConcept {
            label: label.to_string(),
            concept_type: "concept".to_string(),
            aliases: Vec::new(),
        }
    }

    fn edge(source: &str, target: &str, relation: &str, evidence: &str) -> CandidateEdge {
        CandidateEdge {
            source: source.to_string(),
            target: target.to_string(),
            relation: relation.to_string(),
            evidence: evidence.to_string(),
        }
    }

    fn healthy_candidate() -> CandidateGraph {
        CandidateGraph {
            concepts: vec![
                concept("low-rank adaptation"),
                concept("full fine-tuning"),
                concept("trainable parameters"),
                concept("attention weights"),
                concept("language model"),
                concept("GLUE benchmark"),
            ],
            edges: vec![
                edge(
                    "low-rank adaptation",
                    "trainable parameters",
                    "reduces",
                    "low-rank adaptation reduces trainable parameters during adaptation",
                ),
                edge(
                    "low-rank adaptation",
                    "attention weights",
                    "applied_to",
                    "the update is applied to the attention weights of each layer",
                ),
            ],
        }
    }

    #[test]
    fn healthy_candidate_is_accepted() {
        let report = assess_graph(&healthy_candidate(), &QualityConfig::default(), None);
        assert!(report.accepted, "issues: {:?}", report.issues);
    }

    #[test]
    fn too_few_concepts_is_fatal() {
        let candidate = CandidateGraph {
            concepts: vec![concept("alpha beta"), concept("gamma delta"), concept("epsilon zeta")],
            edges: vec![edge(
                "alpha beta",
                "gamma delta",
                "uses",
                "alpha beta uses gamma delta in the pipeline",
            )],
        };
        let report = assess_graph(&candidate, &QualityConfig::default(), None);
        assert!(!report.accepted);
        assert!(report.issues.iter().any(|i| i.starts_with("too few concepts")));
    }

    #[test]
    fn noise_labels_are_fatal() {
        let mut candidate = healthy_candidate();
        candidate.concepts.push(concept("https://arxiv.org/abs/1"));
        let report = assess_graph(&candidate, &QualityConfig::default(), None);
        assert!(!report.accepted);
        assert!(report.issues.iter().any(|i| i.starts_with("noise concepts")));
    }

    #[test]
    fn dangling_edges_are_fatal() {
        let mut candidate = healthy_candidate();
        candidate.edges.push(edge(
            "low-rank adaptation",
            "phantom concept",
            "uses",
            "low-rank adaptation uses the phantom concept here",
        ));
        let report = assess_graph(&candidate, &QualityConfig::default(), None);
        assert!(!report.accepted);
        assert!(report.issues.iter().any(|i| i.starts_with("dangling edges")));
    }

    #[test]
    fn strict_relation_needs_both_endpoints_in_evidence() {
        let mut candidate = healthy_candidate();
        // strict relation whose evidence never mentions the target
        candidate.edges.push(edge(
            "low-rank adaptation",
            "language model",
            "is_a",
            "low-rank adaptation is a widely adopted idea in practice",
        ));
        candidate.edges.push(edge(
            "full fine-tuning",
            "language model",
            "part_of",
            "full fine-tuning is used without mention of the other end",
        ));
        let report = assess_graph(&candidate, &QualityConfig::default(), None);
        // 2 weak of 4 edges: ratio 0.5 is fatal
        assert!(!report.accepted);
        assert!(report
            .issues
            .iter()
            .any(|i| i.starts_with("weak evidence overlap edges:")));
    }

    #[test]
    fn single_weak_overlap_is_only_a_warning() {
        let mut candidate = healthy_candidate();
        candidate.edges.push(edge(
            "full fine-tuning",
            "GLUE benchmark",
            "evaluated_on",
            "the results were evaluated across several unrelated settings",
        ));
        let report = assess_graph(&candidate, &QualityConfig::default(), None);
        assert!(report.accepted, "issues: {:?}", report.issues);
        assert!(report
            .issues
            .iter()
            .any(|i| i.starts_with("weak evidence overlap edges (warning)")));
    }

    #[test]
    fn question_alignment_is_never_fatal() {
        let report = assess_graph(
            &healthy_candidate(),
            &QualityConfig::default(),
            Some("how do penguins navigate under sea ice?"),
        );
        assert!(report.accepted);
        assert!(report
            .issues
            .iter()
            .any(|i| i.starts_with("low question alignment")));
    }

    #[test]
    fn identical_inputs_yield_identical_reports() {
        let candidate = healthy_candidate();
        let config = QualityConfig::default();
        let a = assess_graph(&candidate, &config, Some("what is low-rank adaptation?"));
        let b = assess_graph(&candidate, &config, Some("what is low-rank adaptation?"));
        assert_eq!(a, b);
    }
}
