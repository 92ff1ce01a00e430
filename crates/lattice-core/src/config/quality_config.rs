use serde::{Deserialize, Serialize};

use super::defaults;

/// Thresholds for the pre-commit graph quality gate.
///
/// The persistent graph is never pruned, so these are the only defense
/// against accumulating noise.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct QualityConfig {
    pub min_concepts: usize,
    pub min_edges: usize,
    /// Require per-edge evidence snippets and lexical grounding.
    pub require_evidence: bool,
    /// Cap on the share of generic/opinion single-token concepts.
    pub max_generic_ratio: f64,
    pub min_relation_diversity: usize,
    /// Cap on the share any single relation may take of all edges.
    pub max_single_relation_ratio: f64,
    /// Minimum concepts that must overlap the question's topic tokens
    /// (non-fatal check).
    pub min_question_alignment_hits: usize,
}

impl Default for QualityConfig {
    fn default() -> Self {
        Self {
            min_concepts: defaults::DEFAULT_MIN_CONCEPTS,
            min_edges: defaults::DEFAULT_MIN_EDGES,
            require_evidence: defaults::DEFAULT_REQUIRE_EVIDENCE,
            max_generic_ratio: defaults::DEFAULT_MAX_GENERIC_RATIO,
            min_relation_diversity: defaults::DEFAULT_MIN_RELATION_DIVERSITY,
            max_single_relation_ratio: defaults::DEFAULT_MAX_SINGLE_RELATION_RATIO,
            min_question_alignment_hits: defaults::DEFAULT_MIN_QUESTION_ALIGNMENT_HITS,
        }
    }
}
