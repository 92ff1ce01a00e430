use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A persistent concept node. Created on first sighting, mutated on merges,
/// never deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConceptNode {
    /// Normalized label; unique and deterministic from the label.
    pub id: String,
    /// Canonical display label.
    pub label: String,
    /// One of: dataset, metric, task, method, model, concept.
    pub node_type: String,
    /// Every surface form that has resolved to this node.
    #[serde(default)]
    pub aliases: BTreeSet<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ConceptNode {
    pub fn new(id: impl Into<String>, label: impl Into<String>, node_type: impl Into<String>) -> Self {
        let label = label.into();
        let now = Utc::now();
        let mut aliases = BTreeSet::new();
        aliases.insert(label.clone());
        Self {
            id: id.into(),
            label,
            node_type: node_type.into(),
            aliases,
            created_at: now,
            updated_at: now,
        }
    }
}

/// A persistent directed relation. Append-only; unique per
/// (source, target, relation).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConceptEdge {
    pub source: String,
    pub target: String,
    pub relation: String,
    pub weight: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evidence: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A concept proposed by an extraction collaborator, before resolution.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CandidateConcept {
    pub label: String,
    #[serde(default = "default_concept_type", rename = "type")]
    pub concept_type: String,
    #[serde(default)]
    pub aliases: Vec<String>,
}

fn default_concept_type() -> String {
    "concept".to_string()
}

/// A relation proposed by an extraction collaborator, before resolution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateEdge {
    pub source: String,
    pub target: String,
    pub relation: String,
    #[serde(default)]
    pub evidence: String,
}

/// Ephemeral extraction output: either merged into the persistent graph or
/// discarded after the quality-gate decision.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CandidateGraph {
    pub concepts: Vec<CandidateConcept>,
    pub edges: Vec<CandidateEdge>,
}

impl CandidateGraph {
    pub fn is_empty(&self) -> bool {
        self.concepts.is_empty() && self.edges.is_empty()
    }
}

/// Counts and structured output of one graph-update batch, for observability.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GraphUpdateOutcome {
    pub nodes_added: usize,
    pub edges_added: usize,
    pub merged_nodes: usize,
    #[serde(default)]
    pub extracted_concepts: Vec<String>,
    #[serde(default)]
    pub extracted_edges: Vec<ConceptEdge>,
}

/// A read-only projection of (part of) the persistent graph.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GraphView {
    pub nodes: Vec<ConceptNode>,
    pub edges: Vec<ConceptEdge>,
}
