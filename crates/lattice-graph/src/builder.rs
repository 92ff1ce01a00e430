//! Merges accepted candidate graphs into the persistent store.
//!
//! Resolve-then-write for a whole batch is a single-writer critical section;
//! callers hold the store lock across one `commit`. The store is persisted
//! once per batch, after all writes.

use std::collections::{BTreeSet, HashMap};

use chrono::Utc;
use lattice_core::errors::GraphError;
use lattice_core::models::{CandidateGraph, ConceptEdge, ConceptNode, GraphUpdateOutcome};
use lattice_core::traits::IGraphStore;
use tracing::{info, warn};

use crate::evidence::evidence_mentions_label;
use crate::normalize::{canonical_label, choose_canonical, infer_node_type, normalize_label};
use crate::relations;
use crate::resolve::resolve_node_id;

pub struct ConceptGraphBuilder {
    require_evidence: bool,
}

impl ConceptGraphBuilder {
    pub fn new(require_evidence: bool) -> Self {
        ConceptGraphBuilder { require_evidence }
    }

    /// Commit a candidate graph: resolve every concept to an existing or new
    /// node, then append evidence-grounded edges. Returns batch counts plus
    /// the committed structures for observability.
    pub fn commit(
        &self,
        store: &mut dyn IGraphStore,
        candidate: &CandidateGraph,
    ) -> Result<GraphUpdateOutcome, GraphError> {
        let mut outcome = GraphUpdateOutcome::default();
        let mut ids = store.node_ids();
        // Surface forms seen this batch -> resolved node id.
        let mut batch_index: HashMap<String, String> = HashMap::new();

        for concept in &candidate.concepts {
            let label = concept.label.trim();
            if label.is_empty() {
                continue;
            }
            let node_type = if concept.concept_type != "concept" && !concept.concept_type.is_empty()
            {
                concept.concept_type.clone()
            } else {
                infer_node_type(label).to_string()
            };

            let id = self.resolve_or_create(
                store,
                &mut ids,
                &mut outcome,
                label,
                &node_type,
                &concept.aliases,
            );
            if let Some(id) = id {
                batch_index.insert(label.to_lowercase(), id.clone());
                for alias in &concept.aliases {
                    batch_index.entry(alias.to_lowercase()).or_insert_with(|| id.clone());
                }
                outcome.extracted_concepts.push(label.to_string());
            }
        }

        let mut batch_dedup: BTreeSet<(String, String, String)> = BTreeSet::new();

        for edge in &candidate.edges {
            let relation = edge.relation.trim();
            let evidence = edge.evidence.trim();

            if relation.is_empty() || !relations::is_allowed(relation) {
                warn!(relation, "skipping edge with relation outside the vocabulary");
                continue;
            }
            if self.require_evidence && evidence.is_empty() {
                continue;
            }

            let source = self.resolve_endpoint(
                store, &mut ids, &mut outcome, &mut batch_index, &edge.source, evidence,
            );
            let target = self.resolve_endpoint(
                store, &mut ids, &mut outcome, &mut batch_index, &edge.target, evidence,
            );
            let (Some(source), Some(target)) = (source, target) else {
                continue;
            };

            if !batch_dedup.insert((source.clone(), target.clone(), relation.to_string())) {
                continue;
            }

            let committed = ConceptEdge {
                source,
                target,
                relation: relation.to_string(),
                weight: 1.0,
                evidence: (!evidence.is_empty()).then(|| evidence.to_string()),
                created_at: Utc::now(),
            };
            if store.add_edge(committed.clone())? {
                outcome.edges_added += 1;
                outcome.extracted_edges.push(committed);
            }
        }

        store.save()?;
        info!(
            nodes_added = outcome.nodes_added,
            edges_added = outcome.edges_added,
            merged_nodes = outcome.merged_nodes,
            "candidate graph committed"
        );
        Ok(outcome)
    }

    /// Resolve a surface label to a node id, creating or merging as needed.
    fn resolve_or_create(
        &self,
        store: &mut dyn IGraphStore,
        ids: &mut Vec<String>,
        outcome: &mut GraphUpdateOutcome,
        label: &str,
        node_type: &str,
        aliases: &[String],
    ) -> Option<String> {
        let normalized = normalize_label(label);
        if normalized.is_empty() {
            return None;
        }

        match resolve_node_id(&normalized, ids) {
            Some(id) => {
                let mut node = store.node(&id)?;
                node.label = choose_canonical(&node.label, &canonical_label(label)).to_string();
                node.aliases.insert(label.to_string());
                node.aliases.extend(aliases.iter().cloned());
                if node.node_type == "concept" && node_type != "concept" {
                    node.node_type = node_type.to_string();
                }
                node.updated_at = Utc::now();
                store.upsert_node(node);
                outcome.merged_nodes += 1;
                Some(id)
            }
            None => {
                let mut node = ConceptNode::new(&normalized, canonical_label(label), node_type);
                node.aliases.insert(label.to_string());
                node.aliases.extend(aliases.iter().cloned());
                store.upsert_node(node);
                ids.push(normalized.clone());
                outcome.nodes_added += 1;
                Some(normalized)
            }
        }
    }

    /// Resolve an edge endpoint. Unknown endpoints become nodes only when
    /// the edge's evidence names them (always, when grounding is off).
    fn resolve_endpoint(
        &self,
        store: &mut dyn IGraphStore,
        ids: &mut Vec<String>,
        outcome: &mut GraphUpdateOutcome,
        batch_index: &mut HashMap<String, String>,
        raw: &str,
        evidence: &str,
    ) -> Option<String> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }
        if let Some(id) = batch_index.get(&raw.to_lowercase()) {
            return Some(id.clone());
        }

        let normalized = normalize_label(raw);
        if let Some(id) = resolve_node_id(&normalized, ids) {
            batch_index.insert(raw.to_lowercase(), id.clone());
            return Some(id);
        }

        if self.require_evidence && !evidence_mentions_label(raw, evidence) {
            return None;
        }
        let id = self.resolve_or_create(
            store,
            ids,
            outcome,
            raw,
            infer_node_type(raw),
            &[],
        )?;
        batch_index.insert(raw.to_lowercase(), id.clone());
        Some(id)
    }
}
