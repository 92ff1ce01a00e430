//! Persistent concept-graph store on a stable directed graph.
//!
//! Persistence is a single JSON document `{nodes, edges}`; a broken file on
//! load starts the graph clean rather than failing the process.

use std::collections::{BTreeSet, HashMap};
use std::fs;
use std::path::{Path, PathBuf};

use lattice_core::errors::GraphError;
use lattice_core::models::{ConceptEdge, ConceptNode, GraphView};
use lattice_core::traits::IGraphStore;
use petgraph::stable_graph::{NodeIndex, StableDiGraph};
use petgraph::Direction;
use tracing::{info, warn};

use crate::relations;

pub struct ConceptGraphStore {
    graph: StableDiGraph<ConceptNode, ConceptEdge>,
    index: HashMap<String, NodeIndex>,
    path: Option<PathBuf>,
}

impl ConceptGraphStore {
    /// In-memory store, nothing persisted.
    pub fn in_memory() -> Self {
        ConceptGraphStore {
            graph: StableDiGraph::new(),
            index: HashMap::new(),
            path: None,
        }
    }

    /// File-backed store. A missing file starts empty; an unreadable one is
    /// discarded with a warning.
    pub fn open(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let mut store = ConceptGraphStore {
            graph: StableDiGraph::new(),
            index: HashMap::new(),
            path: Some(path.clone()),
        };

        match fs::read_to_string(&path) {
            Ok(raw) => match serde_json::from_str::<GraphView>(&raw) {
                Ok(view) => {
                    store.load_view(view);
                    info!(
                        path = %path.display(),
                        nodes = store.node_count(),
                        edges = store.edge_count(),
                        "concept graph loaded"
                    );
                }
                Err(err) => {
                    warn!(path = %path.display(), %err, "graph file unreadable, starting clean");
                }
            },
            Err(_) => {}
        }
        store
    }

    fn load_view(&mut self, view: GraphView) {
        for node in view.nodes {
            if node.id.is_empty() {
                continue;
            }
            let id = node.id.clone();
            let idx = self.graph.add_node(node);
            self.index.insert(id, idx);
        }
        for edge in view.edges {
            if let (Some(&s), Some(&t)) =
                (self.index.get(&edge.source), self.index.get(&edge.target))
            {
                self.graph.add_edge(s, t, edge);
            }
        }
    }

    fn has_edge_triple(&self, source: &str, target: &str, relation: &str) -> bool {
        self.graph
            .edge_weights()
            .any(|e| e.source == source && e.target == target && e.relation == relation)
    }
}

impl IGraphStore for ConceptGraphStore {
    fn upsert_node(&mut self, node: ConceptNode) {
        match self.index.get(&node.id) {
            Some(&idx) => {
                let existing = &mut self.graph[idx];
                existing.label = node.label;
                existing.node_type = node.node_type;
                existing.aliases.extend(node.aliases);
                existing.updated_at = node.updated_at;
            }
            None => {
                let id = node.id.clone();
                let idx = self.graph.add_node(node);
                self.index.insert(id, idx);
            }
        }
    }

    fn add_edge(&mut self, edge: ConceptEdge) -> Result<bool, GraphError> {
        if !relations::is_allowed(&edge.relation) {
            return Err(GraphError::UnknownRelation {
                relation: edge.relation,
            });
        }
        let source = self
            .index
            .get(&edge.source)
            .copied()
            .ok_or_else(|| GraphError::MissingEndpoint {
                id: edge.source.clone(),
            })?;
        let target = self
            .index
            .get(&edge.target)
            .copied()
            .ok_or_else(|| GraphError::MissingEndpoint {
                id: edge.target.clone(),
            })?;

        if self.has_edge_triple(&edge.source, &edge.target, &edge.relation) {
            return Ok(false);
        }
        self.graph.add_edge(source, target, edge);
        Ok(true)
    }

    fn has_node(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    fn node(&self, id: &str) -> Option<ConceptNode> {
        self.index.get(id).map(|&idx| self.graph[idx].clone())
    }

    fn node_ids(&self) -> Vec<String> {
        self.graph.node_weights().map(|n| n.id.clone()).collect()
    }

    fn degree(&self, id: &str) -> usize {
        match self.index.get(id) {
            Some(&idx) => {
                self.graph.neighbors_directed(idx, Direction::Outgoing).count()
                    + self.graph.neighbors_directed(idx, Direction::Incoming).count()
            }
            None => 0,
        }
    }

    fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    fn neighbors_subgraph(&self, seeds: &[String], hops: usize) -> GraphView {
        let mut visited: BTreeSet<String> = seeds
            .iter()
            .filter(|id| self.index.contains_key(*id))
            .cloned()
            .collect();
        let mut frontier = visited.clone();

        for _ in 0..hops {
            let mut next = BTreeSet::new();
            for id in &frontier {
                let Some(&idx) = self.index.get(id) else { continue };
                for dir in [Direction::Outgoing, Direction::Incoming] {
                    for n in self.graph.neighbors_directed(idx, dir) {
                        let nid = &self.graph[n].id;
                        if !visited.contains(nid) {
                            next.insert(nid.clone());
                        }
                    }
                }
            }
            if next.is_empty() {
                break;
            }
            visited.extend(next.iter().cloned());
            frontier = next;
        }

        GraphView {
            nodes: visited.iter().filter_map(|id| self.node(id)).collect(),
            edges: self
                .graph
                .edge_weights()
                .filter(|e| visited.contains(&e.source) && visited.contains(&e.target))
                .cloned()
                .collect(),
        }
    }

    fn view(&self) -> GraphView {
        GraphView {
            nodes: self.graph.node_weights().cloned().collect(),
            edges: self.graph.edge_weights().cloned().collect(),
        }
    }

    fn save(&self) -> Result<(), GraphError> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        let json = serde_json::to_string_pretty(&self.view()).map_err(|e| {
            GraphError::PersistFailed {
                reason: e.to_string(),
            }
        })?;

        // Write-then-rename so readers never see a half-written file.
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, json).map_err(|e| GraphError::PersistFailed {
            reason: e.to_string(),
        })?;
        fs::rename(&tmp, path).map_err(|e| GraphError::PersistFailed {
            reason: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn node(id: &str) -> ConceptNode {
        ConceptNode::new(id, id, "concept")
    }

    fn edge(source: &str, target: &str, relation: &str) -> ConceptEdge {
        ConceptEdge {
            source: source.to_string(),
            target: target.to_string(),
            relation: relation.to_string(),
            weight: 1.0,
            evidence: Some("the source uses the target in training".to_string()),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn upsert_merges_aliases() {
        let mut store = ConceptGraphStore::in_memory();
        store.upsert_node(node("lora"));
        let mut merged = node("lora");
        merged.aliases.insert("low-rank adaptation".to_string());
        store.upsert_node(merged);

        let got = store.node("lora").unwrap();
        assert!(got.aliases.contains("low-rank adaptation"));
        assert_eq!(store.node_count(), 1);
    }

    #[test]
    fn duplicate_edges_are_ignored() {
        let mut store = ConceptGraphStore::in_memory();
        store.upsert_node(node("a"));
        store.upsert_node(node("b"));
        assert!(store.add_edge(edge("a", "b", "uses")).unwrap());
        assert!(!store.add_edge(edge("a", "b", "uses")).unwrap());
        assert!(store.add_edge(edge("a", "b", "improves")).unwrap());
        assert_eq!(store.edge_count(), 2);
    }

    #[test]
    fn edges_need_existing_endpoints() {
        let mut store = ConceptGraphStore::in_memory();
        store.upsert_node(node("a"));
        let err = store.add_edge(edge("a", "ghost", "uses")).unwrap_err();
        assert!(matches!(err, GraphError::MissingEndpoint { .. }));
    }

    #[test]
    fn unknown_relations_are_rejected() {
        let mut store = ConceptGraphStore::in_memory();
        store.upsert_node(node("a"));
        store.upsert_node(node("b"));
        let err = store.add_edge(edge("a", "b", "hugs")).unwrap_err();
        assert!(matches!(err, GraphError::UnknownRelation { .. }));
    }

    #[test]
    fn subgraph_respects_hop_limit() {
        let mut store = ConceptGraphStore::in_memory();
        for id in ["a", "b", "c", "d"] {
            store.upsert_node(node(id));
        }
        store.add_edge(edge("a", "b", "uses")).unwrap();
        store.add_edge(edge("b", "c", "uses")).unwrap();
        store.add_edge(edge("c", "d", "uses")).unwrap();

        let one_hop = store.neighbors_subgraph(&["a".to_string()], 1);
        let ids: Vec<&str> = one_hop.nodes.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
        assert_eq!(one_hop.edges.len(), 1);

        let two_hops = store.neighbors_subgraph(&["a".to_string()], 2);
        assert_eq!(two_hops.nodes.len(), 3);
    }

    #[test]
    fn round_trips_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("graph.json");

        let mut store = ConceptGraphStore::open(&path);
        store.upsert_node(node("transformer"));
        store.upsert_node(node("attention"));
        store.add_edge(edge("transformer", "attention", "uses")).unwrap();
        store.save().unwrap();

        let reloaded = ConceptGraphStore::open(&path);
        assert!(reloaded.has_node("transformer"));
        assert_eq!(reloaded.edge_count(), 1);
        assert_eq!(reloaded.degree("attention"), 1);
    }

    #[test]
    fn broken_file_starts_clean() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("graph.json");
        fs::write(&path, "{not json").unwrap();

        let store = ConceptGraphStore::open(&path);
        assert_eq!(store.node_count(), 0);
    }
}
