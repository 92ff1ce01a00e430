use crate::errors::GraphError;
use crate::models::{ConceptEdge, ConceptNode, GraphView};

/// Persistent concept-graph store.
///
/// The graph is shared across requests and never pruned; callers must treat
/// resolve-then-write sequences as a single-writer critical section.
pub trait IGraphStore: Send {
    /// Insert a node or merge attributes into an existing one.
    fn upsert_node(&mut self, node: ConceptNode);

    /// Append an edge. Both endpoints must already exist; duplicate
    /// (source, target, relation) triples are ignored.
    fn add_edge(&mut self, edge: ConceptEdge) -> Result<bool, GraphError>;

    fn has_node(&self, id: &str) -> bool;

    fn node(&self, id: &str) -> Option<ConceptNode>;

    /// Ids of every node in the graph.
    fn node_ids(&self) -> Vec<String>;

    /// Total degree (in + out) of a node; 0 when absent.
    fn degree(&self, id: &str) -> usize;

    fn node_count(&self) -> usize;
    fn edge_count(&self) -> usize;

    /// The subgraph within `hops` of the seed ids.
    fn neighbors_subgraph(&self, seeds: &[String], hops: usize) -> GraphView;

    /// The whole graph as `{nodes, edges}`.
    fn view(&self) -> GraphView;

    /// Persist the whole graph atomically.
    fn save(&self) -> Result<(), GraphError>;
}
