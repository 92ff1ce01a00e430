//! Concept graph: extraction from passages, admission control, and a
//! persistent store with fuzzy node resolution.
//!
//! The flow is extract -> assess -> commit. Extraction produces a
//! [`CandidateGraph`](lattice_core::models::CandidateGraph) that is held to
//! the quality gate before [`ConceptGraphBuilder`] merges it into a
//! [`ConceptGraphStore`].

pub mod builder;
pub mod evidence;
pub mod extract;
pub mod labels;
pub mod normalize;
pub mod quality;
pub mod relations;
pub mod resolve;
pub mod store;

pub use builder::ConceptGraphBuilder;
pub use extract::{extract_heuristic, extract_with_llm};
pub use quality::{assess_graph, QualityReport};
pub use store::ConceptGraphStore;
