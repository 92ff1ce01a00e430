//! Trait seams for external collaborators.
//!
//! Everything behind these traits is an external system: the pipeline never
//! assumes anything about how a completion is produced or how passages are
//! ranked, only about the blocking call contract and its timeout.

mod graph_store;
mod llm;
mod retrieval;

pub use graph_store::IGraphStore;
pub use llm::ITextCompletion;
pub use retrieval::IPassageRetriever;
