//! # lattice-core
//!
//! Foundation crate for the Lattice question-answering pipeline.
//! Defines all types, traits, errors, config, and constants.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod intent;
pub mod llm_json;
pub mod models;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::LatticeConfig;
pub use errors::{LatticeError, LatticeResult};
pub use intent::Intent;
pub use llm_json::LlmJson;
pub use models::{
    AdaptationAction, AdaptationDecision, CandidateGraph, ConceptEdge, ConceptNode,
    EvaluationResult, Passage, PipelineState, Tuning,
};
