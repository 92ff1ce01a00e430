//! # lattice-orchestrator
//!
//! Drives a question through intent classification, retrieval gating, one of
//! three answer branches, evaluation, and adaptation advice. The run is a
//! straight walk through [`stage::Stage`]; retries are new runs seeded by the
//! previous run's recommendations.

pub mod engine;
pub mod insight;
pub mod stage;
pub mod summarize;

pub use engine::{GraphUpdate, Orchestrator};
pub use stage::Stage;
