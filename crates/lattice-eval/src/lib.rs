//! # lattice-eval
//!
//! Deterministic proxy scoring of produced answers, aggregated into a
//! weighted global score, with an optional model critique pass supplying
//! issues and recommendations.

mod critique;
mod engine;
pub mod scores;

pub use engine::{global_score, Evaluator};
pub use scores::{coherence_score, coverage_score, faithfulness_score, insight_depth_score};
