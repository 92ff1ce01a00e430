//! Data model shared across the pipeline crates.

mod adaptation;
mod evaluation;
mod graph;
mod insight;
mod passage;
mod pipeline_state;
mod summary;
mod tuning;

pub use adaptation::{AdaptationAction, AdaptationDecision, TuningPatch};
pub use evaluation::{EvaluationResult, Scores};
pub use graph::{
    CandidateConcept, CandidateEdge, CandidateGraph, ConceptEdge, ConceptNode, GraphUpdateOutcome,
    GraphView,
};
pub use insight::InsightOutcome;
pub use passage::Passage;
pub use pipeline_state::PipelineState;
pub use summary::SummaryOutcome;
pub use tuning::Tuning;
