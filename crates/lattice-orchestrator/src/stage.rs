//! The pipeline state machine.
//!
//! Linear with one routed branch; every branch converges on Evaluate. Adapt
//! is terminal advice, it never loops back into the run.

use lattice_core::Intent;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Start,
    Intent,
    Retrieval,
    Route,
    Summarize,
    ExtractConcepts,
    Insight,
    Evaluate,
    Adapt,
    End,
}

impl Stage {
    /// The stage that follows this one. `Route` needs the resolved intent.
    pub fn next(self, intent: Intent) -> Stage {
        match self {
            Stage::Start => Stage::Intent,
            Stage::Intent => Stage::Retrieval,
            Stage::Retrieval => Stage::Route,
            Stage::Route => route(intent),
            Stage::Summarize | Stage::ExtractConcepts | Stage::Insight => Stage::Evaluate,
            Stage::Evaluate => Stage::Adapt,
            Stage::Adapt => Stage::End,
            Stage::End => Stage::End,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Stage::Start => "start",
            Stage::Intent => "intent",
            Stage::Retrieval => "retrieval",
            Stage::Route => "route",
            Stage::Summarize => "summarize",
            Stage::ExtractConcepts => "extract_concepts",
            Stage::Insight => "insight",
            Stage::Evaluate => "evaluate",
            Stage::Adapt => "adapt",
            Stage::End => "end",
        }
    }
}

/// Exhaustive routing on intent. Unrecognized questions read best as
/// summaries, so `Other` goes there too.
pub fn route(intent: Intent) -> Stage {
    match intent {
        Intent::Summary | Intent::Comparison | Intent::Other => Stage::Summarize,
        Intent::Concepts => Stage::ExtractConcepts,
        Intent::Gap | Intent::DeepAnalysis => Stage::Insight,
    }
}
