//! The four proxy scores. Each maps arbitrary input to [0.0, 1.0] and never
//! fails; empty input scores 0.0.

mod coherence;
mod coverage;
mod faithfulness;
mod insight_depth;

pub use coherence::coherence_score;
pub use coverage::coverage_score;
pub use faithfulness::faithfulness_score;
pub use insight_depth::insight_depth_score;
