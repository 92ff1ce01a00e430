//! # lattice-gate
//!
//! Passage pre-selection: cleans candidate evidence, scores it against the
//! (synonym-expanded) question, and picks a relevant, non-redundant subset.
//! What this gate keeps is all the evidence downstream stages ever see.

mod cleaner;
mod expansion;
mod gate;
mod mmr;
mod scoring;

pub use cleaner::clean_passage;
pub use expansion::expand_question;
pub use gate::{gate_passages, GateOutcome};
