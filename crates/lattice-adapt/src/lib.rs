//! # lattice-adapt
//!
//! Maps an evaluation plus observed latency to named tuning recommendations
//! and a manual-retry suggestion. Purely advisory: the decision never mutates
//! the run it was computed for.

mod policy;

pub use policy::decide;
