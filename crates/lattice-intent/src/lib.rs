//! # lattice-intent
//!
//! Classifies a question into an [`Intent`] and decomposes it into bounded,
//! imperative sub-tasks. An optional model pass proposes both; deterministic
//! keyword markers override the intent, and sub-tasks are always normalized
//! to the same shape regardless of where they came from.
//!
//! [`Intent`]: lattice_core::Intent

mod classifier;
mod markers;
mod subtasks;

pub use classifier::{IntentClassifier, IntentResult};
pub use markers::marker_override;
pub use subtasks::{default_sub_tasks, normalize_sub_tasks};
