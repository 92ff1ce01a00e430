//! Workspace-wide tuning bounds and policy constants.

/// Hard ceiling on retrieval depth. No policy may raise `top_k` past this.
pub const TOP_K_CEILING: usize = 12;

/// Step applied when a policy expands retrieval depth.
pub const TOP_K_RETRY_STEP: usize = 4;

/// Retrieval depth forced by intent boosts (comparison / gap analysis).
pub const TOP_K_INTENT_BOOST: usize = 8;

/// Floor for sampling temperature after any reduction.
pub const TEMPERATURE_FLOOR: f64 = 0.05;

/// Step applied when a policy reduces temperature.
pub const TEMPERATURE_STEP: f64 = 0.10;

/// Latency above which the critique pass is recommended off.
pub const LATENCY_GUARD_MS: u64 = 8_000;

/// Maximum number of sub-tasks carried per question.
pub const MAX_SUB_TASKS: usize = 6;

/// Maximum words per sub-task after normalization.
pub const MAX_SUB_TASK_WORDS: usize = 8;

/// Maximum length of a canonical concept label.
pub const MAX_CANONICAL_LABEL_CHARS: usize = 70;

/// Fuzzy node-resolution threshold on the 0..100 similarity scale.
pub const NODE_MATCH_THRESHOLD: u32 = 92;
