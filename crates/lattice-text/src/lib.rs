//! # lattice-text
//!
//! Deterministic text primitives shared by the gate, the graph subsystem,
//! and the evaluator: tokenization with an instruction-word stoplist,
//! fuzzy string ratios, acronym harvesting, and sentence splitting.

pub mod fuzzy;
pub mod sentences;
pub mod tokenize;

pub use fuzzy::{indel_ratio, partial_ratio, token_set_ratio};
pub use sentences::sentencize;
pub use tokenize::{acronyms_of, content_tokens, jaccard, tokens, word_count};
