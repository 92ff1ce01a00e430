use std::collections::BTreeMap;

use crate::errors::ExternalCallError;
use crate::models::Passage;

/// Vector-search retrieval engine, consumed as-is.
///
/// Ranking is the engine's concern; the pipeline only narrows its output
/// through the passage gate.
pub trait IPassageRetriever: Send + Sync {
    /// Return up to `count` hits ordered by the engine's own relevance.
    fn search(
        &self,
        query: &str,
        count: usize,
        filter: Option<&BTreeMap<String, String>>,
    ) -> Result<Vec<Passage>, ExternalCallError>;
}
