/// Concept-graph store errors.
#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    #[error("relation '{relation}' is not in the closed vocabulary")]
    UnknownRelation { relation: String },

    #[error("edge endpoint '{id}' does not exist at commit time")]
    MissingEndpoint { id: String },

    #[error("failed to persist graph: {reason}")]
    PersistFailed { reason: String },

    #[error("failed to load graph: {reason}")]
    LoadFailed { reason: String },
}
