/// Failures of blocking external collaborators (LLM, embedding, search).
#[derive(Debug, Clone, thiserror::Error)]
pub enum ExternalCallError {
    #[error("{service} unreachable: {reason}")]
    Unreachable { service: String, reason: String },

    #[error("{service} timed out after {timeout_ms}ms")]
    Timeout { service: String, timeout_ms: u64 },

    #[error("{service} returned an empty response")]
    EmptyResponse { service: String },
}

impl ExternalCallError {
    /// The collaborator that failed, for stage-level logging.
    pub fn service(&self) -> &str {
        match self {
            ExternalCallError::Unreachable { service, .. } => service,
            ExternalCallError::Timeout { service, .. } => service,
            ExternalCallError::EmptyResponse { service } => service,
        }
    }
}
