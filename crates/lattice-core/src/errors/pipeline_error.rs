use super::ExternalCallError;

/// Request-level failure: a stage's collaborator failed with no defined fallback.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("stage '{stage}' failed: {source}")]
    StageFailed {
        stage: &'static str,
        #[source]
        source: ExternalCallError,
    },
}

impl PipelineError {
    pub fn stage(stage: &'static str, source: ExternalCallError) -> Self {
        PipelineError::StageFailed { stage, source }
    }
}
