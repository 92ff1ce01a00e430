//! Error taxonomy for the pipeline.
//!
//! `ExternalCallFailure` and `ConfigurationError` are the only fatal shapes;
//! malformed LLM output degrades through [`crate::llm_json::LlmJson`] and a
//! rejected candidate graph is a first-class result, not an error.

mod config_error;
mod external_call;
mod graph_error;
mod pipeline_error;

pub use config_error::ConfigError;
pub use external_call::ExternalCallError;
pub use graph_error::GraphError;
pub use pipeline_error::PipelineError;

/// Umbrella error for the whole workspace.
#[derive(Debug, thiserror::Error)]
pub enum LatticeError {
    #[error(transparent)]
    ExternalCall(#[from] ExternalCallError),

    #[error(transparent)]
    Graph(#[from] GraphError),

    #[error(transparent)]
    Pipeline(#[from] PipelineError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Convenience alias used across the workspace.
pub type LatticeResult<T> = Result<T, LatticeError>;
