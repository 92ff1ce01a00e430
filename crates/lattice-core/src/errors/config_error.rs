/// Startup-only configuration errors. Never raised after initialization.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing LLM API key (set llm.api_key)")]
    MissingApiKey,

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },

    #[error("failed to read config file: {reason}")]
    ReadFailed { reason: String },

    #[error("failed to parse config file: {reason}")]
    ParseFailed { reason: String },
}
