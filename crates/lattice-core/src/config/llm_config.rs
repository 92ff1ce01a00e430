use serde::{Deserialize, Serialize};

use super::defaults;

/// Completion-service configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    pub model: String,
    /// Credential checked once at startup; absence is a fatal ConfigError.
    pub api_key: Option<String>,
    /// Per-call timeout in seconds. Every external call carries it.
    pub timeout_s: u64,
    pub max_output_tokens: u32,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            model: defaults::DEFAULT_LLM_MODEL.to_string(),
            api_key: None,
            timeout_s: defaults::DEFAULT_LLM_TIMEOUT_S,
            max_output_tokens: defaults::DEFAULT_LLM_MAX_OUTPUT_TOKENS,
        }
    }
}

impl LlmConfig {
    pub fn timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.timeout_s)
    }
}
