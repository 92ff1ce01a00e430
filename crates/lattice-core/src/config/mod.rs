//! Runtime configuration, loadable from TOML.

mod gate_config;
mod llm_config;
mod quality_config;

pub use gate_config::GateConfig;
pub use llm_config::LlmConfig;
pub use quality_config::QualityConfig;

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;
use crate::models::Tuning;

pub(crate) mod defaults {
    pub const DEFAULT_GATE_TOP_K: usize = 10;
    pub const DEFAULT_GATE_MIN_OVERLAP: f64 = 1.0;
    pub const DEFAULT_GATE_DIVERSIFY: bool = true;

    pub const DEFAULT_MIN_CONCEPTS: usize = 6;
    pub const DEFAULT_MIN_EDGES: usize = 1;
    pub const DEFAULT_REQUIRE_EVIDENCE: bool = true;
    pub const DEFAULT_MAX_GENERIC_RATIO: f64 = 0.45;
    pub const DEFAULT_MIN_RELATION_DIVERSITY: usize = 1;
    pub const DEFAULT_MAX_SINGLE_RELATION_RATIO: f64 = 0.55;
    pub const DEFAULT_MIN_QUESTION_ALIGNMENT_HITS: usize = 1;

    pub const DEFAULT_LLM_MODEL: &str = "default";
    pub const DEFAULT_LLM_TIMEOUT_S: u64 = 20;
    pub const DEFAULT_LLM_MAX_OUTPUT_TOKENS: u32 = 2048;

    pub const DEFAULT_GRAPH_PATH: &str = "data/concept_graph.json";
}

/// Top-level configuration for a pipeline process.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LatticeConfig {
    pub llm: LlmConfig,
    pub gate: GateConfig,
    pub quality: QualityConfig,
    /// Seed tuning for fresh (non-retry) runs.
    pub tuning: Tuning,
    /// Where the persistent concept graph is saved.
    pub graph_path: PathBuf,
}

impl Default for LatticeConfig {
    fn default() -> Self {
        Self {
            llm: LlmConfig::default(),
            gate: GateConfig::default(),
            quality: QualityConfig::default(),
            tuning: Tuning::default(),
            graph_path: PathBuf::from(defaults::DEFAULT_GRAPH_PATH),
        }
    }
}

impl LatticeConfig {
    /// Load from a TOML file. Missing keys take their defaults.
    pub fn from_toml(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFailed {
            reason: e.to_string(),
        })?;
        toml::from_str(&raw).map_err(|e| ConfigError::ParseFailed {
            reason: e.to_string(),
        })
    }

    /// Startup validation. Missing credentials are fatal here and only here.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.llm.api_key.as_deref().unwrap_or("").trim().is_empty() {
            return Err(ConfigError::MissingApiKey);
        }
        if self.tuning.temperature < 0.0 {
            return Err(ConfigError::InvalidValue {
                field: "tuning.temperature".to_string(),
                reason: "must be non-negative".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_api_key_is_fatal() {
        let cfg = LatticeConfig::default();
        assert!(matches!(cfg.validate(), Err(ConfigError::MissingApiKey)));
    }

    #[test]
    fn loads_partial_toml_with_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lattice.toml");
        std::fs::write(&path, "[llm]\napi_key = \"k\"\n\n[gate]\ntop_k = 4\n").unwrap();

        let cfg = LatticeConfig::from_toml(&path).unwrap();
        assert_eq!(cfg.gate.top_k, 4);
        assert!(cfg.gate.diversify);
        assert_eq!(cfg.quality.min_concepts, 6);
        cfg.validate().unwrap();
    }
}
