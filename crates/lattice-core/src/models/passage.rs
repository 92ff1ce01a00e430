use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A retrieved evidence snippet. Immutable once produced by retrieval.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Passage {
    pub text: String,
    /// Relevance score assigned by the retrieval engine (or the gate).
    pub score: f64,
    /// Source metadata: title, year, section, origin document, etc.
    #[serde(default)]
    pub metadata: BTreeMap<String, serde_json::Value>,
}

impl Passage {
    pub fn new(text: impl Into<String>, score: f64) -> Self {
        Self {
            text: text.into(),
            score,
            metadata: BTreeMap::new(),
        }
    }

    /// A metadata field rendered as a plain string, if present.
    pub fn meta_str(&self, key: &str) -> Option<String> {
        self.metadata.get(key).map(|v| match v {
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        })
    }
}
