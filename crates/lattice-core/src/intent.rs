//! Classified purpose of a user question.

use serde::{Deserialize, Serialize};

/// The six intent categories the orchestrator routes on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    Summary,
    Comparison,
    Concepts,
    Gap,
    DeepAnalysis,
    Other,
}

impl Intent {
    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::Summary => "summary",
            Intent::Comparison => "comparison",
            Intent::Concepts => "concepts",
            Intent::Gap => "gap",
            Intent::DeepAnalysis => "deep_analysis",
            Intent::Other => "other",
        }
    }

    /// Parse a loosely formatted intent string (model output, API input).
    /// Unknown strings map to `Other`.
    pub fn parse_lenient(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "summary" | "summarize" | "summarization" => Intent::Summary,
            "comparison" | "compare" => Intent::Comparison,
            "concepts" | "concept" => Intent::Concepts,
            "gap" | "gap_analysis" | "limitations" => Intent::Gap,
            "deep_analysis" | "analysis" | "insight" => Intent::DeepAnalysis,
            _ => Intent::Other,
        }
    }
}

impl Default for Intent {
    fn default() -> Self {
        Intent::Summary
    }
}

impl std::fmt::Display for Intent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lenient_parse_maps_aliases() {
        assert_eq!(Intent::parse_lenient("Compare"), Intent::Comparison);
        assert_eq!(Intent::parse_lenient("gap_analysis"), Intent::Gap);
        assert_eq!(Intent::parse_lenient("???"), Intent::Other);
    }

    #[test]
    fn serde_uses_snake_case() {
        let json = serde_json::to_string(&Intent::DeepAnalysis).unwrap();
        assert_eq!(json, "\"deep_analysis\"");
    }
}
