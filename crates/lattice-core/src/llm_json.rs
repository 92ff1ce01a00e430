//! Defensive parsing of free-form LLM output.
//!
//! Parse failure never crosses a component boundary as an error: the result
//! is a tagged value every call site can default from.

use serde_json::Value;

/// Outcome of parsing a raw completion as JSON.
#[derive(Debug, Clone, PartialEq)]
pub enum LlmJson {
    /// The whole reply parsed directly.
    Parsed(Value),
    /// Only an outermost-brace substring parsed; the rest was noise.
    Salvaged(Value),
    /// Nothing parseable was found.
    Empty,
}

impl LlmJson {
    /// Parse a raw completion: strip code fences, try a direct parse, then
    /// the outermost `{...}` substring.
    pub fn parse(raw: &str) -> Self {
        let text = strip_fences(raw.trim());
        if text.is_empty() {
            return LlmJson::Empty;
        }

        if let Ok(v) = serde_json::from_str::<Value>(text) {
            return LlmJson::Parsed(v);
        }

        if let (Some(start), Some(end)) = (text.find('{'), text.rfind('}')) {
            if end > start {
                if let Ok(v) = serde_json::from_str::<Value>(&text[start..=end]) {
                    return LlmJson::Salvaged(v);
                }
            }
        }

        LlmJson::Empty
    }

    pub fn into_value(self) -> Option<Value> {
        match self {
            LlmJson::Parsed(v) | LlmJson::Salvaged(v) => Some(v),
            LlmJson::Empty => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, LlmJson::Empty)
    }
}

/// Drop leading/trailing markdown code fences (```json ... ```).
fn strip_fences(text: &str) -> &str {
    let mut t = text;
    if let Some(rest) = t.strip_prefix("```") {
        let rest = rest.strip_prefix("json").or_else(|| rest.strip_prefix("JSON")).unwrap_or(rest);
        t = rest.trim_start();
    }
    if let Some(rest) = t.strip_suffix("```") {
        t = rest.trim_end();
    }
    t
}

/// String items of an array field, dropping non-strings.
pub fn string_list(value: &Value, key: &str) -> Vec<String> {
    value
        .get(key)
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(|x| x.as_str())
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect()
        })
        .unwrap_or_default()
}
