//! Lowercase alphanumeric tokenization with an instruction-word stoplist.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;

/// Words that are usually instructions to the system, not topic content.
/// Filtered out before any overlap scoring.
pub const INSTRUCTION_STOPWORDS: &[&str] = &[
    "extract", "please", "concept", "concepts", "relation", "relations", "knowledge", "graph",
    "meaningful", "clear", "idea", "put", "make", "give", "generate", "build", "need", "want",
    "related", "topic", "about",
];

static WORD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[a-z0-9]+(?:\.[a-z0-9]+)*").expect("word regex"));

static PAREN_ACRONYM_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(([A-Za-z]{2,8})\)").expect("acronym regex"));

static CAPS_TOKEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[A-Z]{2,8}\b").expect("caps regex"));

/// All lowercase alphanumeric runs (internal dots kept, e.g. version numbers).
pub fn tokens(text: &str) -> Vec<String> {
    let lower = text.to_lowercase();
    WORD_RE.find_iter(&lower).map(|m| m.as_str().to_string()).collect()
}

/// Topic-bearing token set: length > 2, instruction stoplist removed.
pub fn content_tokens(text: &str) -> BTreeSet<String> {
    tokens(text)
        .into_iter()
        .filter(|t| t.len() > 2 && !INSTRUCTION_STOPWORDS.contains(&t.as_str()))
        .collect()
}

/// Jaccard similarity of two token sets. 0.0 when either is empty.
pub fn jaccard(a: &BTreeSet<String>, b: &BTreeSet<String>) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    let inter = a.intersection(b).count();
    let union = a.union(b).count();
    inter as f64 / union.max(1) as f64
}

/// Acronym surface forms of a label: parenthesized short alpha runs and
/// bare all-caps tokens, lowercased.
pub fn acronyms_of(label: &str) -> BTreeSet<String> {
    let mut out = BTreeSet::new();
    for cap in PAREN_ACRONYM_RE.captures_iter(label) {
        out.insert(cap[1].to_lowercase());
    }
    for m in CAPS_TOKEN_RE.find_iter(label) {
        out.insert(m.as_str().to_lowercase());
    }
    out
}

/// Whitespace word count.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokens_keep_version_dots() {
        let ts = tokens("GPT-4 scored 92.5 on v1.2");
        assert!(ts.contains(&"92.5".to_string()));
        assert!(ts.contains(&"v1.2".to_string()));
        assert!(ts.contains(&"gpt".to_string()));
    }

    #[test]
    fn content_tokens_drop_instruction_words() {
        let ts = content_tokens("please extract the knowledge graph about transformers");
        assert!(ts.contains("transformers"));
        assert!(!ts.contains("please"));
        assert!(!ts.contains("graph"));
    }

    #[test]
    fn short_tokens_are_dropped() {
        let ts = content_tokens("an ml ai system");
        assert!(!ts.contains("ml"));
        assert!(ts.contains("system"));
    }

    #[test]
    fn jaccard_of_disjoint_sets_is_zero() {
        let a: std::collections::BTreeSet<String> =
            ["alpha".to_string()].into_iter().collect();
        let b: std::collections::BTreeSet<String> =
            ["beta".to_string()].into_iter().collect();
        assert_eq!(jaccard(&a, &b), 0.0);
        assert_eq!(jaccard(&a, &a), 1.0);
    }

    #[test]
    fn acronyms_found_in_both_shapes() {
        let acs = acronyms_of("Trajectory Balance with Asynchrony (TBA)");
        assert!(acs.contains("tba"));
        let acs = acronyms_of("LLM post-training");
        assert!(acs.contains("llm"));
    }
}
