//! Label normalization, canonicalization, and node typing.

use std::sync::LazyLock;

use lattice_core::constants::MAX_CANONICAL_LABEL_CHARS;
use regex::Regex;

static HYPHEN_WRAP_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\w)-\s+(\w)").expect("hyphen wrap regex"));

static WHITESPACE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").expect("ws regex"));

static VERSION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[vV]?\d+(\.\d+)+\b|\b[vV]\d+\b").expect("version regex"));

static CAPS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b[A-Z]{2,8}\b").expect("caps"));

/// Leading words that carry no identity.
const WEAK_MODIFIERS: &[&str] = &[
    "a", "an", "the", "this", "these", "our", "novel", "various", "new", "several", "different",
    "using", "proposed",
];

/// Trailing generic words dropped from display labels.
const WEAK_TRAILING: &[&str] = &[
    "method", "methods", "approach", "approaches", "framework", "frameworks", "technique",
    "techniques", "system", "systems", "model", "models",
];

/// Node identity: lowercase, heal hyphen line-wraps, strip everything outside
/// `[a-z0-9\-_/. ]`, collapse whitespace. Idempotent.
pub fn normalize_label(raw: &str) -> String {
    let lower = raw.trim().to_lowercase();
    let kept: String = lower
        .chars()
        .map(|c| {
            if matches!(c, 'a'..='z' | '0'..='9' | '-' | '_' | '/' | '.') {
                c
            } else {
                ' '
            }
        })
        .collect();
    let healed = HYPHEN_WRAP_RE.replace_all(&kept, "$1-$2");
    WHITESPACE_RE.replace_all(&healed, " ").trim().to_string()
}

/// Display label: preserve case and acronyms, drop weak leading modifiers
/// and weak trailing generics, bound the length.
pub fn canonical_label(raw: &str) -> String {
    let healed = HYPHEN_WRAP_RE.replace_all(raw.trim(), "$1-$2");
    let collapsed = WHITESPACE_RE.replace_all(&healed, " ");

    let mut words: Vec<&str> = collapsed.split(' ').filter(|w| !w.is_empty()).collect();
    while words.len() > 1 && WEAK_MODIFIERS.contains(&words[0].to_lowercase().as_str()) {
        words.remove(0);
    }
    while words.len() > 1 && WEAK_TRAILING.contains(&words[words.len() - 1].to_lowercase().as_str())
    {
        words.pop();
    }

    let label = words.join(" ");
    let label = if label.is_empty() { collapsed.trim().to_string() } else { label };
    label.chars().take(MAX_CANONICAL_LABEL_CHARS).collect()
}

/// Heuristic preference between two display labels for the same node.
/// Rewards 2-6 word phrases and scientific shapes (acronyms, CamelCase,
/// version numbers); penalizes leading filler and run-on phrases.
pub fn readability_score(label: &str) -> f64 {
    let words: Vec<&str> = label.split_whitespace().collect();
    if words.is_empty() {
        return f64::NEG_INFINITY;
    }

    let mut score = 0.0;
    match words.len() {
        2..=6 => score += 2.0,
        1 => score += 0.5,
        n if n > 8 => score -= 2.0,
        _ => {}
    }

    if WEAK_MODIFIERS.contains(&words[0].to_lowercase().as_str()) {
        score -= 1.5;
    }
    if CAPS_RE.is_match(label) {
        score += 1.0;
    }
    if words.iter().any(|w| {
        w.chars().next().is_some_and(|c| c.is_uppercase())
            && w.chars().skip(1).any(|c| c.is_uppercase())
            && w.chars().any(|c| c.is_lowercase())
    }) {
        score += 1.0;
    }
    if VERSION_RE.is_match(label) {
        score += 0.5;
    }
    score
}

/// Pick the better display label on a merge. Ties keep the longer form.
pub fn choose_canonical<'a>(existing: &'a str, incoming: &'a str) -> &'a str {
    let e = readability_score(existing);
    let i = readability_score(incoming);
    if i > e || (i == e && incoming.len() > existing.len()) {
        incoming
    } else {
        existing
    }
}

/// First match wins: dataset, metric, task, method, model; else "concept".
pub fn infer_node_type(label: &str) -> &'static str {
    const LEXICON: &[(&str, &[&str])] = &[
        ("dataset", &["dataset", "corpus", "benchmark"]),
        ("metric", &["accuracy", "precision", "recall", "f1", "bleu", "rouge", "perplexity", "metric", "auc"]),
        ("task", &["classification", "translation", "summarization", "detection", "segmentation", "question answering", "retrieval", "task"]),
        ("method", &["method", "algorithm", "training", "tuning", "prompting", "optimization", "regularization", "descent", "adaptation", "distillation"]),
        ("model", &["model", "network", "transformer", "encoder", "decoder", "gpt", "bert", "llama", "llm"]),
    ];

    let low = label.to_lowercase();
    for (node_type, keywords) in LEXICON {
        if keywords.iter().any(|k| low.contains(k)) {
            return node_type;
        }
    }
    "concept"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_is_idempotent() {
        for raw in ["  Large  Language Model ", "post- training §3", "A/B testing!"] {
            let once = normalize_label(raw);
            assert_eq!(normalize_label(&once), once, "not idempotent for {raw:?}");
        }
    }

    #[test]
    fn normalize_strips_and_lowers() {
        assert_eq!(normalize_label("Large   Language Model!"), "large language model");
        assert_eq!(normalize_label("post- training"), "post-training");
    }

    #[test]
    fn canonical_drops_filler() {
        assert_eq!(canonical_label("a novel retrieval framework"), "retrieval");
        assert_eq!(canonical_label("LoRA fine- tuning"), "LoRA fine-tuning");
    }

    #[test]
    fn canonical_keeps_single_words() {
        assert_eq!(canonical_label("model"), "model");
    }

    #[test]
    fn readability_prefers_acronym_forms() {
        assert!(
            readability_score("Low-Rank Adaptation (LoRA)")
                > readability_score("the various proposed low rank adaptation ideas that exist")
        );
    }

    #[test]
    fn node_type_lexicon_first_match_wins() {
        assert_eq!(infer_node_type("ImageNet dataset"), "dataset");
        assert_eq!(infer_node_type("top-1 accuracy"), "metric");
        assert_eq!(infer_node_type("large language model"), "model");
        assert_eq!(infer_node_type("beam search"), "concept");
    }
}
