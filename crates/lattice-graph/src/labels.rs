//! Noise and genericity predicates for candidate concept labels.

use std::sync::LazyLock;

use lattice_text::tokens;
use regex::Regex;

static URL_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"https?://\S+").expect("url regex"));

static DOI_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b10\.\d{4,9}/\S+").expect("doi regex"));

static CITATION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[\s*\d+(?:\s*,\s*\d+)*\s*\]").expect("citation regex"));

static SECTION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+(\.\d+)+$").expect("section regex"));

static VENUE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(neurips|nips|icml|iclr|cvpr|eccv|iccv|acl|emnlp|naacl|ijcai|aaai|kdd|icra|proceedings|conference)\b|(?i)\bjournal of\b",
    )
    .expect("venue regex")
});

static UPPER_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[A-Z]").expect("upper regex"));

/// Single words too generic to stand alone as a concept.
pub const GENERIC_TOKENS: &[&str] = &[
    "learning", "training", "model", "method", "approach", "framework", "system", "algorithm",
    "experiment", "result", "analysis", "performance", "throughput", "scalability", "variance",
    "exploration", "policy", "objective", "task",
];

const OPINION_TOKENS: &[&str] = &[
    "cute", "helpful", "amazing", "awesome", "great", "bad", "good", "nice", "better", "best",
    "worst", "fantastic", "terrible",
];

/// Labels that name the extraction machinery instead of the subject matter.
const META_LABELS: &[&str] = &[
    "knowledge graph", "knowledge-graph", "graph", "relations", "relation", "concept", "concepts",
    "node", "nodes", "edge", "edges", "meaningful", "clear idea", "please", "extract",
];

/// Bibliographic junk: URLs, DOIs, citation markers, bare section numbers,
/// venue names.
pub fn is_noise_label(label: &str) -> bool {
    let s = label.trim();
    if s.is_empty() {
        return true;
    }
    URL_RE.is_match(s)
        || DOI_RE.is_match(s)
        || CITATION_RE.is_match(s)
        || SECTION_RE.is_match(s)
        || VENUE_RE.is_match(s)
}

/// A lone generic/opinion word, or a short lowercase fragment.
pub fn is_too_generic(label: &str) -> bool {
    let toks = tokens(label);
    if toks.is_empty() {
        return true;
    }
    if toks.len() == 1 {
        let t = toks[0].as_str();
        if GENERIC_TOKENS.contains(&t) || OPINION_TOKENS.contains(&t) {
            return true;
        }
        if t.len() <= 3 && !UPPER_RE.is_match(label) {
            return true;
        }
    }
    false
}

/// A dangling hyphen shard like "post-" or "-based".
pub fn is_hyphen_fragment(label: &str) -> bool {
    let s = label.trim().to_lowercase();
    if s.is_empty() {
        return false;
    }
    let bare = s.trim_matches('-');
    if (s.starts_with('-') || s.ends_with('-')) && bare.chars().all(|c| c.is_ascii_lowercase()) && bare.len() >= 2
    {
        return true;
    }
    s.len() <= 6 && s.contains('-') && tokens(&s).len() <= 1
}

/// Labels an extractor must never emit: meta words, section numbers, hyphen
/// shards, lone generic or trivial tokens.
pub fn is_unusable_concept(label: &str) -> bool {
    let toks = tokens(label);
    if toks.is_empty() {
        return true;
    }
    let low = label.trim().to_lowercase();
    if META_LABELS.contains(&low.as_str()) {
        return true;
    }
    if SECTION_RE.is_match(label.trim()) {
        return true;
    }
    if is_hyphen_fragment(label) {
        return true;
    }
    if toks.len() == 1 {
        let t = toks[0].as_str();
        if GENERIC_TOKENS.contains(&t)
            || OPINION_TOKENS.contains(&t)
            || t.len() <= 2
            || t.chars().all(|c| c.is_ascii_digit())
        {
            return true;
        }
    }
    false
}
