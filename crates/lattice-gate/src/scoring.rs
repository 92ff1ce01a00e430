//! Overlap scoring with a technique-density bonus.

use lattice_text::content_tokens;

/// Bonus per technique-vocabulary hit.
const TECHNIQUE_BONUS_PER_HIT: f64 = 0.35;
/// Soft cap on the total technique bonus.
const TECHNIQUE_BONUS_CAP: f64 = 3.0;

/// Method/metric vocabulary that signals evidence-rich passages. Multi-word
/// entries match as substrings of the lowercased passage.
const TECHNIQUE_HINTS: &[&str] = &[
    "zero-shot",
    "few-shot",
    "one-shot",
    "chain-of-thought",
    "cot",
    "persona",
    "explanatory",
    "explanation",
    "prompt",
    "prompting",
    "prompt engineering",
    "codebook",
    "automatic",
    "ablation",
    "baseline",
    "strategy",
    "strategies",
    "evaluation",
    "evaluated",
    "metric",
    "metrics",
    "accuracy",
    "precision",
    "recall",
    "f1",
    "confidence",
    "interval",
];

/// Base relevance: size of the token intersection between the expanded
/// question and the passage.
pub fn overlap_score(expanded_question: &str, passage: &str) -> f64 {
    let q = content_tokens(expanded_question);
    let p = content_tokens(passage);
    if q.is_empty() || p.is_empty() {
        return 0.0;
    }
    q.intersection(&p).count() as f64
}

/// Small bonus for passages dense in method/metric terms, so technique
/// listings survive generic questions.
pub fn technique_bonus(passage: &str) -> f64 {
    let toks = content_tokens(passage);
    if toks.is_empty() {
        return 0.0;
    }
    let low = passage.to_lowercase();

    let mut hits = 0usize;
    for hint in TECHNIQUE_HINTS {
        // Hyphenated and multi-word hints match as substrings; the tokenizer
        // splits them apart otherwise.
        let hit = if hint.contains(' ') || hint.contains('-') {
            low.contains(hint)
        } else {
            toks.contains(*hint)
        };
        if hit {
            hits += 1;
        }
    }
    (TECHNIQUE_BONUS_PER_HIT * hits as f64).min(TECHNIQUE_BONUS_CAP)
}
