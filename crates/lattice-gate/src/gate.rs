//! The gate itself: clean, expand, score, filter, diversify.

use tracing::debug;

use crate::cleaner::clean_passage;
use crate::expansion::expand_question;
use crate::mmr::select_diverse;
use crate::scoring::{overlap_score, technique_bonus};

/// Passages that survived the gate, with their relevance scores in the same
/// order.
#[derive(Debug, Clone, PartialEq)]
pub struct GateOutcome {
    pub passages: Vec<String>,
    pub scores: Vec<f64>,
}

impl GateOutcome {
    fn empty() -> Self {
        GateOutcome {
            passages: Vec::new(),
            scores: Vec::new(),
        }
    }
}

/// Gate raw candidate passages against a question.
///
/// Cleans each passage, scores it as token overlap with the synonym-expanded
/// question plus a technique-density bonus, keeps those at or above
/// `min_overlap` (all of them when none qualify, so a weak batch still yields
/// evidence), and picks the final `top_k` greedily for diversity when
/// `diversify` is set.
pub fn gate_passages(
    question: &str,
    passages: &[String],
    top_k: usize,
    min_overlap: f64,
    diversify: bool,
) -> GateOutcome {
    let cleaned: Vec<String> = passages
        .iter()
        .map(|p| clean_passage(p))
        .filter(|p| !p.is_empty())
        .collect();
    if cleaned.is_empty() || top_k == 0 {
        return GateOutcome::empty();
    }

    let expanded = expand_question(question);

    let mut scored: Vec<(String, f64)> = cleaned
        .into_iter()
        .map(|p| {
            let score = overlap_score(&expanded, &p) + technique_bonus(&p);
            (p, score)
        })
        .collect();
    // Stable sort keeps the input order among ties.
    scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

    let qualifying: Vec<(String, f64)> = scored
        .iter()
        .filter(|(_, s)| *s >= min_overlap)
        .cloned()
        .collect();
    let pool = if qualifying.is_empty() {
        debug!(min_overlap, "no passage met the overlap floor, keeping full set");
        scored
    } else {
        qualifying
    };

    let picked = if diversify {
        select_diverse(&pool, top_k)
    } else {
        pool.into_iter().take(top_k).collect()
    };

    debug!(selected = picked.len(), top_k, "passage gate complete");

    let (passages, scores) = picked.into_iter().unzip();
    GateOutcome { passages, scores }
}
