//! Greedy maximal-marginal-relevance selection over scored passages.

use std::collections::BTreeSet;

use lattice_text::{content_tokens, jaccard};

/// Relevance weight; `1 - LAMBDA` weights redundancy.
const LAMBDA: f64 = 0.65;

/// Select up to `top_k` passages: highest score first, then repeatedly the
/// passage maximizing `λ·score − (1−λ)·max_jaccard_to_selected`.
///
/// Input must already be sorted by score descending. `top_k <= 1` skips the
/// redundancy term entirely.
pub fn select_diverse(scored: &[(String, f64)], top_k: usize) -> Vec<(String, f64)> {
    if scored.is_empty() || top_k == 0 {
        return Vec::new();
    }
    if top_k == 1 {
        return scored[..1].to_vec();
    }

    let token_sets: Vec<BTreeSet<String>> =
        scored.iter().map(|(p, _)| content_tokens(p)).collect();

    let mut selected: Vec<usize> = vec![0];
    let mut remaining: Vec<usize> = (1..scored.len()).collect();

    while !remaining.is_empty() && selected.len() < top_k {
        let mut best_pos = 0usize;
        let mut best_mmr = f64::NEG_INFINITY;

        for (pos, &idx) in remaining.iter().enumerate() {
            let max_sim = selected
                .iter()
                .map(|&s| jaccard(&token_sets[idx], &token_sets[s]))
                .fold(0.0f64, f64::max);
            let mmr = LAMBDA * scored[idx].1 - (1.0 - LAMBDA) * max_sim;
            if mmr > best_mmr {
                best_mmr = mmr;
                best_pos = pos;
            }
        }

        selected.push(remaining.remove(best_pos));
    }

    selected.into_iter().map(|i| scored[i].clone()).collect()
}
