//! Node resolution: exact id match first, then fuzzy token-set matching.

use lattice_core::constants::NODE_MATCH_THRESHOLD;
use lattice_text::token_set_ratio;

/// Penalty applied to very short match targets, which fuzz high too easily.
const SHORT_TARGET_PENALTY: f64 = 5.0;
const SHORT_TARGET_LEN: usize = 6;

/// Resolve a normalized label against existing node ids.
///
/// Exact match wins outright. Otherwise the best fuzzy candidate at or above
/// the threshold is reused; labels shorter than 4 chars never fuzzy-match
/// (an acronym must match exactly).
pub fn resolve_node_id(normalized: &str, existing_ids: &[String]) -> Option<String> {
    if normalized.is_empty() {
        return None;
    }
    if existing_ids.iter().any(|id| id == normalized) {
        return Some(normalized.to_string());
    }
    if normalized.len() < 4 {
        return None;
    }

    let mut best: Option<(&String, f64)> = None;
    for id in existing_ids {
        let mut score = token_set_ratio(normalized, id) * 100.0;
        if id.len() < SHORT_TARGET_LEN {
            score -= SHORT_TARGET_PENALTY;
        }
        if best.as_ref().map_or(true, |(_, b)| score > *b) {
            best = Some((id, score));
        }
    }

    best.and_then(|(id, score)| {
        (score >= NODE_MATCH_THRESHOLD as f64).then(|| id.clone())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn exact_match_wins() {
        let existing = ids(&["large language model", "gradient descent"]);
        assert_eq!(
            resolve_node_id("gradient descent", &existing),
            Some("gradient descent".to_string())
        );
    }

    #[test]
    fn plural_variant_fuzzy_matches() {
        let existing = ids(&["large language model"]);
        assert_eq!(
            resolve_node_id("large language models", &existing),
            Some("large language model".to_string())
        );
    }

    #[test]
    fn short_labels_never_fuzzy_match() {
        let existing = ids(&["lori"]);
        assert_eq!(resolve_node_id("lor", &existing), None);
    }

    #[test]
    fn unrelated_labels_stay_separate() {
        let existing = ids(&["large language model"]);
        assert_eq!(resolve_node_id("diffusion sampler", &existing), None);
    }
}
