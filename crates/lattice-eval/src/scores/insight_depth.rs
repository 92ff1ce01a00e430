//! Critical-thinking signal in the answer.

use lattice_text::word_count;

/// Keywords marking limitations, tensions, and open directions.
const KEY_TERMS: &[&str] = &[
    "limitation",
    "however",
    "gap",
    "challenge",
    "future",
    "trade-off",
    "contrast",
    "weakness",
];

/// Fraction of the critical-thinking vocabulary present (unique hits over 6,
/// capped at 1.0). A substantial answer with zero hits still gets a 0.2
/// floor rather than being scored as shallow as an empty one.
pub fn insight_depth_score(answer: &str) -> f64 {
    if answer.trim().is_empty() {
        return 0.0;
    }

    let low = answer.to_lowercase();
    let hits = KEY_TERMS.iter().filter(|k| low.contains(*k)).count();

    if hits == 0 {
        if word_count(answer) >= 120 {
            return 0.2;
        }
        return 0.0;
    }

    (hits as f64 / 6.0).min(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_answer_scores_zero() {
        assert_eq!(insight_depth_score(""), 0.0);
    }

    #[test]
    fn each_unique_term_counts_once() {
        let s = insight_depth_score("However, a limitation remains. However, the gap persists.");
        assert!((s - 3.0 / 6.0).abs() < 1e-9, "got {s}");
    }

    #[test]
    fn long_answer_without_terms_gets_the_floor() {
        let long = "plain descriptive sentence about the topic at hand ".repeat(20);
        assert_eq!(insight_depth_score(&long), 0.2);
    }

    #[test]
    fn caps_at_one() {
        let dense = "limitation however gap challenge future trade-off contrast weakness";
        assert_eq!(insight_depth_score(dense), 1.0);
    }
}
