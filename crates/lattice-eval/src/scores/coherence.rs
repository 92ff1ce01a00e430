//! Structural coherence of the answer text.

use lattice_text::{sentencize, word_count};

/// Discourse connectives that signal an argued, structured answer. Matched
/// as substrings of the lowercased text.
const CONNECTIVES: &[&str] = &[
    "however",
    "therefore",
    "moreover",
    "furthermore",
    "in contrast",
    "consequently",
    "additionally",
    "whereas",
    "as a result",
    "on the other hand",
];

/// Length-gated base score plus bonuses for sentence development and
/// discourse connectives, capped at 1.0.
pub fn coherence_score(answer: &str) -> f64 {
    let words = word_count(answer);
    if words == 0 {
        return 0.0;
    }

    let mut score: f64 = if words < 40 {
        0.35
    } else if words < 90 {
        0.55
    } else {
        0.7
    };

    if sentencize(answer, 8).len() >= 3 {
        score += 0.15;
    }

    let low = answer.to_lowercase();
    let hits = CONNECTIVES.iter().filter(|c| low.contains(*c)).count();
    if hits >= 2 {
        score += 0.10;
    }
    if hits >= 4 {
        score += 0.05;
    }

    score.min(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_answer_scores_zero() {
        assert_eq!(coherence_score(""), 0.0);
        assert_eq!(coherence_score("   "), 0.0);
    }

    #[test]
    fn short_answer_gets_the_low_base() {
        assert_eq!(coherence_score("a terse reply"), 0.35);
    }

    #[test]
    fn developed_answer_earns_bonuses() {
        let answer = "The first mechanism routes tokens through attention layers in sequence. \
                      However, the second mechanism compresses the context before attending to it. \
                      Therefore, the trade-off is between fidelity and cost of the representation. \
                      Moreover, both approaches degrade gracefully as the context length grows. \
                      In contrast, recurrent models keep a fixed-size state regardless of length. \
                      Consequently, the choice depends on the expected input distribution in practice.";
        let score = coherence_score(answer);
        // base 0.55 + long-sentence bonus 0.15 + connective bonuses 0.15
        assert!((score - 0.85).abs() < 1e-9, "got {score}");
    }

    #[test]
    fn never_exceeds_one() {
        let long = "However the result holds and therefore the claim follows in every case. "
            .repeat(20);
        assert!(coherence_score(&long) <= 1.0);
    }
}
