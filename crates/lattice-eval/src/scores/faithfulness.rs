//! Sentence-level grounding of an answer in its evidence passages.

use lattice_text::{partial_ratio, sentencize, token_set_ratio};

/// For every substantial answer sentence (8+ words), take the best fuzzy
/// similarity against any passage, then average over sentences. Sentences
/// can be paraphrases of the evidence, so the partial and token-set ratios
/// are both tried and the higher one counts.
pub fn faithfulness_score(answer: &str, passages: &[String]) -> f64 {
    if answer.trim().is_empty() || passages.is_empty() {
        return 0.0;
    }

    let sentences = sentencize(answer, 8);
    if sentences.is_empty() {
        return 0.0;
    }

    let mut total = 0.0;
    for sentence in &sentences {
        let mut best = 0.0f64;
        for passage in passages {
            if passage.is_empty() {
                continue;
            }
            let score = partial_ratio(sentence, passage).max(token_set_ratio(sentence, passage));
            if score > best {
                best = score;
            }
        }
        total += best;
    }

    (total / sentences.len() as f64).min(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn passages(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn empty_inputs_score_zero() {
        assert_eq!(faithfulness_score("", &passages(&["some passage"])), 0.0);
        assert_eq!(faithfulness_score("an answer here", &[]), 0.0);
    }

    #[test]
    fn short_sentences_are_ignored() {
        // Every sentence is under 8 words, so nothing is scored.
        assert_eq!(
            faithfulness_score("Yes. It works. Very well.", &passages(&["anything at all"])),
            0.0
        );
    }

    #[test]
    fn verbatim_answer_scores_near_one() {
        let evidence = "low-rank adaptation freezes the base weights and trains small rank decomposition matrices";
        let score = faithfulness_score(evidence, &passages(&[evidence]));
        assert!(score > 0.99, "got {score}");
    }

    #[test]
    fn unrelated_answer_scores_low() {
        let score = faithfulness_score(
            "the recipe calls for two cups of flour and a pinch of salt today",
            &passages(&["gradient descent updates parameters along the negative gradient"]),
        );
        assert!(score < 0.6, "got {score}");
    }
}
