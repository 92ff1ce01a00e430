//! Sentence splitting for score computation.

use std::sync::LazyLock;

use regex::Regex;

static SPLIT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[.!?]\s+|\n+").expect("sentence split regex"));

/// Split `text` into sentences, keeping only those with at least `min_words`
/// whitespace-separated words.
pub fn sentencize(text: &str, min_words: usize) -> Vec<String> {
    if text.trim().is_empty() {
        return Vec::new();
    }
    SPLIT_RE
        .split(text.trim())
        .map(str::trim)
        .filter(|s| !s.is_empty() && s.split_whitespace().count() >= min_words)
        .map(|s| s.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_terminators_and_newlines() {
        let text = "First sentence has exactly eight words in it. Second one is short.\nThird sentence also has exactly eight words here.";
        let sents = sentencize(text, 8);
        assert_eq!(sents.len(), 2);
    }

    #[test]
    fn empty_text_yields_no_sentences() {
        assert!(sentencize("", 8).is_empty());
        assert!(sentencize("   ", 8).is_empty());
    }

    #[test]
    fn min_words_zero_keeps_everything() {
        let sents = sentencize("One. Two. Three.", 1);
        assert_eq!(sents.len(), 3);
    }
}
