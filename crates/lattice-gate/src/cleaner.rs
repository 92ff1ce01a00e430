//! Passage cleanup before scoring.

use std::sync::LazyLock;

use regex::Regex;

static CITATION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[\s*\d+(?:\s*,\s*\d+)*\s*\]").expect("citation regex"));

static SECTION_PREFIX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*\d+(?:\.\d+){1,4}\s*").expect("section prefix regex"));

static HYPHEN_WRAP_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\w)-\s+(\w)").expect("hyphen wrap regex"));

static WHITESPACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace regex"));

/// Clean one candidate passage:
/// - drop inline citation markers like `[12]` or `[3, 7]`
/// - drop a leading section-number prefix like `3.1 `
/// - rejoin hyphen line-wraps: `post- training` -> `post-training`
/// - collapse whitespace
pub fn clean_passage(raw: &str) -> String {
    let p = raw.trim();
    if p.is_empty() {
        return String::new();
    }

    let p = CITATION_RE.replace_all(p, "");
    let p = SECTION_PREFIX_RE.replace(&p, "");
    let p = HYPHEN_WRAP_RE.replace_all(&p, "$1-$2");
    WHITESPACE_RE.replace_all(&p, " ").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_citation_markers() {
        assert_eq!(
            clean_passage("The method works well [12] in practice [3, 7]."),
            "The method works well in practice ."
        );
    }

    #[test]
    fn strips_leading_section_numbers() {
        assert_eq!(clean_passage("3.1 Experimental setup"), "Experimental setup");
        // A bare top-level number is not a section prefix.
        assert_eq!(clean_passage("2024 was a busy year"), "2024 was a busy year");
    }

    #[test]
    fn heals_hyphen_line_wraps() {
        assert_eq!(clean_passage("post- training of models"), "post-training of models");
    }

    #[test]
    fn collapses_whitespace() {
        assert_eq!(clean_passage("a  b\n\tc"), "a b c");
    }

    #[test]
    fn empty_input_stays_empty() {
        assert_eq!(clean_passage("   "), "");
    }
}
