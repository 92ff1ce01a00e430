//! Fuzzy string ratios on the 0.0..=1.0 scale.
//!
//! `indel_ratio` is an insert/delete similarity built on the longest common
//! subsequence; `partial_ratio` is the best window alignment of the shorter
//! string inside the longer; `token_set_ratio` compares sorted unique-token
//! reconstructions so word order and duplication stop mattering.

use std::collections::BTreeSet;

/// Longest-common-subsequence length over chars, two-row DP.
fn lcs_len(a: &[char], b: &[char]) -> usize {
    if a.is_empty() || b.is_empty() {
        return 0;
    }
    let mut prev = vec![0usize; b.len() + 1];
    let mut curr = vec![0usize; b.len() + 1];
    for &ca in a {
        for (j, &cb) in b.iter().enumerate() {
            curr[j + 1] = if ca == cb {
                prev[j] + 1
            } else {
                prev[j + 1].max(curr[j])
            };
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prev[b.len()]
}

/// Insert/delete similarity: `2·lcs / (|a| + |b|)`. 1.0 for two empty strings
/// compared with each other is defined as 0.0 to keep scores conservative.
pub fn indel_ratio(a: &str, b: &str) -> f64 {
    let ac: Vec<char> = a.chars().collect();
    let bc: Vec<char> = b.chars().collect();
    let total = ac.len() + bc.len();
    if total == 0 {
        return 0.0;
    }
    2.0 * lcs_len(&ac, &bc) as f64 / total as f64
}

/// Best `indel_ratio` of the shorter string against every same-length window
/// of the longer one.
pub fn partial_ratio(a: &str, b: &str) -> f64 {
    let (short, long) = if a.chars().count() <= b.chars().count() {
        (a, b)
    } else {
        (b, a)
    };
    let sc: Vec<char> = short.chars().collect();
    let lc: Vec<char> = long.chars().collect();
    if sc.is_empty() || lc.is_empty() {
        return 0.0;
    }
    if sc.len() == lc.len() {
        return indel_ratio(short, long);
    }

    let window = sc.len();
    let mut best = 0.0f64;
    for start in 0..=(lc.len() - window) {
        let slice: String = lc[start..start + window].iter().collect();
        let shorter: String = sc.iter().collect();
        let r = indel_ratio(&shorter, &slice);
        if r > best {
            best = r;
        }
        if best >= 1.0 {
            break;
        }
    }
    best
}

fn word_set(s: &str) -> BTreeSet<String> {
    s.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(|w| w.to_string())
        .collect()
}

fn joined(set: &BTreeSet<String>) -> String {
    set.iter().cloned().collect::<Vec<_>>().join(" ")
}

/// Token-set similarity: compare the sorted intersection against each side's
/// sorted reconstruction and take the best ratio.
pub fn token_set_ratio(a: &str, b: &str) -> f64 {
    let sa = word_set(a);
    let sb = word_set(b);
    if sa.is_empty() || sb.is_empty() {
        return 0.0;
    }

    let inter: BTreeSet<String> = sa.intersection(&sb).cloned().collect();
    let only_a: BTreeSet<String> = sa.difference(&sb).cloned().collect();
    let only_b: BTreeSet<String> = sb.difference(&sa).cloned().collect();

    let base = joined(&inter);
    let combined_a = if base.is_empty() {
        joined(&only_a)
    } else if only_a.is_empty() {
        base.clone()
    } else {
        format!("{} {}", base, joined(&only_a))
    };
    let combined_b = if base.is_empty() {
        joined(&only_b)
    } else if only_b.is_empty() {
        base.clone()
    } else {
        format!("{} {}", base, joined(&only_b))
    };

    let mut best = indel_ratio(&combined_a, &combined_b);
    if !base.is_empty() {
        best = best
            .max(indel_ratio(&base, &combined_a))
            .max(indel_ratio(&base, &combined_b));
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_strings_score_one() {
        assert!((indel_ratio("transformer", "transformer") - 1.0).abs() < 1e-9);
        assert!((token_set_ratio("a b c", "c b a") - 1.0).abs() < 1e-9);
    }

    #[test]
    fn empty_inputs_score_zero() {
        assert_eq!(indel_ratio("", ""), 0.0);
        assert_eq!(partial_ratio("", "abc"), 0.0);
        assert_eq!(token_set_ratio("", "abc"), 0.0);
    }

    #[test]
    fn partial_ratio_finds_embedded_match() {
        let needle = "gradient descent";
        let hay = "we train the model with gradient descent and a warmup schedule";
        assert!(partial_ratio(needle, hay) > 0.95);
    }

    #[test]
    fn token_set_ignores_order_and_duplicates() {
        let a = "large language model";
        let b = "model language large large";
        assert!(token_set_ratio(a, b) > 0.95);
    }

    #[test]
    fn plural_variants_score_high() {
        let r = token_set_ratio("large language model", "large language models");
        assert!(r > 0.92, "got {r}");
    }

    #[test]
    fn unrelated_strings_score_low() {
        assert!(token_set_ratio("convolution kernel", "reward shaping") < 0.5);
    }
}
