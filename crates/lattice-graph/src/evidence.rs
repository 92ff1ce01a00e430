//! Evidence-grounding checks for candidate edges.

use std::collections::BTreeSet;

use lattice_text::{acronyms_of, tokens};

/// Verbs whose presence distinguishes a claim from a paper title.
const COMMON_VERBS: &[&str] = &[
    "is", "are", "was", "were",
    "use", "uses", "using",
    "enable", "enables", "enabled",
    "improve", "improves", "improved",
    "reduce", "reduces", "reduced",
    "increase", "increases", "increased",
    "replace", "replaces", "replaced",
    "compare", "compares", "compared",
    "outperform", "outperforms", "outperformed",
    "depend", "depends", "depended",
    "apply", "applies", "applied",
    "decouple", "decouples", "decoupled",
    "stabilize", "stabilizes", "stabilized",
    "require", "requires", "required",
    "measure", "measures", "measured",
    "evaluate", "evaluates", "evaluated",
    "produce", "produces", "produced",
    "aggregate", "aggregates", "aggregated",
    "extend", "extends", "extended",
];

/// Token set used for grounding checks: topic tokens plus acronym forms.
pub fn grounding_tokens(text: &str) -> BTreeSet<String> {
    let mut out: BTreeSet<String> = tokens(text).into_iter().filter(|t| t.len() > 2).collect();
    out.extend(acronyms_of(text));
    out
}

/// Short, verbless, or heading-shaped snippets are titles, not claims.
pub fn is_title_like_evidence(evidence: &str) -> bool {
    let raw = evidence.trim();
    if raw.is_empty() {
        return true;
    }
    let toks = tokens(raw);
    if toks.len() < 4 {
        return true;
    }
    if !toks.iter().any(|t| COMMON_VERBS.contains(&t.as_str())) {
        return true;
    }
    raw.contains(':') && toks.len() >= 8
}

/// Strict grounding: the evidence must cover both endpoints, with at least
/// `min_hits` endpoint tokens in total.
pub fn evidence_overlap_ok(source: &str, target: &str, evidence: &str, min_hits: usize) -> bool {
    let src = grounding_tokens(source);
    let tgt = grounding_tokens(target);
    let ev = grounding_tokens(evidence);
    if src.is_empty() || tgt.is_empty() || ev.is_empty() {
        return false;
    }
    let src_hits = src.intersection(&ev).count();
    let tgt_hits = tgt.intersection(&ev).count();
    src_hits > 0 && tgt_hits > 0 && src_hits + tgt_hits >= min_hits
}

/// Soft grounding: the evidence touches at least one endpoint.
pub fn evidence_mentions_any(source: &str, target: &str, evidence: &str) -> bool {
    let ev = grounding_tokens(evidence);
    if ev.is_empty() {
        return false;
    }
    !grounding_tokens(source).is_disjoint(&ev) || !grounding_tokens(target).is_disjoint(&ev)
}

/// Whether the evidence plausibly contains this label. Used only to decide
/// whether a missing endpoint may be auto-added.
pub fn evidence_mentions_label(label: &str, evidence: &str) -> bool {
    let lbl_low = label.trim().to_lowercase();
    if lbl_low.is_empty() || evidence.is_empty() {
        return false;
    }
    if lbl_low.len() >= 4 && evidence.to_lowercase().contains(&lbl_low) {
        return true;
    }
    let ev = grounding_tokens(evidence);
    let lbl = grounding_tokens(label);
    if lbl.is_empty() || ev.is_empty() {
        return false;
    }
    !lbl.is_disjoint(&ev)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn titles_are_rejected() {
        assert!(is_title_like_evidence(""));
        assert!(is_title_like_evidence("Attention Mechanisms Survey"));
        assert!(is_title_like_evidence(
            "BERT: pre-training of deep bidirectional transformers for language understanding"
        ));
        assert!(!is_title_like_evidence(
            "LoRA reduces trainable parameters by freezing the base model"
        ));
    }

    #[test]
    fn strict_overlap_needs_both_endpoints() {
        let ev = "LoRA reduces trainable parameters compared to full fine-tuning";
        assert!(evidence_overlap_ok("LoRA", "trainable parameters", ev, 2));
        assert!(!evidence_overlap_ok("LoRA", "diffusion sampler", ev, 2));
    }

    #[test]
    fn soft_check_needs_one_endpoint() {
        let ev = "the adapter layers are trained while the backbone stays frozen";
        assert!(evidence_mentions_any("adapter layers", "quantum computing", ev));
        assert!(!evidence_mentions_any("diffusion", "quantum computing", ev));
    }

    #[test]
    fn label_mention_accepts_substrings_and_acronyms() {
        assert!(evidence_mentions_label(
            "fine-tuning",
            "parameter efficient fine-tuning is widely used"
        ));
        assert!(evidence_mentions_label("LoRA", "LoRA is applied to attention weights"));
        assert!(!evidence_mentions_label("MMR", "the passages were scored by overlap"));
    }
}
