//! Question expansion with topic synonyms.
//!
//! Short queries often use an abbreviation where passages use the long form
//! ("LoRA" vs "low-rank adaptation"); appending fixed synonym hints keeps
//! overlap gating usable for them. Hints only, never new claims.

/// Topic trigger -> synonym hints. Triggered by substring match on the
/// lowercased question.
fn synonym_table() -> &'static [(&'static str, &'static [&'static str])] {
    &[
        (
            "lora",
            &[
                "low rank adaptation",
                "low-rank adaptation",
                "parameter efficient fine tuning",
                "peft",
                "adapter",
                "rank",
            ],
        ),
        ("gpt", &["llm", "large language model", "transformer"]),
        (
            "llm",
            &["large language model", "transformer", "language model"],
        ),
        (
            "prompt",
            &[
                "zero-shot",
                "few-shot",
                "persona prompting",
                "chain-of-thought",
                "explanatory prompting",
                "automatic prompt engineering",
                "evaluation metrics",
            ],
        ),
        (
            "rag",
            &[
                "retrieval augmented generation",
                "retrieval-augmented",
                "vector search",
                "grounding",
                "context window",
            ],
        ),
        (
            "reinforcement",
            &[
                "reward",
                "policy gradient",
                "off-policy",
                "replay buffer",
                "value network",
            ],
        ),
        (
            "diffusion",
            &["denoising", "noise schedule", "latent space", "sampling steps"],
        ),
        (
            "fine-tun",
            &["fine tuning", "post-training", "adaptation", "transfer learning"],
        ),
    ]
}

/// Expand a question with synonym hints for every triggered topic keyword.
/// Returns the question unchanged when nothing triggers.
pub fn expand_question(question: &str) -> String {
    let q = question.trim();
    let low = q.to_lowercase();

    let mut expansions: Vec<&str> = Vec::new();
    for (trigger, hints) in synonym_table() {
        if low.contains(trigger) {
            expansions.extend_from_slice(hints);
        }
    }

    if expansions.is_empty() {
        return q.to_string();
    }
    format!("{} {}", q, expansions.join(" "))
}
