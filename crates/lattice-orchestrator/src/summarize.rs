//! The summarize stage: grounded answers over the gated passage window.
//!
//! Citations index into the prompt's passage window, so they are validated
//! against it and deduped before anything downstream sees them. Transport
//! failures propagate; malformed replies degrade to the raw text.

use std::time::Duration;

use lattice_core::errors::ExternalCallError;
use lattice_core::llm_json::{string_list, LlmJson};
use lattice_core::models::{Passage, SummaryOutcome};
use lattice_core::traits::ITextCompletion;
use lattice_core::Intent;
use tracing::info;

/// How many gated passages the prompt window holds.
pub const PASSAGE_WINDOW: usize = 8;
const PASSAGE_CLIP_CHARS: usize = 900;
const MAX_HIGHLIGHTS: usize = 8;
const RAW_ANSWER_CLIP_CHARS: usize = 2000;
const FALLBACK_TEMPERATURE: f64 = 0.4;

const NON_GROUNDED_NOTE: &str =
    "Note: No relevant passages were retrieved, so this is a general explanation (no paper citations).";
const PARTIAL_SUPPORT_NOTE: &str =
    "Note: The retrieved passages did not contain a direct answer; response may be partial.";

/// Numbered passage block with one metadata line per entry.
fn build_passages_block(passages: &[Passage]) -> String {
    passages
        .iter()
        .take(PASSAGE_WINDOW)
        .enumerate()
        .map(|(i, p)| {
            let text = clip_chars(p.text.trim(), PASSAGE_CLIP_CHARS);
            let meta = |key: &str| p.meta_str(key).unwrap_or_else(|| "unknown".to_string());
            format!(
                "[{i}] title={} | year={} | source={} | section={}\n{text}",
                meta("title"),
                meta("year"),
                meta("source"),
                meta("section"),
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn build_summarizer_prompt(
    question: &str,
    intent: Intent,
    sub_tasks: &[String],
    passages: &[Passage],
) -> String {
    let mode = match intent {
        Intent::Comparison => "comparison",
        _ => "summary",
    };
    let tasks_block = if sub_tasks.is_empty() {
        "0. (none)".to_string()
    } else {
        sub_tasks
            .iter()
            .take(6)
            .enumerate()
            .map(|(i, t)| format!("{}. {t}", i + 1))
            .collect::<Vec<_>>()
            .join("\n")
    };

    format!(
        "You are the summarizer of a grounded question-answering system.\n\n\
         GOAL: answer the question following the intent, addressing every\n\
         supported sub-task in order, one coherent paragraph each.\n\n\
         CONSTRAINTS:\n\
         - Handle sub-tasks one by one, in the exact order given; never merge two\n\
           into one paragraph and never label or number them in the answer.\n\
         - A sub-task the passages do not meaningfully support is silently skipped.\n\
         - Factual claims must be supported by the passages and carry inline\n\
           citations like [0] [2]; never invent citations.\n\
         - Explanatory context may be blended in, but must not introduce numbers,\n\
           benchmarks, datasets, or named methods absent from the passages.\n\
         - In comparison mode, contrast the approaches inside the same paragraph\n\
           (\"A does X, whereas B does Y\"); no standalone one-sided definitions.\n\
         - The \"citations\" field lists every unique index used in the answer.\n\n\
         Return JSON ONLY:\n\
         {{\n  \"answer\": \"text with [0] [2] citations where needed\",\n  \"highlights\": [\"...\"],\n  \"citations\": [0, 2]\n}}\n\n\
         Question:\n{question}\n\n\
         Intent: {mode}\n\n\
         Sub-tasks:\n{tasks_block}\n\n\
         Passages:\n{passages_block}",
        passages_block = build_passages_block(passages),
    )
}

fn build_fallback_prompt(question: &str) -> String {
    format!(
        "You are a helpful assistant.\n\n\
         The user asked:\n{question}\n\n\
         No evidence passages were retrieved from the document store.\n\
         - Give a helpful general explanation from general knowledge.\n\
         - Do NOT claim any paper said something.\n\
         - Keep it simple.\n\n\
         Return JSON ONLY:\n\
         {{\n  \"answer\": \"your answer\",\n  \"highlights\": [\"...\"],\n  \"citations\": []\n}}"
    )
}

/// Produce the summary for the gated passages, or a clearly marked
/// non-grounded answer when there are none.
pub fn run_summarizer(
    llm: &dyn ITextCompletion,
    question: &str,
    intent: Intent,
    sub_tasks: &[String],
    passages: &[Passage],
    temperature: f64,
    timeout: Duration,
) -> Result<SummaryOutcome, ExternalCallError> {
    if passages.is_empty() {
        let raw = llm.complete(&build_fallback_prompt(question), FALLBACK_TEMPERATURE, timeout)?;
        let mut outcome = parse_outcome(&raw);
        outcome.answer = with_note(NON_GROUNDED_NOTE, &outcome.answer);
        outcome.citations = Vec::new();
        info!(provider = llm.name(), "non-grounded fallback answer produced");
        return Ok(outcome);
    }

    let prompt = build_summarizer_prompt(question, intent, sub_tasks, passages);
    let raw = llm.complete(&prompt, temperature, timeout)?;
    let mut outcome = parse_outcome(&raw);

    let max_index = passages.len().min(PASSAGE_WINDOW) - 1;
    outcome.citations = normalize_citations(&outcome.citations, max_index);

    // Grounded but citation-less answers say so up front.
    if outcome.citations.is_empty() {
        outcome.answer = with_note(PARTIAL_SUPPORT_NOTE, &outcome.answer);
    }

    info!(
        provider = llm.name(),
        citations = outcome.citations.len(),
        highlights = outcome.highlights.len(),
        "summary produced"
    );
    Ok(outcome)
}

/// Parse the model reply; a non-JSON reply becomes the raw answer text.
fn parse_outcome(raw: &str) -> SummaryOutcome {
    match LlmJson::parse(raw).into_value() {
        Some(v) => {
            let mut highlights = string_list(&v, "highlights");
            highlights.truncate(MAX_HIGHLIGHTS);
            let citations = v
                .get("citations")
                .and_then(|c| c.as_array())
                .map(|xs| {
                    xs.iter()
                        .filter_map(|x| x.as_u64())
                        .map(|x| x as usize)
                        .collect()
                })
                .unwrap_or_default();
            SummaryOutcome {
                answer: v
                    .get("answer")
                    .and_then(|a| a.as_str())
                    .unwrap_or_default()
                    .trim()
                    .to_string(),
                highlights,
                citations,
            }
        }
        None => SummaryOutcome {
            answer: clip_chars(raw.trim(), RAW_ANSWER_CLIP_CHARS),
            highlights: Vec::new(),
            citations: Vec::new(),
        },
    }
}

/// Keep in-window indices, first occurrence only, order preserved.
fn normalize_citations(citations: &[usize], max_index: usize) -> Vec<usize> {
    let mut out = Vec::new();
    for &i in citations {
        if i <= max_index && !out.contains(&i) {
            out.push(i);
        }
    }
    out
}

fn with_note(note: &str, answer: &str) -> String {
    if answer.to_lowercase().contains(&note.to_lowercase()) {
        return answer.to_string();
    }
    if answer.is_empty() {
        return note.to_string();
    }
    format!("{note}\n\n{answer}")
}

fn clip_chars(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let clipped: String = text.chars().take(max_chars).collect();
    format!("{}...", clipped.trim_end())
}
