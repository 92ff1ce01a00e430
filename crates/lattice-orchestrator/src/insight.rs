//! The insight stage: heuristic signals plus one LLM synthesis call.
//!
//! Signals are cheap and deterministic (gap phrases, passage statistics,
//! weakly connected graph concepts); only the final synthesis asks the model.

use std::sync::LazyLock;
use std::time::Duration;

use lattice_core::errors::ExternalCallError;
use lattice_core::llm_json::{string_list, LlmJson};
use lattice_core::models::InsightOutcome;
use lattice_core::traits::{IGraphStore, ITextCompletion};
use regex::Regex;
use tracing::info;

const MAX_WEAK_CONCEPTS: usize = 10;
const WEAK_DEGREE_CEILING: usize = 1;
const RAW_ANALYSIS_CLIP_CHARS: usize = 2000;
const SYNTHESIS_TEMPERATURE: f64 = 0.3;

/// Phrases that signal an acknowledged limitation or open thread.
static GAP_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"\bnot evaluated\b",
        r"\blimited to\b",
        r"\bfuture work\b",
        r"\bnot explored\b",
        r"\black of\b",
        r"\bremains unclear\b",
        r"\bnot studied\b",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("gap pattern regex"))
    .collect()
});

/// Scan the passage texts for gap phrases. One signal per pattern.
pub fn detect_gaps(texts: &[String]) -> Vec<String> {
    let joined = texts.join(" ").to_lowercase();
    GAP_PATTERNS
        .iter()
        .filter(|re| re.is_match(&joined))
        .map(|re| format!("heuristic_signal:{}", re.as_str()))
        .collect()
}

/// Word-count statistics over the passage set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PassageStats {
    pub count: usize,
    pub avg_words: f64,
    pub min_words: usize,
    pub max_words: usize,
}

pub fn passage_statistics(texts: &[String]) -> PassageStats {
    let lengths: Vec<usize> = texts
        .iter()
        .map(|t| t.split_whitespace().count())
        .filter(|&n| n > 0)
        .collect();
    if lengths.is_empty() {
        return PassageStats::default();
    }
    PassageStats {
        count: lengths.len(),
        avg_words: lengths.iter().sum::<usize>() as f64 / lengths.len() as f64,
        min_words: *lengths.iter().min().unwrap_or(&0),
        max_words: *lengths.iter().max().unwrap_or(&0),
    }
}

/// Concepts that exist in the shared graph but barely connect to it,
/// lowest degree first.
pub fn weakly_connected_concepts(store: &dyn IGraphStore, concepts: &[String]) -> Vec<String> {
    let mut weak: Vec<(String, usize)> = Vec::new();
    for concept in concepts {
        let concept = concept.trim();
        if concept.is_empty() || weak.iter().any(|(c, _)| c == concept) {
            continue;
        }
        if !store.has_node(concept) {
            continue;
        }
        let degree = store.degree(concept);
        if degree <= WEAK_DEGREE_CEILING {
            weak.push((concept.to_string(), degree));
        }
    }
    weak.sort_by_key(|(_, d)| *d);
    weak.into_iter()
        .take(MAX_WEAK_CONCEPTS)
        .map(|(c, _)| c)
        .collect()
}

fn build_insight_prompt(
    question: &str,
    summary: &str,
    gaps: &[String],
    weak_concepts: &[String],
    stats: &PassageStats,
) -> String {
    format!(
        "You are an expert scientific analyst.\n\n\
         Synthesize insights from the signals below. Do not invent facts and\n\
         do not summarize the papers themselves.\n\n\
         Question:\n{question}\n\n\
         Summary:\n{summary}\n\n\
         Detected gaps:\n{gaps:?}\n\n\
         Weakly connected concepts:\n{weak_concepts:?}\n\n\
         Passage statistics: count={count} avg_words={avg:.1} min={min} max={max}\n\n\
         Return JSON ONLY:\n\
         {{\n  \"analysis\": \"...\",\n  \"gaps\": [\"...\"],\n  \"contradictions\": [\"...\"],\n  \"future_directions\": [\"...\"]\n}}",
        count = stats.count,
        avg = stats.avg_words,
        min = stats.min_words,
        max = stats.max_words,
    )
}

/// Run the full insight stage. Transport failure propagates; a malformed
/// reply degrades to its raw text as the analysis.
pub fn run_insight(
    llm: &dyn ITextCompletion,
    store: &dyn IGraphStore,
    question: &str,
    passage_texts: &[String],
    summary: Option<&str>,
    concepts: &[String],
    timeout: Duration,
) -> Result<InsightOutcome, ExternalCallError> {
    let gaps = detect_gaps(passage_texts);
    let stats = passage_statistics(passage_texts);
    let weak = weakly_connected_concepts(store, concepts);

    let prompt = build_insight_prompt(question, summary.unwrap_or(""), &gaps, &weak, &stats);
    let raw = llm.complete(&prompt, SYNTHESIS_TEMPERATURE, timeout)?;

    let outcome = match LlmJson::parse(&raw).into_value() {
        Some(v) => InsightOutcome {
            analysis: v
                .get("analysis")
                .and_then(|a| a.as_str())
                .unwrap_or_default()
                .trim()
                .to_string(),
            gaps: string_list(&v, "gaps"),
            contradictions: string_list(&v, "contradictions"),
            future_directions: string_list(&v, "future_directions"),
        },
        None => InsightOutcome {
            analysis: raw.trim().chars().take(RAW_ANALYSIS_CLIP_CHARS).collect(),
            gaps: Vec::new(),
            contradictions: Vec::new(),
            future_directions: Vec::new(),
        },
    };

    info!(
        gap_signals = gaps.len(),
        weak_concepts = weak.len(),
        passages = stats.count,
        "insight synthesized"
    );
    Ok(outcome)
}
