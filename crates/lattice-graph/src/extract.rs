//! Candidate-graph extraction: model-assisted with heavy sanitization, plus
//! a lexical fallback for when the model is unreachable.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::LazyLock;
use std::time::Duration;

use lattice_core::errors::ExternalCallError;
use lattice_core::llm_json::LlmJson;
use lattice_core::models::{CandidateConcept, CandidateEdge, CandidateGraph};
use lattice_core::traits::ITextCompletion;
use lattice_text::{acronyms_of, content_tokens, tokens};
use regex::Regex;
use serde_json::Value;
use tracing::{debug, warn};

use crate::evidence::{
    evidence_mentions_any, evidence_mentions_label, evidence_overlap_ok, grounding_tokens,
    is_title_like_evidence,
};
use crate::labels::is_unusable_concept;
use crate::normalize::infer_node_type;
use crate::relations;

const MAX_CONCEPTS: usize = 70;
const MAX_EDGES: usize = 160;
const MAX_RAW_CONCEPTS: usize = 160;
const MAX_RAW_EDGES: usize = 260;
const MAX_ALIASES: usize = 8;
const MAX_PASSAGE_CHARS: usize = 1400;
/// Minimum token-coverage score for resolving an edge endpoint against an
/// extracted concept.
const ENDPOINT_MATCH_FLOOR: f64 = 0.34;

static CAPS_PHRASE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b[A-Z][A-Za-z0-9-]+(?:\s+[A-Z][A-Za-z0-9-]+){0,4}\b").expect("caps phrase regex")
});

static PAREN_ACRONYM_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(([A-Za-z]{2,8})\)").expect("paren acronym regex"));

fn build_extraction_prompt(question: &str, passages_block: &str) -> String {
    format!(
        "You are a knowledge-graph extraction engine.\n\n\
         You will receive a USER QUESTION and PASSAGES (noisy, partial).\n\
         Build a clean knowledge graph that best answers the USER QUESTION.\n\n\
         Hard constraints:\n\
         - Use the PASSAGES only as evidence (no outside facts).\n\
         - Never output junk tokens as concepts: section numbers, instruction words,\n\
           citation markers, URLs, DOIs, author names, venues, hyphen fragments.\n\n\
         Concept rules:\n\
         - Short noun phrases (1-6 words); prefer scientific entities over generic words.\n\
         - Merge synonyms into one concept with aliases.\n\
         - Include acronyms as aliases when present.\n\n\
         Edge rules:\n\
         - Use ONLY the allowed relations below.\n\
         - Every edge MUST include an evidence snippet grounded in the passages (<= 25 words).\n\
         - Prefer edges touching the main topic of the USER QUESTION.\n\n\
         Allowed relations:\n{relations}\n\n\
         Output JSON ONLY. Schema:\n\
         {{\n  \"concepts\": [{{\"label\": \"...\", \"type\": \"method|model|metric|task|dataset|concept\", \"aliases\": [\"...\"]}}],\n  \"edges\": [{{\"source\": \"...\", \"target\": \"...\", \"relation\": \"...\", \"evidence\": \"...\"}}]\n}}\n\n\
         USER QUESTION:\n{question}\n\n\
         PASSAGES:\n{passages_block}",
        relations = relations::prompt_list(),
    )
}

/// Ask the model for a candidate graph over the gated passages.
///
/// Transport failures propagate so the caller can fall back to the lexical
/// extractor; a malformed reply is an empty candidate, never an error.
pub fn extract_with_llm(
    llm: &dyn ITextCompletion,
    question: &str,
    passages: &[String],
    temperature: f64,
    timeout: Duration,
) -> Result<CandidateGraph, ExternalCallError> {
    let passages: Vec<&str> = passages
        .iter()
        .map(|p| p.trim())
        .filter(|p| !p.is_empty())
        .collect();
    if passages.is_empty() {
        return Ok(CandidateGraph::default());
    }

    let clipped: Vec<String> = passages
        .iter()
        .map(|p| {
            if p.chars().count() > MAX_PASSAGE_CHARS {
                let cut: String = p.chars().take(MAX_PASSAGE_CHARS).collect();
                format!("{}...", cut.trim_end())
            } else {
                p.to_string()
            }
        })
        .collect();
    let block = clipped.join("\n\n---\n\n");

    let raw = llm.complete(&build_extraction_prompt(question, &block), temperature, timeout)?;
    let Some(value) = LlmJson::parse(&raw).into_value() else {
        warn!(provider = llm.name(), "extraction reply was not JSON, dropping");
        return Ok(CandidateGraph::default());
    };

    Ok(sanitize(question, &value))
}

/// Turn the raw model JSON into a deduplicated, junk-free candidate graph.
fn sanitize(question: &str, value: &Value) -> CandidateGraph {
    let mut concepts: Vec<CandidateConcept> = Vec::new();
    let mut seen_labels: BTreeSet<String> = BTreeSet::new();

    let raw_concepts = value
        .get("concepts")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default();

    for c in raw_concepts.iter().take(MAX_RAW_CONCEPTS) {
        let label = c
            .get("label")
            .and_then(Value::as_str)
            .map(str::trim)
            .unwrap_or_default();
        if label.is_empty() || is_unusable_concept(label) {
            continue;
        }
        let key = label.to_lowercase();
        if !seen_labels.insert(key) {
            continue;
        }

        let concept_type = c
            .get("type")
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .unwrap_or("concept")
            .to_string();

        let mut aliases: Vec<String> = c
            .get("aliases")
            .and_then(Value::as_array)
            .map(|xs| {
                xs.iter()
                    .filter_map(Value::as_str)
                    .map(str::trim)
                    .filter(|a| !a.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();
        for acronym in acronyms_of(label) {
            if !aliases.iter().any(|a| a.to_lowercase() == acronym) {
                aliases.push(acronym);
            }
        }
        aliases.truncate(MAX_ALIASES);

        concepts.push(CandidateConcept {
            label: label.to_string(),
            concept_type,
            aliases,
        });
    }

    let mut edges: Vec<CandidateEdge> = Vec::new();
    let mut dedup: BTreeSet<(String, String, String)> = BTreeSet::new();

    let raw_edges = value
        .get("edges")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default();

    for e in raw_edges.iter().take(MAX_RAW_EDGES) {
        let field = |key: &str| {
            e.get(key)
                .and_then(Value::as_str)
                .map(str::trim)
                .unwrap_or_default()
                .to_string()
        };
        let source_raw = field("source");
        let target_raw = field("target");
        let relation = field("relation");
        let evidence = field("evidence");

        if source_raw.is_empty() || target_raw.is_empty() || relation.is_empty() {
            continue;
        }
        if !relations::is_allowed(&relation) {
            continue;
        }
        if evidence.is_empty() || is_title_like_evidence(&evidence) {
            continue;
        }

        let mut source = resolve_endpoint(&source_raw, &concepts);
        let mut target = resolve_endpoint(&target_raw, &concepts);

        // An unknown endpoint that the evidence itself names is worth a
        // minimal node; anything else is likely hallucinated.
        if source.is_none() && evidence_mentions_label(&source_raw, &evidence) {
            source = Some(ensure_concept(&mut concepts, &source_raw));
        }
        if target.is_none() && evidence_mentions_label(&target_raw, &evidence) {
            target = Some(ensure_concept(&mut concepts, &target_raw));
        }
        let (Some(source), Some(target)) = (source, target) else {
            continue;
        };

        let grounded = if relations::is_strict(&relation) {
            evidence_overlap_ok(&source, &target, &evidence, 2)
        } else {
            evidence_mentions_any(&source, &target, &evidence)
        };
        if !grounded {
            continue;
        }

        let key = (source.to_lowercase(), target.to_lowercase(), relation.to_lowercase());
        if !dedup.insert(key) {
            continue;
        }
        edges.push(CandidateEdge {
            source,
            target,
            relation,
            evidence,
        });
    }

    concepts.truncate(MAX_CONCEPTS);
    if let Some(topic) = pick_topic_concept(question, &concepts) {
        // Stable partition keeps topic edges first without reordering peers.
        let (mut touching, others): (Vec<_>, Vec<_>) = edges
            .into_iter()
            .partition(|e| e.source == topic || e.target == topic);
        touching.extend(others);
        edges = touching;
    }
    edges.truncate(MAX_EDGES);

    debug!(
        concepts = concepts.len(),
        edges = edges.len(),
        "candidate graph sanitized"
    );
    CandidateGraph { concepts, edges }
}

/// Resolve an edge endpoint against extracted concepts: exact label, then
/// alias, then best token coverage above the floor.
fn resolve_endpoint(name: &str, concepts: &[CandidateConcept]) -> Option<String> {
    let low = name.trim().to_lowercase();
    if low.is_empty() {
        return None;
    }

    for c in concepts {
        if c.label.to_lowercase() == low {
            return Some(c.label.clone());
        }
    }
    for c in concepts {
        if c.aliases.iter().any(|a| a.to_lowercase() == low) {
            return Some(c.label.clone());
        }
    }

    let name_toks = grounding_tokens(name);
    if name_toks.is_empty() {
        return None;
    }

    let mut best: Option<(&CandidateConcept, f64)> = None;
    for c in concepts {
        let label_toks = grounding_tokens(&c.label);
        let inter = name_toks.intersection(&label_toks).count();
        if inter == 0 {
            continue;
        }
        let score = inter as f64 / name_toks.len().max(1) as f64;
        if best.as_ref().map_or(true, |(_, b)| score > *b) {
            best = Some((c, score));
        }
    }
    best.and_then(|(c, score)| (score >= ENDPOINT_MATCH_FLOOR).then(|| c.label.clone()))
}

fn ensure_concept(concepts: &mut Vec<CandidateConcept>, label: &str) -> String {
    let label = label.trim();
    let low = label.to_lowercase();
    if let Some(existing) = concepts.iter().find(|c| c.label.to_lowercase() == low) {
        return existing.label.clone();
    }
    concepts.push(CandidateConcept {
        label: label.to_string(),
        concept_type: "concept".to_string(),
        aliases: Vec::new(),
    });
    label.to_string()
}

/// The extracted concept best covering the question's topic tokens.
fn pick_topic_concept(question: &str, concepts: &[CandidateConcept]) -> Option<String> {
    let mut topic = content_tokens(question);
    topic.extend(acronyms_of(question));
    if topic.is_empty() {
        return None;
    }

    let mut best: Option<(&CandidateConcept, f64)> = None;
    for c in concepts {
        let label_toks = grounding_tokens(&c.label);
        if label_toks.is_empty() {
            continue;
        }
        let inter = topic.intersection(&label_toks).count();
        if inter == 0 {
            continue;
        }
        let score = inter as f64 / label_toks.len() as f64;
        if best.as_ref().map_or(true, |(_, b)| score > *b) {
            best = Some((c, score));
        }
    }
    best.map(|(c, _)| c.label.clone())
}

/// Lexical fallback when the model is unreachable: capitalized phrases,
/// parenthesized acronyms, and repeated content bigrams. Produces concepts
/// only; relations need the model.
pub fn extract_heuristic(text: &str) -> CandidateGraph {
    const MAX_HEURISTIC_CONCEPTS: usize = 30;

    let mut concepts: Vec<CandidateConcept> = Vec::new();
    let mut seen: BTreeSet<String> = BTreeSet::new();

    let mut push = |label: &str, concepts: &mut Vec<CandidateConcept>, seen: &mut BTreeSet<String>| {
        let label = label.trim();
        if label.len() < 3 || label.len() > 60 || is_unusable_concept(label) {
            return;
        }
        if !seen.insert(label.to_lowercase()) {
            return;
        }
        concepts.push(CandidateConcept {
            label: label.to_string(),
            concept_type: infer_node_type(label).to_string(),
            aliases: acronyms_of(label).into_iter().collect(),
        });
    };

    for m in CAPS_PHRASE_RE.find_iter(text) {
        let phrase = m.as_str();
        // Lone capitalized words are usually sentence starters; keep them
        // only when they look like a named entity (LoRA, GPT-4).
        if !phrase.contains(' ')
            && !phrase.chars().skip(1).any(|c| c.is_uppercase() || c.is_ascii_digit() || c == '-')
        {
            continue;
        }
        push(phrase, &mut concepts, &mut seen);
    }
    for cap in PAREN_ACRONYM_RE.captures_iter(text) {
        push(&cap[1], &mut concepts, &mut seen);
    }

    const FUNCTION_WORDS: &[&str] = &[
        "the", "and", "that", "this", "with", "from", "for", "are", "was", "were", "while",
        "into", "over", "under", "their", "these", "those", "have", "has",
    ];
    let toks: Vec<String> = tokens(text)
        .into_iter()
        .filter(|t| t.len() > 2 && !FUNCTION_WORDS.contains(&t.as_str()))
        .collect();
    let mut bigram_counts: BTreeMap<String, usize> = BTreeMap::new();
    for pair in toks.windows(2) {
        *bigram_counts.entry(format!("{} {}", pair[0], pair[1])).or_default() += 1;
    }
    let mut frequent: Vec<(&String, &usize)> =
        bigram_counts.iter().filter(|(_, n)| **n >= 2).collect();
    frequent.sort_by(|a, b| b.1.cmp(a.1).then(a.0.cmp(b.0)));
    for (bigram, _) in frequent {
        push(bigram, &mut concepts, &mut seen);
    }

    concepts.truncate(MAX_HEURISTIC_CONCEPTS);
    CandidateGraph {
        concepts,
        edges: Vec::new(),
    }
}
