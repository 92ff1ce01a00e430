//! The orchestrator: drives one pipeline run through the state machine.
//!
//! One sequential run per request, no intra-request parallelism. Concurrent
//! requests share only the concept graph, guarded by a mutex held across each
//! resolve-then-write batch. Retries never loop inside a run; `retry_query`
//! starts a fresh one with patched tuning.

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Instant;

use lattice_core::config::LatticeConfig;
use lattice_core::errors::PipelineError;
use lattice_core::models::{AdaptationAction, GraphUpdateOutcome, GraphView, Passage, PipelineState};
use lattice_core::traits::{IGraphStore, IPassageRetriever, ITextCompletion};
use lattice_eval::Evaluator;
use lattice_gate::{clean_passage, gate_passages};
use lattice_graph::{assess_graph, extract_heuristic, extract_with_llm, ConceptGraphBuilder, ConceptGraphStore};
use lattice_intent::IntentClassifier;
use tracing::{debug, info, warn};

use crate::insight::run_insight;
use crate::stage::Stage;
use crate::summarize::run_summarizer;

/// Result of a direct graph update outside the pipeline.
#[derive(Debug, Clone)]
pub struct GraphUpdate {
    pub accepted: bool,
    pub issues: Vec<String>,
    pub outcome: Option<GraphUpdateOutcome>,
}

pub struct Orchestrator {
    llm: Arc<dyn ITextCompletion>,
    retriever: Arc<dyn IPassageRetriever>,
    graph: Arc<Mutex<ConceptGraphStore>>,
    config: LatticeConfig,
}

impl Orchestrator {
    pub fn new(
        llm: Arc<dyn ITextCompletion>,
        retriever: Arc<dyn IPassageRetriever>,
        graph: Arc<Mutex<ConceptGraphStore>>,
        config: LatticeConfig,
    ) -> Self {
        Orchestrator {
            llm,
            retriever,
            graph,
            config,
        }
    }

    /// Build with a file-backed graph store at the configured path.
    pub fn with_config(
        llm: Arc<dyn ITextCompletion>,
        retriever: Arc<dyn IPassageRetriever>,
        config: LatticeConfig,
    ) -> Self {
        let store = ConceptGraphStore::open(&config.graph_path);
        Self::new(llm, retriever, Arc::new(Mutex::new(store)), config)
    }

    /// Run the pipeline for a fresh question.
    pub fn run_query(&self, question: &str) -> Result<PipelineState, PipelineError> {
        let state = PipelineState::new(question, self.config.tuning.clone(), 0);
        self.run(state)
    }

    /// Manual retry: a brand-new run seeded with the recommended patches
    /// applied to the default tuning, retry count bumped.
    pub fn retry_query(
        &self,
        question: &str,
        retry_count: u32,
        actions: &[AdaptationAction],
    ) -> Result<PipelineState, PipelineError> {
        let mut tuning = self.config.tuning.clone();
        for action in actions {
            action.patch.apply(&mut tuning);
        }
        let state = PipelineState::new(question, tuning, retry_count + 1);
        self.run(state)
    }

    fn run(&self, mut state: PipelineState) -> Result<PipelineState, PipelineError> {
        let started = Instant::now();
        let timeout = self.config.llm.timeout();
        let mut stage = Stage::Start;

        info!(
            question = %state.question,
            retry_count = state.retry_count,
            "pipeline run started"
        );

        while stage != Stage::End {
            stage = stage.next(state.routing_intent());
            debug!(stage = stage.name(), "entering stage");

            match stage {
                Stage::Intent => {
                    let classifier = IntentClassifier::new(Some(self.llm.clone()), timeout);
                    let result = classifier.classify(&state.question);
                    state.intent = Some(result.intent);
                    state.sub_tasks = result.sub_tasks;
                }

                Stage::Retrieval => {
                    let hits = self
                        .retriever
                        .search(&state.question, state.tuning.top_k, None)
                        .map_err(|e| PipelineError::stage("retrieval", e))?;
                    state.passages = self.gate(
                        &state.question,
                        &hits,
                        state.tuning.top_k,
                        state.tuning.min_overlap,
                    );
                }

                Stage::Summarize => {
                    let summary = run_summarizer(
                        self.llm.as_ref(),
                        &state.question,
                        state.routing_intent(),
                        &state.sub_tasks,
                        &state.passages,
                        state.tuning.temperature,
                        timeout,
                    )
                    .map_err(|e| PipelineError::stage("summarize", e))?;
                    state.final_answer = Some(summary.answer.clone());
                    state.summary = Some(summary);
                }

                Stage::ExtractConcepts => {
                    self.extract_concepts(&mut state, timeout)?;
                }

                Stage::Insight => {
                    let texts: Vec<String> =
                        state.passages.iter().map(|p| p.text.clone()).collect();
                    let insight = {
                        let store = self.lock_graph();
                        run_insight(
                            self.llm.as_ref(),
                            &*store,
                            &state.question,
                            &texts,
                            state.summary.as_ref().map(|s| s.answer.as_str()),
                            &state.concepts,
                            timeout,
                        )
                    }
                    .map_err(|e| PipelineError::stage("insight", e))?;
                    state.final_answer = Some(insight.analysis.clone());
                    state.insight = Some(insight);
                }

                Stage::Evaluate => {
                    let evaluator = Evaluator::new(self.llm.clone(), timeout);
                    let texts: Vec<String> =
                        state.passages.iter().map(|p| p.text.clone()).collect();
                    let answer = state.final_answer.clone().unwrap_or_default();
                    state.evaluation = Some(evaluator.evaluate(
                        &state.question,
                        &answer,
                        &texts,
                        &state.sub_tasks,
                        state.tuning.critique_enabled,
                    ));
                }

                Stage::Adapt => {
                    state.latency_ms = Some(started.elapsed().as_millis() as u64);
                    let decision = lattice_adapt::decide(
                        state.routing_intent(),
                        &state.tuning,
                        state.evaluation.as_ref(),
                        state.latency_ms,
                    );
                    state.can_retry = decision.should_retry;
                    state.adaptation_actions = decision.actions;
                }

                Stage::Start | Stage::Route | Stage::End => {}
            }
        }

        info!(
            intent = ?state.intent,
            passages = state.passages.len(),
            can_retry = state.can_retry,
            latency_ms = state.latency_ms,
            "pipeline run finished"
        );
        Ok(state)
    }

    /// Gate raw retrieval hits, carrying each survivor's metadata over.
    fn gate(
        &self,
        question: &str,
        hits: &[Passage],
        top_k: usize,
        min_overlap: f64,
    ) -> Vec<Passage> {
        let texts: Vec<String> = hits.iter().map(|p| p.text.clone()).collect();
        let outcome = gate_passages(
            question,
            &texts,
            top_k,
            min_overlap,
            self.config.gate.diversify,
        );

        // Match each kept passage back to its hit by cleaned text, consuming
        // hits so duplicates keep their own metadata.
        let cleaned: Vec<String> = hits.iter().map(|p| clean_passage(&p.text)).collect();
        let mut used = vec![false; hits.len()];

        outcome
            .passages
            .iter()
            .zip(&outcome.scores)
            .filter_map(|(kept, &score)| {
                let idx = cleaned
                    .iter()
                    .enumerate()
                    .find(|(i, c)| !used[*i] && *c == kept)
                    .map(|(i, _)| i)?;
                used[idx] = true;

                let mut p = Passage::new(kept.clone(), score);
                p.metadata = hits[idx].metadata.clone();
                Some(p)
            })
            .collect()
    }

    /// Concepts branch: extract, hold to the quality gate, then commit under
    /// the single-writer lock when updates are enabled.
    fn extract_concepts(
        &self,
        state: &mut PipelineState,
        timeout: std::time::Duration,
    ) -> Result<(), PipelineError> {
        let texts: Vec<String> = state.passages.iter().map(|p| p.text.clone()).collect();

        let candidate = match extract_with_llm(
            self.llm.as_ref(),
            &state.question,
            &texts,
            state.tuning.temperature,
            timeout,
        ) {
            Ok(candidate) => candidate,
            Err(err) => {
                warn!(%err, "model extraction failed, falling back to lexical extractor");
                extract_heuristic(&texts.join("\n\n"))
            }
        };

        state.concepts = candidate.concepts.iter().map(|c| c.label.clone()).collect();

        let report = assess_graph(&candidate, &self.config.quality, Some(&state.question));
        state.graph_issues = report.issues.clone();

        if report.accepted && state.tuning.graph_update_enabled && !candidate.is_empty() {
            let mut store = self.lock_graph();
            let builder = ConceptGraphBuilder::new(self.config.quality.require_evidence);
            match builder.commit(&mut *store, &candidate) {
                Ok(outcome) => state.graph_update = Some(outcome),
                Err(err) => {
                    warn!(%err, "graph commit failed, discarding batch");
                    state.graph_issues.push(format!("graph commit failed: {err}"));
                }
            }
        }

        state.final_answer = Some(if state.concepts.is_empty() {
            "No concepts could be extracted from the retrieved passages.".to_string()
        } else {
            format!(
                "Key concepts identified in the retrieved passages: {}.",
                state.concepts.join(", ")
            )
        });
        Ok(())
    }

    /// Extract from free text and commit directly, outside any pipeline run.
    pub fn update_graph_from_text(&self, text: &str) -> GraphUpdate {
        let timeout = self.config.llm.timeout();
        let passages = vec![text.to_string()];

        let candidate = match extract_with_llm(
            self.llm.as_ref(),
            "",
            &passages,
            self.config.tuning.temperature,
            timeout,
        ) {
            Ok(candidate) => candidate,
            Err(err) => {
                warn!(%err, "model extraction failed, falling back to lexical extractor");
                extract_heuristic(text)
            }
        };

        let report = assess_graph(&candidate, &self.config.quality, None);
        if !report.accepted {
            return GraphUpdate {
                accepted: false,
                issues: report.issues,
                outcome: None,
            };
        }

        let mut store = self.lock_graph();
        let builder = ConceptGraphBuilder::new(self.config.quality.require_evidence);
        match builder.commit(&mut *store, &candidate) {
            Ok(outcome) => GraphUpdate {
                accepted: true,
                issues: report.issues,
                outcome: Some(outcome),
            },
            Err(err) => {
                warn!(%err, "graph commit failed");
                let mut issues = report.issues;
                issues.push(format!("graph commit failed: {err}"));
                GraphUpdate {
                    accepted: true,
                    issues,
                    outcome: None,
                }
            }
        }
    }

    /// The whole shared graph as `{nodes, edges}`.
    pub fn graph_view(&self) -> GraphView {
        self.lock_graph().view()
    }

    /// The subgraph within `hops` of the seed node ids.
    pub fn graph_subgraph(&self, seeds: &[String], hops: usize) -> GraphView {
        self.lock_graph().neighbors_subgraph(seeds, hops)
    }

    fn lock_graph(&self) -> MutexGuard<'_, ConceptGraphStore> {
        // A poisoned lock still holds a consistent graph; writes are atomic
        // per batch.
        self.graph.lock().unwrap_or_else(|e| e.into_inner())
    }
}
