//! The knowledge graph construction pipeline.
//!
//! Phases run strictly in sequence, each fully consuming the previous
//! phase's triple list before the next starts:
//! 1. Chunk extraction (segmenter -> LLM -> validator, per chunk)
//! 2. Entity standardization (optional)
//! 3. Relationship inference (optional)
//! then final graph statistics.

pub mod extract;
pub mod infer;
pub mod standardize;

pub use extract::extract_from_text;
pub use infer::infer_relationships;
pub use standardize::standardize_entities;

use tracing::info;

use crate::error::Result;
use crate::graph::compute_stats;
use crate::llm::Llm;
use crate::types::config::GraphConfig;
use crate::types::report::{predicate_counts, RunReport};
use crate::types::triple::Triple;

/// How many relationship types the phase logs mention.
const TOP_PREDICATES: usize = 5;

/// Result of a full pipeline run.
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    /// Final triple list: extracted plus accepted inferred triples
    pub triples: Vec<Triple>,

    /// Per-phase counters and final statistics
    pub report: RunReport,
}

/// The batch pipeline over one input document.
pub struct Pipeline<L: Llm> {
    llm: L,
    config: GraphConfig,
}

impl<L: Llm> Pipeline<L> {
    /// Create a pipeline with the given LLM boundary and configuration.
    pub fn new(llm: L, config: GraphConfig) -> Self {
        Self { llm, config }
    }

    /// Run all phases over the input text.
    ///
    /// Only configuration errors abort the run; everything the external
    /// collaborator gets wrong degrades to warnings and skipped work.
    pub async fn run(&self, text: &str) -> Result<PipelineOutput> {
        info!("PHASE 1: initial triple extraction");
        let (mut triples, extraction) =
            extract_from_text(&self.llm, &self.config.chunking, text).await?;

        let standardization = if self.config.standardization.enabled {
            info!("PHASE 2: entity standardization");
            Some(
                standardize_entities(&self.llm, &self.config.standardization, &mut triples)
                    .await,
            )
        } else {
            info!("entity standardization disabled, skipping");
            None
        };

        let inference = if self.config.inference.enabled {
            info!("PHASE 3: relationship inference");
            log_top_predicates("before inference", &triples);
            let report =
                infer_relationships(&self.llm, &self.config.inference, &mut triples).await;
            log_top_predicates("after inference", &triples);
            Some(report)
        } else {
            info!("relationship inference disabled, skipping");
            None
        };

        let stats = compute_stats(&triples);
        info!(
            nodes = stats.nodes,
            edges = stats.edges,
            communities = stats.communities,
            "knowledge graph assembled"
        );

        Ok(PipelineOutput {
            triples,
            report: RunReport {
                extraction,
                standardization,
                inference,
                stats,
            },
        })
    }
}

fn log_top_predicates(when: &str, triples: &[Triple]) {
    let counts = predicate_counts(triples);
    for (predicate, count) in counts.iter().take(TOP_PREDICATES) {
        info!(predicate = %predicate, count, "top relationship type {}", when);
    }
}
