//! Run report accumulated across pipeline phases.
//!
//! Each phase returns explicit counters instead of printing them, so the
//! pipeline is testable without capturing console output.

use crate::graph::GraphStats;
use crate::types::triple::Triple;
use serde::Serialize;
use std::collections::HashMap;

/// Counters from the chunk extraction phase.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ExtractionReport {
    /// Total chunks produced by the segmenter
    pub chunks: usize,

    /// Chunks that yielded no triples (transport or format failure)
    pub failed_chunks: usize,

    /// Parsed items dropped for missing/empty required fields
    pub discarded: usize,

    /// Triples surviving validation across all chunks
    pub triples: usize,

    /// Distinct entities after extraction
    pub entities: usize,
}

/// Counters from the entity standardization phase.
#[derive(Debug, Clone, Default, Serialize)]
pub struct StandardizationReport {
    /// False when the phase was a no-op (disabled or unparsable grouping)
    pub applied: bool,

    /// Variant groups that were rewritten
    pub groups: usize,

    /// Distinct entities before the rewrite
    pub entities_before: usize,

    /// Distinct entities after the rewrite
    pub entities_after: usize,
}

/// Counters from the relationship inference phase.
#[derive(Debug, Clone, Default, Serialize)]
pub struct InferenceReport {
    /// Cross-community requests issued
    pub cross_requests: usize,

    /// Within-community requests issued
    pub within_requests: usize,

    /// Inferred triples accepted (both sub-phases)
    pub accepted: usize,

    /// Proposed triples rejected (self-reference or unknown entity)
    pub rejected: usize,

    /// Communities before inference
    pub communities_before: usize,

    /// Communities after inference
    pub communities_after: usize,
}

/// Full pipeline run report.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub extraction: ExtractionReport,

    /// Present when the standardization phase ran
    pub standardization: Option<StandardizationReport>,

    /// Present when the inference phase ran
    pub inference: Option<InferenceReport>,

    /// Final graph statistics
    pub stats: GraphStats,
}

/// Predicate frequencies, most common first; ties broken alphabetically.
pub fn predicate_counts(triples: &[Triple]) -> Vec<(String, usize)> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for triple in triples {
        *counts.entry(triple.predicate.as_str()).or_default() += 1;
    }
    let mut counts: Vec<(String, usize)> = counts
        .into_iter()
        .map(|(p, n)| (p.to_string(), n))
        .collect();
    counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    counts
}
