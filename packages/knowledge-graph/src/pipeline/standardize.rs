//! Entity standardization - collapse name variants to canonical forms.

use indexmap::IndexMap;
use std::collections::HashMap;
use tracing::{debug, info, warn};

use crate::llm::Llm;
use crate::prompts;
use crate::types::config::{RepresentativePolicy, StandardizationConfig};
use crate::types::report::StandardizationReport;
use crate::types::triple::{unique_entities, Triple};
use crate::validator::extract_json_object;

/// Standardize entity names across the whole triple set, in place.
///
/// The distinct entity list goes to the resolution collaborator, which
/// returns a mapping of canonical name to variant list. Every group with
/// at least two members present in the corpus is rewritten to one
/// representative form; ungrouped entities pass through unchanged. The
/// distinct-entity count never increases.
///
/// Unparsable resolver output makes the whole phase a logged no-op; it
/// is never fatal to the run.
pub async fn standardize_entities<L: Llm>(
    llm: &L,
    config: &StandardizationConfig,
    triples: &mut [Triple],
) -> StandardizationReport {
    let entities_before = unique_entities(triples);
    let mut report = StandardizationReport {
        applied: false,
        groups: 0,
        entities_before: entities_before.len(),
        entities_after: entities_before.len(),
    };

    if entities_before.len() < 2 {
        return report;
    }

    let entity_list: Vec<String> = entities_before.iter().cloned().collect();
    let raw = match llm
        .chat(
            prompts::ENTITY_RESOLUTION_SYSTEM_PROMPT,
            &prompts::format_entity_resolution_prompt(&entity_list),
        )
        .await
    {
        Ok(raw) => raw,
        Err(e) => {
            warn!(error = %e, "entity resolution call failed, skipping standardization");
            return report;
        }
    };

    let groups = match extract_json_object(&raw) {
        Ok(groups) => groups,
        Err(e) => {
            warn!(error = %e, "unparsable entity resolution response, skipping standardization");
            return report;
        }
    };

    let rewrites = build_rewrites(&groups, triples, config.representative);
    report.groups = rewrites.groups;

    if rewrites.by_variant.is_empty() {
        debug!("entity resolution proposed no applicable groups");
        return report;
    }

    for triple in triples.iter_mut() {
        if let Some(canonical) = rewrites.by_variant.get(&triple.subject) {
            triple.subject = canonical.clone();
        }
        if let Some(canonical) = rewrites.by_variant.get(&triple.object) {
            triple.object = canonical.clone();
        }
    }

    report.applied = true;
    report.entities_after = unique_entities(triples).len();
    info!(
        groups = report.groups,
        entities_before = report.entities_before,
        entities_after = report.entities_after,
        "standardized entity names"
    );

    report
}

struct Rewrites {
    /// variant name -> canonical name, insertion-ordered for determinism
    by_variant: IndexMap<String, String>,
    groups: usize,
}

/// Turn the resolver's canonical -> variants mapping into a flat
/// variant -> representative rewrite table.
///
/// Only variants that actually occur in the corpus count as group
/// members, and a group is applied only when it has at least two such
/// members (the resolver's key itself counts when it occurs) - a pure
/// rename of a single entity is not a merge.
fn build_rewrites(
    groups: &serde_json::Map<String, serde_json::Value>,
    triples: &[Triple],
    policy: RepresentativePolicy,
) -> Rewrites {
    let entities = unique_entities(triples);

    let mut occurrences: HashMap<&str, usize> = HashMap::new();
    for triple in triples {
        *occurrences.entry(triple.subject.as_str()).or_default() += 1;
        *occurrences.entry(triple.object.as_str()).or_default() += 1;
    }

    let mut by_variant: IndexMap<String, String> = IndexMap::new();
    let mut applied_groups = 0;

    for (canonical, variants) in groups {
        let canonical = canonical.trim().to_lowercase();
        if canonical.is_empty() {
            continue;
        }
        let Some(variants) = variants.as_array() else {
            continue;
        };

        let mut members: Vec<String> = variants
            .iter()
            .filter_map(|v| v.as_str())
            .map(|v| v.trim().to_lowercase())
            .filter(|v| entities.contains(v))
            .collect();
        if entities.contains(&canonical) && !members.contains(&canonical) {
            members.push(canonical.clone());
        }
        members.sort();
        members.dedup();

        if members.len() < 2 {
            continue;
        }

        let representative = match policy {
            RepresentativePolicy::LlmChoice => canonical.clone(),
            RepresentativePolicy::Longest => members
                .iter()
                .max_by_key(|m| m.chars().count())
                .cloned()
                .unwrap_or_else(|| canonical.clone()),
            RepresentativePolicy::MostFrequent => members
                .iter()
                .max_by_key(|m| occurrences.get(m.as_str()).copied().unwrap_or(0))
                .cloned()
                .unwrap_or_else(|| canonical.clone()),
        };

        applied_groups += 1;
        for member in members {
            if member != representative {
                by_variant.insert(member, representative.clone());
            }
        }
    }

    Rewrites {
        by_variant,
        groups: applied_groups,
    }
}
