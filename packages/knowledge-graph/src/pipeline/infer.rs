//! Relationship inference - bridge disconnected parts of the graph.
//!
//! A single extraction pass over linear chunks systematically
//! under-connects entities that appear far apart in the text. Two
//! sub-phases counter that: cross-community inference asks for links
//! between disconnected components, within-community inference asks for
//! links between related-but-unlinked entities of one component.

use std::collections::HashSet;
use tracing::{debug, info, warn};

use crate::graph::EntityGraph;
use crate::llm::Llm;
use crate::prompts;
use crate::types::config::InferenceConfig;
use crate::types::report::InferenceReport;
use crate::types::triple::Triple;
use crate::validator::{extract_json_array, validate_triples};

/// Cap on existing relationships quoted as context in a request.
const MAX_CONTEXT_TRIPLES: usize = 20;

/// Infer new relationships and append them to the triple set.
///
/// Both sub-phases are failure-isolated per request: a failed call or an
/// unparsable response is logged and skipped, never fatal. All accepted
/// triples are `inferred: true`, carry no chunk tag, satisfy
/// `subject != object`, and have their predicates re-capped by the
/// validator.
pub async fn infer_relationships<L: Llm>(
    llm: &L,
    config: &InferenceConfig,
    triples: &mut Vec<Triple>,
) -> InferenceReport {
    let mut report = InferenceReport {
        communities_before: EntityGraph::from_triples(triples).communities().len(),
        ..Default::default()
    };

    infer_across_communities(llm, config, triples, &mut report).await;
    infer_within_communities(llm, config, triples, &mut report).await;

    report.communities_after = EntityGraph::from_triples(triples).communities().len();
    info!(
        accepted = report.accepted,
        rejected = report.rejected,
        communities_before = report.communities_before,
        communities_after = report.communities_after,
        "relationship inference complete"
    );
    report
}

/// Request links between pairs of disconnected communities.
///
/// Pairs are taken largest components first and bounded by
/// `max_community_pairs` to bound external-call volume.
async fn infer_across_communities<L: Llm>(
    llm: &L,
    config: &InferenceConfig,
    triples: &mut Vec<Triple>,
    report: &mut InferenceReport,
) {
    let communities = EntityGraph::from_triples(triples).communities();
    if communities.len() < 2 {
        debug!("graph already connected, no cross-community inference needed");
        return;
    }

    info!(
        communities = communities.len(),
        "inferring relationships between disconnected communities"
    );

    let mut accepted: Vec<Triple> = Vec::new();
    for (i, j) in community_pairs(communities.len(), config.max_community_pairs) {
        let sample_a = head(&communities[i], config.max_entities_per_community);
        let sample_b = head(&communities[j], config.max_entities_per_community);

        let members: HashSet<&str> = communities[i]
            .iter()
            .chain(communities[j].iter())
            .map(String::as_str)
            .collect();

        let context = context_triples(triples, &members);
        let user =
            prompts::format_relationship_inference_prompt(sample_a, sample_b, &context);

        report.cross_requests += 1;
        let raw = match llm
            .chat(prompts::RELATIONSHIP_INFERENCE_SYSTEM_PROMPT, &user)
            .await
        {
            Ok(raw) => raw,
            Err(e) => {
                warn!(error = %e, "cross-community inference call failed, skipping pair");
                continue;
            }
        };

        let items = match extract_json_array(&raw) {
            Ok(items) => items,
            Err(e) => {
                warn!(error = %e, "unparsable cross-community inference response, skipping pair");
                continue;
            }
        };

        for candidate in validate_triples(items).triples {
            if candidate.subject == candidate.object {
                report.rejected += 1;
                continue;
            }
            // results naming entities outside the two supplied
            // communities are discarded
            if !members.contains(candidate.subject.as_str())
                || !members.contains(candidate.object.as_str())
            {
                report.rejected += 1;
                continue;
            }
            accepted.push(Triple::inferred(
                candidate.subject,
                candidate.predicate,
                candidate.object,
            ));
        }
    }

    report.accepted += accepted.len();
    triples.extend(accepted);
}

/// Request links between unconnected but lexically related entities of
/// the same community.
async fn infer_within_communities<L: Llm>(
    llm: &L,
    config: &InferenceConfig,
    triples: &mut Vec<Triple>,
    report: &mut InferenceReport,
) {
    let graph = EntityGraph::from_triples(triples);

    let mut candidates: Vec<(String, String)> = Vec::new();
    'outer: for community in graph.communities() {
        for (a_idx, a) in community.iter().enumerate() {
            for b in community.iter().skip(a_idx + 1) {
                if candidates.len() >= config.max_within_pairs {
                    break 'outer;
                }
                if !graph.directly_connected(a, b) && lexically_related(a, b) {
                    candidates.push((a.clone(), b.clone()));
                }
            }
        }
    }

    if candidates.is_empty() {
        debug!("no within-community candidate pairs");
        return;
    }

    info!(
        pairs = candidates.len(),
        "inferring relationships within communities"
    );

    let candidate_entities: HashSet<&str> = candidates
        .iter()
        .flat_map(|(a, b)| [a.as_str(), b.as_str()])
        .collect();

    let pairs_text = candidates
        .iter()
        .map(|(a, b)| format!("{a} and {b}"))
        .collect::<Vec<_>>()
        .join("\n");
    let context = context_triples(triples, &candidate_entities);

    report.within_requests += 1;
    let raw = match llm
        .chat(
            prompts::WITHIN_COMMUNITY_SYSTEM_PROMPT,
            &prompts::format_within_community_prompt(&pairs_text, &context),
        )
        .await
    {
        Ok(raw) => raw,
        Err(e) => {
            warn!(error = %e, "within-community inference call failed, skipping phase");
            return;
        }
    };

    let items = match extract_json_array(&raw) {
        Ok(items) => items,
        Err(e) => {
            warn!(error = %e, "unparsable within-community inference response, skipping phase");
            return;
        }
    };

    let mut accepted: Vec<Triple> = Vec::new();
    for candidate in validate_triples(items).triples {
        if candidate.subject == candidate.object {
            report.rejected += 1;
            continue;
        }
        if !candidate_entities.contains(candidate.subject.as_str())
            || !candidate_entities.contains(candidate.object.as_str())
        {
            report.rejected += 1;
            continue;
        }
        accepted.push(Triple::inferred(
            candidate.subject,
            candidate.predicate,
            candidate.object,
        ));
    }

    report.accepted += accepted.len();
    triples.extend(accepted);
}

/// Community index pairs, highest-value first.
///
/// Communities arrive sorted largest first, so ordering pairs by
/// combined rank considers the largest components before the cap cuts
/// the list off.
fn community_pairs(count: usize, max_pairs: usize) -> Vec<(usize, usize)> {
    let mut pairs: Vec<(usize, usize)> = (0..count)
        .flat_map(|i| ((i + 1)..count).map(move |j| (i, j)))
        .collect();
    pairs.sort_by_key(|&(i, j)| (i + j, i));
    pairs.truncate(max_pairs);
    pairs
}

fn head(community: &[String], limit: usize) -> &[String] {
    &community[..community.len().min(limit)]
}

/// Existing relationships touching the given entities, for prompt context.
fn context_triples(triples: &[Triple], entities: &HashSet<&str>) -> String {
    triples
        .iter()
        .filter(|t| {
            entities.contains(t.subject.as_str()) || entities.contains(t.object.as_str())
        })
        .take(MAX_CONTEXT_TRIPLES)
        .map(|t| format!("{} {} {}", t.subject, t.predicate, t.object))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Local relatedness heuristic: shared word or substring containment.
///
/// Cheap and deliberately loose - it only nominates pairs for the
/// collaborator to judge, it does not decide anything itself.
fn lexically_related(a: &str, b: &str) -> bool {
    if a.contains(b) || b.contains(a) {
        return true;
    }
    let words_a: HashSet<&str> = a.split_whitespace().collect();
    b.split_whitespace().any(|w| words_a.contains(w))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockLlm;

    fn config() -> InferenceConfig {
        InferenceConfig::default()
    }

    fn two_islands() -> Vec<Triple> {
        vec![
            Triple::new("x", "uses", "y").with_chunk(1),
            Triple::new("p", "contains", "q").with_chunk(2),
        ]
    }

    #[tokio::test]
    async fn test_bridge_accepted_and_community_count_drops() {
        let llm = MockLlm::new().with_response(
            "disconnected communities",
            r#"[{"subject":"x","predicate":"supplies","object":"p"}]"#,
        );

        let mut triples = two_islands();
        let report = infer_relationships(&llm, &config(), &mut triples).await;

        assert_eq!(report.communities_before, 2);
        assert_eq!(report.communities_after, 1);
        assert_eq!(report.accepted, 1);

        let bridge = triples.last().unwrap();
        assert!(bridge.inferred);
        assert_eq!(bridge.chunk, None);
    }

    #[tokio::test]
    async fn test_self_references_rejected() {
        let llm = MockLlm::new().with_response(
            "disconnected communities",
            r#"[{"subject":"x","predicate":"is","object":"x"},
                {"subject":"y","predicate":"feeds","object":"q"}]"#,
        );

        let mut triples = two_islands();
        let report = infer_relationships(&llm, &config(), &mut triples).await;

        assert_eq!(report.rejected, 1);
        assert_eq!(report.accepted, 1);
        assert!(triples.iter().all(|t| t.subject != t.object));
    }

    #[tokio::test]
    async fn test_unknown_entities_rejected() {
        let llm = MockLlm::new().with_response(
            "disconnected communities",
            r#"[{"subject":"x","predicate":"rules","object":"atlantis"}]"#,
        );

        let mut triples = two_islands();
        let report = infer_relationships(&llm, &config(), &mut triples).await;

        assert_eq!(report.rejected, 1);
        assert_eq!(report.accepted, 0);
        assert_eq!(report.communities_after, 2);
    }

    #[tokio::test]
    async fn test_failed_request_is_isolated() {
        let llm = MockLlm::new().failing_on("disconnected communities");

        let mut triples = two_islands();
        let report = infer_relationships(&llm, &config(), &mut triples).await;

        assert_eq!(report.accepted, 0);
        assert_eq!(triples.len(), 2);
        assert_eq!(report.communities_after, 2);
    }

    #[tokio::test]
    async fn test_within_community_links_related_entities() {
        // "solar power" and "wind power" share a word, sit in one
        // community through "grid", but are not directly connected.
        let llm = MockLlm::new().with_response(
            "semantically related",
            r#"[{"subject":"solar power","predicate":"complements","object":"wind power"}]"#,
        );

        let mut triples = vec![
            Triple::new("solar power", "feeds", "grid").with_chunk(1),
            Triple::new("wind power", "feeds", "grid").with_chunk(1),
        ];
        let report = infer_relationships(&llm, &config(), &mut triples).await;

        assert_eq!(report.within_requests, 1);
        assert_eq!(report.accepted, 1);
        assert!(triples.last().unwrap().inferred);
    }

    #[tokio::test]
    async fn test_predicates_capped_on_inferred_triples() {
        let llm = MockLlm::new().with_response(
            "disconnected communities",
            r#"[{"subject":"x","predicate":"is quite strongly related to","object":"p"}]"#,
        );

        let mut triples = two_islands();
        infer_relationships(&llm, &config(), &mut triples).await;

        assert_eq!(triples.last().unwrap().predicate, "is quite strongly");
    }

    #[test]
    fn test_community_pairs_bounded_and_largest_first() {
        let pairs = community_pairs(4, 3);
        assert_eq!(pairs, vec![(0, 1), (0, 2), (0, 3)]);
        assert!(community_pairs(1, 10).is_empty());
    }

    #[test]
    fn test_lexically_related() {
        assert!(lexically_related("solar power", "wind power"));
        assert!(lexically_related("ai", "ai safety"));
        assert!(!lexically_related("radium", "polonium"));
    }
}
