//! Integration tests for the full pipeline.
//!
//! These drive extraction, standardization and inference end-to-end
//! against the deterministic mock LLM:
//! 1. Extract triples per chunk (with one chunk returning garbage)
//! 2. Collapse entity name variants
//! 3. Bridge the two resulting communities
//! 4. Check the final statistics and invariants

use knowledge_graph::{
    compute_stats, testing::MockLlm, GraphConfig, Pipeline, MAX_PREDICATE_WORDS,
};

/// Input crafted so that 5/1 chunking yields exactly two chunks, the
/// first starting with "alpha" and the second with "omega".
const TEXT: &str = "alpha one two three omega five six seven";

fn two_chunk_config() -> GraphConfig {
    GraphConfig::new().with_chunking(5, 1)
}

/// Mock responses: each extraction chunk yields one island, the resolver
/// merges a name variant, and cross-community inference bridges the
/// islands.
fn scripted_llm() -> MockLlm {
    MockLlm::new()
        .with_response(
            "alpha",
            r#"Here you go:
[
  {"subject": "Marie Curie", "predicate": "discovered after much work", "object": "radium"},
  {"subject": "m. curie", "predicate": "born in", "object": "warsaw"},
  {"subject": "radium", "predicate": "glows"}
]"#,
        )
        .with_response(
            "omega",
            r#"[{"subject": "pierre curie", "predicate": "studied", "object": "magnetism"}]"#,
        )
        .with_response(
            "list of entity names",
            r#"{"marie curie": ["marie curie", "m. curie"]}"#,
        )
        .with_response(
            "disconnected communities",
            r#"[{"subject": "marie curie", "predicate": "married", "object": "pierre curie"}]"#,
        )
}

#[tokio::test]
async fn test_full_run_extracts_standardizes_and_infers() {
    let llm = scripted_llm();
    let output = Pipeline::new(llm, two_chunk_config())
        .run(TEXT)
        .await
        .unwrap();

    let report = &output.report;
    assert_eq!(report.extraction.chunks, 2);
    assert_eq!(report.extraction.failed_chunks, 0);
    assert_eq!(report.extraction.discarded, 1); // the object-less radium item
    assert_eq!(report.extraction.triples, 3);
    assert_eq!(report.extraction.entities, 6);

    // "m. curie" collapsed into "marie curie"
    let standardization = report.standardization.as_ref().unwrap();
    assert!(standardization.applied);
    assert_eq!(standardization.groups, 1);
    assert_eq!(standardization.entities_before, 6);
    assert_eq!(standardization.entities_after, 5);
    assert_eq!(output.triples[1].subject, "marie curie");

    // extraction order: chunk 1 triples precede chunk 2's
    assert_eq!(output.triples[0].chunk, Some(1));
    assert_eq!(output.triples[2].chunk, Some(2));

    // the bridge was accepted and tagged
    let inference = report.inference.as_ref().unwrap();
    assert_eq!(inference.communities_before, 2);
    assert_eq!(inference.communities_after, 1);
    let bridge = output.triples.last().unwrap();
    assert!(bridge.inferred);
    assert_eq!(bridge.chunk, None);

    // final stats reflect the bridged multigraph
    assert_eq!(report.stats.edges, output.triples.len());
    assert_eq!(report.stats.communities, 1);
}

#[tokio::test]
async fn test_predicate_cap_holds_across_all_phases() {
    let llm = scripted_llm();
    let output = Pipeline::new(llm, two_chunk_config())
        .run(TEXT)
        .await
        .unwrap();

    for triple in &output.triples {
        assert!(
            triple.predicate.split_whitespace().count() <= MAX_PREDICATE_WORDS,
            "predicate too long: {:?}",
            triple.predicate
        );
    }
    // the over-long extraction predicate was truncated, not rejected
    assert_eq!(output.triples[0].predicate, "discovered after much");
}

#[tokio::test]
async fn test_garbage_chunk_degrades_gracefully() {
    let llm = MockLlm::new()
        .with_response("alpha", "not json at all")
        .with_response(
            "omega",
            r#"[{"subject": "pierre curie", "predicate": "studied", "object": "magnetism"}]"#,
        );

    let output = Pipeline::new(llm, two_chunk_config().without_standardization())
        .run(TEXT)
        .await
        .unwrap();

    assert_eq!(output.report.extraction.failed_chunks, 1);
    assert_eq!(output.report.extraction.triples, 1);
    assert_eq!(output.triples[0].chunk, Some(2));
}

#[tokio::test]
async fn test_disabled_phases_leave_communities_unchanged() {
    let llm = scripted_llm();
    let config = two_chunk_config()
        .without_standardization()
        .without_inference();
    let output = Pipeline::new(llm, config).run(TEXT).await.unwrap();

    assert!(output.report.standardization.is_none());
    assert!(output.report.inference.is_none());

    // no hidden merging outside the two optional phases: without
    // standardization, "m. curie" stays split from "marie curie"
    let initial_stats = compute_stats(&output.triples);
    assert_eq!(output.report.stats.communities, initial_stats.communities);
    assert_eq!(output.report.stats.communities, 3);
    assert!(output.triples.iter().all(|t| !t.inferred));
}

#[tokio::test]
async fn test_standardization_never_increases_entities() {
    let llm = scripted_llm();
    let output = Pipeline::new(llm, two_chunk_config())
        .run(TEXT)
        .await
        .unwrap();

    let standardization = output.report.standardization.as_ref().unwrap();
    assert!(standardization.entities_after <= standardization.entities_before);
}

#[tokio::test]
async fn test_no_inferred_self_references() {
    let llm = MockLlm::new()
        .with_response(
            "alpha",
            r#"[{"subject": "x", "predicate": "uses", "object": "y"}]"#,
        )
        .with_response(
            "omega",
            r#"[{"subject": "p", "predicate": "contains", "object": "q"}]"#,
        )
        .with_response(
            "disconnected communities",
            r#"[
  {"subject": "x", "predicate": "is", "object": "x"},
  {"subject": "q", "predicate": "powers", "object": "y"}
]"#,
        );

    let output = Pipeline::new(llm, two_chunk_config().without_standardization())
        .run(TEXT)
        .await
        .unwrap();

    assert!(output
        .triples
        .iter()
        .filter(|t| t.inferred)
        .all(|t| t.subject != t.object));
    assert_eq!(output.report.inference.as_ref().unwrap().rejected, 1);
}

#[tokio::test]
async fn test_empty_input_yields_empty_graph() {
    let llm = MockLlm::new();
    let output = Pipeline::new(llm, GraphConfig::default())
        .run("")
        .await
        .unwrap();

    assert!(output.triples.is_empty());
    assert_eq!(output.report.stats.nodes, 0);
    assert_eq!(output.report.stats.communities, 0);
}
