//! Knowledge Graph Construction Pipeline
//!
//! Turns unstructured text into a knowledge graph: subject-predicate-object
//! triples with canonicalized entity names, extended by inferred links that
//! bridge otherwise disconnected clusters.
//!
//! # Design Philosophy
//!
//! The external text-generation service is an unreliable, free-text
//! collaborator. Every call goes through one narrow boundary (prompt in,
//! raw text out) and every response is untrusted input: locate the JSON,
//! parse it, keep what validates, count and drop the rest. A single bad
//! chunk or inference request degrades to a warning, never a failed run.
//!
//! # Usage
//!
//! ```rust,ignore
//! use knowledge_graph::{GraphConfig, Pipeline};
//! use llm_client::ChatClient;
//!
//! let config = GraphConfig::default();
//! let llm = ChatClient::from_env()?.with_model(&config.llm.model);
//!
//! let output = Pipeline::new(llm, config).run(&document_text).await?;
//! println!("{} triples, {} communities",
//!     output.triples.len(), output.report.stats.communities);
//! ```
//!
//! # Modules
//!
//! - [`segmenter`] - overlapping word-window text chunks
//! - [`validator`] - JSON extraction and triple validation
//! - [`pipeline`] - extraction, standardization and inference phases
//! - [`graph`] - entity co-occurrence graph, communities, statistics
//! - [`prompts`] - the prompt families sent to the collaborator
//! - [`testing`] - deterministic mock LLM for tests

pub mod error;
pub mod graph;
pub mod llm;
pub mod pipeline;
pub mod prompts;
pub mod segmenter;
pub mod testing;
pub mod types;
pub mod validator;

// Re-export core types at crate root
pub use error::{GraphError, Result};
pub use graph::{compute_stats, EntityGraph, GraphStats};
pub use llm::Llm;
pub use pipeline::{
    extract_from_text, infer_relationships, standardize_entities, Pipeline, PipelineOutput,
};
pub use segmenter::chunk_text;
pub use types::{
    predicate_counts, unique_entities, ChunkingConfig, ExtractionReport, GraphConfig,
    InferenceConfig, InferenceReport, LlmConfig, RepresentativePolicy, RunReport,
    StandardizationConfig, StandardizationReport, Triple,
};
pub use validator::{
    extract_json_array, extract_json_object, limit_predicate_length, validate_triples,
    ValidatedTriples, MAX_PREDICATE_WORDS,
};
