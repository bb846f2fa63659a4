//! Domain types for the knowledge graph pipeline.

pub mod config;
pub mod report;
pub mod triple;

pub use config::{
    ChunkingConfig, GraphConfig, InferenceConfig, LlmConfig, RepresentativePolicy,
    StandardizationConfig,
};
pub use report::{
    predicate_counts, ExtractionReport, InferenceReport, RunReport, StandardizationReport,
};
pub use triple::{unique_entities, Triple};
