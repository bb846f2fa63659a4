//! Typed errors for the knowledge graph pipeline.
//!
//! Uses `thiserror` for library errors (not `anyhow`) to provide
//! strongly-typed, composable error handling.

use thiserror::Error;

/// Errors that can occur during pipeline operations.
#[derive(Debug, Error)]
pub enum GraphError {
    /// Chunking configuration rejected before any extraction
    #[error("invalid chunking config: overlap ({overlap}) must be smaller than chunk size ({chunk_size})")]
    InvalidChunking { chunk_size: usize, overlap: usize },

    /// LLM service unavailable or failed
    #[error("LLM error: {0}")]
    Llm(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Model output contained no parseable JSON of the expected shape
    #[error("no JSON {expected} found in model output")]
    MalformedResponse { expected: &'static str },

    /// JSON parsing error
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<llm_client::LlmError> for GraphError {
    fn from(e: llm_client::LlmError) -> Self {
        GraphError::Llm(Box::new(e))
    }
}

/// Result type alias for pipeline operations.
pub type Result<T> = std::result::Result<T, GraphError>;
