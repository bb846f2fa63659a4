//! Configuration for the knowledge graph pipeline.

use serde::{Deserialize, Serialize};

/// Top-level pipeline configuration.
///
/// Every section has sensible defaults, so a partial TOML file (or none
/// at all) deserializes into a runnable configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    /// Chat completion service settings
    pub llm: LlmConfig,

    /// Text segmentation settings
    pub chunking: ChunkingConfig,

    /// Entity standardization settings
    pub standardization: StandardizationConfig,

    /// Relationship inference settings
    pub inference: InferenceConfig,
}

impl GraphConfig {
    /// Create a new config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Disable entity standardization.
    pub fn without_standardization(mut self) -> Self {
        self.standardization.enabled = false;
        self
    }

    /// Disable relationship inference.
    pub fn without_inference(mut self) -> Self {
        self.inference.enabled = false;
        self
    }

    /// Set chunking parameters.
    pub fn with_chunking(mut self, chunk_size: usize, overlap: usize) -> Self {
        self.chunking.chunk_size = chunk_size;
        self.chunking.overlap = overlap;
        self
    }
}

/// Settings for the external chat completion service.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Model identifier
    pub model: String,

    /// API key; empty means "take it from the environment"
    pub api_key: String,

    /// Completion token limit
    pub max_tokens: u32,

    /// Sampling temperature
    pub temperature: f32,

    /// OpenAI-compatible endpoint base URL
    pub base_url: String,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            model: "gpt-4o".to_string(),
            api_key: String::new(),
            max_tokens: 8192,
            temperature: 0.2,
            base_url: "https://api.openai.com/v1".to_string(),
        }
    }
}

/// Word-window segmentation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChunkingConfig {
    /// Target chunk size in words
    pub chunk_size: usize,

    /// Overlap between consecutive chunks, in words
    pub overlap: usize,
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            chunk_size: 500,
            overlap: 50,
        }
    }
}

/// Entity standardization settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StandardizationConfig {
    /// Whether the standardization phase runs at all
    pub enabled: bool,

    /// How the canonical form of a variant group is chosen
    pub representative: RepresentativePolicy,
}

impl Default for StandardizationConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            representative: RepresentativePolicy::LlmChoice,
        }
    }
}

/// Policy for picking the canonical form of a variant group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RepresentativePolicy {
    /// Use the canonical name the resolver returned
    #[default]
    LlmChoice,

    /// Use the longest group member that occurs in the corpus
    Longest,

    /// Use the group member with the most subject/object occurrences
    MostFrequent,
}

/// Relationship inference settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InferenceConfig {
    /// Whether the inference phase runs at all
    pub enabled: bool,

    /// Upper bound on cross-community requests per run
    pub max_community_pairs: usize,

    /// How many entity names from each community go into a request
    pub max_entities_per_community: usize,

    /// Upper bound on within-community candidate pairs per run
    pub max_within_pairs: usize,
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_community_pairs: 10,
            max_entities_per_community: 15,
            max_within_pairs: 10,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GraphConfig::default();
        assert_eq!(config.chunking.chunk_size, 500);
        assert_eq!(config.chunking.overlap, 50);
        assert!(config.standardization.enabled);
        assert!(config.inference.enabled);
        assert_eq!(
            config.standardization.representative,
            RepresentativePolicy::LlmChoice
        );
    }

    #[test]
    fn test_builders() {
        let config = GraphConfig::new()
            .without_standardization()
            .without_inference()
            .with_chunking(100, 10);
        assert!(!config.standardization.enabled);
        assert!(!config.inference.enabled);
        assert_eq!(config.chunking.chunk_size, 100);
    }

    #[test]
    fn test_partial_deserialization() {
        let config: GraphConfig = serde_json::from_str(
            r#"{"chunking": {"chunk_size": 200}, "standardization": {"representative": "longest"}}"#,
        )
        .unwrap();
        assert_eq!(config.chunking.chunk_size, 200);
        // untouched fields keep their defaults
        assert_eq!(config.chunking.overlap, 50);
        assert_eq!(config.llm.model, "gpt-4o");
        assert_eq!(
            config.standardization.representative,
            RepresentativePolicy::Longest
        );
    }
}
