//! TOML configuration loading.

use anyhow::{Context, Result};
use knowledge_graph::GraphConfig;
use std::path::Path;
use tracing::debug;

/// Load pipeline configuration from a TOML file.
///
/// A missing or unparsable file is fatal: the run must abort before any
/// extraction rather than proceed with settings the user did not choose.
/// Unset keys fall back to their defaults. An empty `llm.api_key` is
/// resolved from `OPENAI_API_KEY` (a `.env` file works too).
pub fn load_config(path: &Path) -> Result<GraphConfig> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {}", path.display()))?;

    let mut config: GraphConfig = toml::from_str(&raw)
        .with_context(|| format!("failed to parse config file {}", path.display()))?;

    if config.llm.api_key.is_empty() {
        if let Ok(key) = std::env::var("OPENAI_API_KEY") {
            debug!("using API key from OPENAI_API_KEY");
            config.llm.api_key = key;
        }
    }

    Ok(config)
}
