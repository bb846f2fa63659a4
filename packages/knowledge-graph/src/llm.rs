//! The LLM boundary.
//!
//! Every call into the text-generation service goes through this one
//! narrow interface: a system prompt and a user prompt in, raw text out.
//! Nothing downstream trusts the output - it all goes through the
//! validator - and the service is swappable with a deterministic mock in
//! tests (see [`crate::testing::MockLlm`]).

use crate::error::Result;
use async_trait::async_trait;

/// Chat-style text generation.
#[async_trait]
pub trait Llm: Send + Sync {
    /// Send a system and user prompt, return the raw response text.
    async fn chat(&self, system: &str, user: &str) -> Result<String>;
}

#[async_trait]
impl Llm for llm_client::ChatClient {
    async fn chat(&self, system: &str, user: &str) -> Result<String> {
        Ok(llm_client::ChatClient::chat(self, system, user).await?)
    }
}
