//! OpenAI-compatible chat completion client
//!
//! A minimal client for any chat-completions endpoint that speaks the
//! OpenAI REST dialect (OpenAI itself, Azure, OpenRouter, llama.cpp,
//! Ollama, vLLM, ...). No domain-specific logic: prompts in, raw text out.
//!
//! # Example
//!
//! ```rust,ignore
//! use llm_client::ChatClient;
//!
//! let client = ChatClient::from_env()?
//!     .with_model("gpt-4o")
//!     .with_temperature(0.2);
//!
//! let answer = client.chat("You are terse.", "What is a triple?").await?;
//! ```

pub mod error;
pub mod types;

pub use error::{LlmError, Result};
pub use types::{ChatRequest, ChatResponse, Message, Usage};

use reqwest::Client;
use std::time::Duration;
use tracing::{debug, warn};

/// Delay before the first retry; doubles per attempt.
const INITIAL_BACKOFF: Duration = Duration::from_millis(500);

/// Chat completion client for OpenAI-compatible endpoints.
#[derive(Clone)]
pub struct ChatClient {
    http_client: Client,
    api_key: String,
    base_url: String,
    model: String,
    temperature: Option<f32>,
    max_tokens: Option<u32>,
    max_retries: u32,
}

impl ChatClient {
    /// Create a new client with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            http_client: Client::new(),
            api_key: api_key.into(),
            base_url: "https://api.openai.com/v1".to_string(),
            model: "gpt-4o".to_string(),
            temperature: None,
            max_tokens: None,
            max_retries: 2,
        }
    }

    /// Create from environment variable `OPENAI_API_KEY`.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("OPENAI_API_KEY")
            .map_err(|_| LlmError::Config("OPENAI_API_KEY not set".into()))?;
        Ok(Self::new(api_key))
    }

    /// Set a custom base URL (for Azure, proxies, local servers, etc.).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the model (default: gpt-4o).
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set the sampling temperature.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Set the completion token limit.
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    /// Set how many times a retryable failure is retried (default: 2).
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Get the current model name.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Chat completion with a system and a user message.
    ///
    /// Returns the first choice's content. Retryable failures (network,
    /// HTTP 429/5xx) are retried with exponential backoff up to the
    /// configured limit.
    pub async fn chat(&self, system: &str, user: &str) -> Result<String> {
        let mut request = ChatRequest::new(&self.model)
            .message(Message::system(system))
            .message(Message::user(user));
        request.temperature = self.temperature;
        request.max_tokens = self.max_tokens;

        let mut backoff = INITIAL_BACKOFF;
        let mut attempt = 0;
        loop {
            match self.chat_completion(&request).await {
                Ok(response) => return Ok(response.content),
                Err(e) if e.is_retryable() && attempt < self.max_retries => {
                    attempt += 1;
                    warn!(
                        error = %e,
                        attempt,
                        max_retries = self.max_retries,
                        "chat completion failed, retrying"
                    );
                    tokio::time::sleep(backoff).await;
                    backoff *= 2;
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// Chat completion.
    ///
    /// Send messages to the chat completions API and get a response.
    pub async fn chat_completion(&self, request: &ChatRequest) -> Result<ChatResponse> {
        let start = std::time::Instant::now();

        let response = self
            .http_client
            .post(format!("{}/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(request)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "chat completion request failed");
                LlmError::Network(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            warn!(status = %status, error = %message, "chat completion API error");
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let raw: types::ChatResponseRaw = response
            .json()
            .await
            .map_err(|e| LlmError::Parse(e.to_string()))?;

        let content = raw
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or(LlmError::EmptyResponse)?;

        debug!(
            model = %request.model,
            duration_ms = start.elapsed().as_millis(),
            "chat completion"
        );

        Ok(ChatResponse {
            content,
            usage: raw.usage,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_builder() {
        let client = ChatClient::new("sk-test")
            .with_base_url("https://custom.api.com/v1")
            .with_model("gpt-4o-mini")
            .with_temperature(0.3)
            .with_max_tokens(2048)
            .with_max_retries(0);

        assert_eq!(client.api_key, "sk-test");
        assert_eq!(client.base_url(), "https://custom.api.com/v1");
        assert_eq!(client.model(), "gpt-4o-mini");
        assert_eq!(client.temperature, Some(0.3));
        assert_eq!(client.max_tokens, Some(2048));
    }

    #[test]
    fn test_retryable_errors() {
        assert!(LlmError::Network("timeout".into()).is_retryable());
        assert!(LlmError::Api {
            status: 429,
            message: "rate limited".into()
        }
        .is_retryable());
        assert!(LlmError::Api {
            status: 503,
            message: "overloaded".into()
        }
        .is_retryable());
        assert!(!LlmError::Api {
            status: 401,
            message: "bad key".into()
        }
        .is_retryable());
        assert!(!LlmError::Parse("junk".into()).is_retryable());
    }
}
