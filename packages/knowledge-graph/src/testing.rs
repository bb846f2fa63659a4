//! Testing utilities including a mock LLM.
//!
//! Useful for testing the pipeline without making real LLM calls.

use async_trait::async_trait;
use std::sync::{Arc, RwLock};

use crate::error::{GraphError, Result};
use crate::llm::Llm;

/// A deterministic mock LLM.
///
/// Responses are selected by substring rules against the user prompt:
/// the first rule whose needle appears in the prompt wins, then the
/// default response (an empty JSON array unless overridden). Rules can
/// also inject failures. Every call is recorded for assertions.
#[derive(Default)]
pub struct MockLlm {
    rules: Arc<RwLock<Vec<Rule>>>,
    default_response: Arc<RwLock<String>>,
    calls: Arc<RwLock<Vec<MockCall>>>,
}

enum Rule {
    Respond { needle: String, response: String },
    Fail { needle: String },
}

/// Record of a call made to the mock.
#[derive(Debug, Clone)]
pub struct MockCall {
    pub system: String,
    pub user: String,
}

impl MockLlm {
    /// Create a mock whose default response is an empty JSON array.
    pub fn new() -> Self {
        Self {
            default_response: Arc::new(RwLock::new("[]".to_string())),
            ..Default::default()
        }
    }

    /// Respond with `response` when the user prompt contains `needle`.
    pub fn with_response(self, needle: impl Into<String>, response: impl Into<String>) -> Self {
        self.rules.write().unwrap().push(Rule::Respond {
            needle: needle.into(),
            response: response.into(),
        });
        self
    }

    /// Fail with an error when the user prompt contains `needle`.
    pub fn failing_on(self, needle: impl Into<String>) -> Self {
        self.rules.write().unwrap().push(Rule::Fail {
            needle: needle.into(),
        });
        self
    }

    /// Set the response used when no rule matches.
    pub fn with_default_response(self, response: impl Into<String>) -> Self {
        *self.default_response.write().unwrap() = response.into();
        self
    }

    /// All calls made to this mock, in order.
    pub fn calls(&self) -> Vec<MockCall> {
        self.calls.read().unwrap().clone()
    }
}

#[async_trait]
impl Llm for MockLlm {
    async fn chat(&self, system: &str, user: &str) -> Result<String> {
        self.calls.write().unwrap().push(MockCall {
            system: system.to_string(),
            user: user.to_string(),
        });

        for rule in self.rules.read().unwrap().iter() {
            match rule {
                Rule::Respond { needle, response } if user.contains(needle.as_str()) => {
                    return Ok(response.clone());
                }
                Rule::Fail { needle } if user.contains(needle.as_str()) => {
                    return Err(GraphError::Llm("mock failure".into()));
                }
                _ => {}
            }
        }

        Ok(self.default_response.read().unwrap().clone())
    }
}
