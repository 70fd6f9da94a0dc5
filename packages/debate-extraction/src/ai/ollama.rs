//! Ollama implementation of the AI trait.
//!
//! A reference implementation over a local Ollama server, matching the
//! deployment this library was written against: `qwen2.5:14b` at
//! temperature 0 with JSON output mode.
//!
//! # Example
//!
//! ```rust,ignore
//! use debate_extraction::{ai::Ollama, Extractor};
//!
//! let ai = Ollama::from_env().with_model("qwen2.5:14b");
//! let extractor = Extractor::new(ai);
//! ```

use async_trait::async_trait;
use std::time::Duration;

use ollama_client::{ChatRequest, Message, OllamaClient, OllamaError};

use crate::error::{BackendError, BackendResult};
use crate::traits::AI;

/// Default chat model.
pub const DEFAULT_MODEL: &str = "qwen2.5:14b";

/// Ollama-backed AI implementation.
#[derive(Clone)]
pub struct Ollama {
    client: OllamaClient,
    model: String,
}

impl Ollama {
    /// Create over an existing client.
    pub fn new(client: OllamaClient) -> Self {
        Self {
            client,
            model: DEFAULT_MODEL.to_string(),
        }
    }

    /// Create from the `OLLAMA_HOST` environment variable (falls back to
    /// `http://localhost:11434`).
    pub fn from_env() -> Self {
        Self::new(OllamaClient::from_env())
    }

    /// Set the chat model (default: qwen2.5:14b).
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set a per-request deadline on the underlying client.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.client = self.client.with_timeout(timeout);
        self
    }

    /// Get the current model name.
    pub fn model(&self) -> &str {
        &self.model
    }

    fn request(&self, system: &str, user: &str) -> ChatRequest {
        ChatRequest::new(&self.model)
            .message(Message::system(system))
            .message(Message::user(user))
            .temperature(0.0)
    }
}

#[async_trait]
impl AI for Ollama {
    async fn complete(&self, system: &str, user: &str) -> BackendResult<String> {
        let response = self
            .client
            .chat(self.request(system, user).format_json())
            .await?;
        Ok(response.content)
    }

    async fn complete_structured(
        &self,
        system: &str,
        user: &str,
        schema: serde_json::Value,
    ) -> BackendResult<String> {
        let response = self
            .client
            .chat(self.request(system, user).format_schema(schema))
            .await?;
        Ok(response.content)
    }
}

impl From<OllamaError> for BackendError {
    fn from(err: OllamaError) -> Self {
        match err {
            OllamaError::Network(msg) => BackendError::Network(msg),
            OllamaError::Timeout(msg) => BackendError::Timeout(msg),
            OllamaError::Api(msg) => BackendError::Api(msg),
            OllamaError::Parse(msg) => BackendError::Response(msg),
        }
    }
}
