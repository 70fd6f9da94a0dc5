//! Pure Ollama REST API client
//!
//! A clean, minimal client for a local (or remote) Ollama server with no
//! domain-specific logic. Supports chat completions, JSON output mode, and
//! schema-enforced structured outputs.
//!
//! # Example
//!
//! ```rust,ignore
//! use ollama_client::{OllamaClient, ChatRequest, Message};
//!
//! let client = OllamaClient::from_env();
//!
//! let response = client.chat(
//!     ChatRequest::new("qwen2.5:14b")
//!         .message(Message::system("You answer in one sentence."))
//!         .message(Message::user("What is argumentation theory?"))
//!         .temperature(0.0),
//! ).await?;
//! ```
//!
//! # Type-Safe Structured Output
//!
//! ```rust,ignore
//! use schemars::JsonSchema;
//! use serde::Deserialize;
//!
//! #[derive(Deserialize, JsonSchema)]
//! struct Verdict {
//!     supported: bool,
//!     reason: String,
//! }
//!
//! // Schema generated from the type and enforced by the server
//! let verdict: Verdict = client
//!     .extract::<Verdict>("qwen2.5:14b", system_prompt, user_prompt)
//!     .await?;
//! ```

pub mod error;
pub mod schema;
pub mod types;

pub use error::{OllamaError, Result};
pub use schema::StructuredOutput;
pub use types::*;

use std::time::Duration;

use reqwest::Client;
use tracing::{debug, warn};

/// Default server address when `OLLAMA_HOST` is not set.
pub const DEFAULT_BASE_URL: &str = "http://localhost:11434";

/// Pure Ollama API client.
#[derive(Clone)]
pub struct OllamaClient {
    http_client: Client,
    base_url: String,
    timeout: Option<Duration>,
}

impl OllamaClient {
    /// Create a new client against the given base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http_client: Client::new(),
            base_url: base_url.into(),
            timeout: None,
        }
    }

    /// Create from the `OLLAMA_HOST` environment variable, falling back
    /// to `http://localhost:11434`.
    pub fn from_env() -> Self {
        let base_url =
            std::env::var("OLLAMA_HOST").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        Self::new(base_url)
    }

    /// Set a per-request deadline. Unset means reqwest's default (none).
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Chat completion.
    ///
    /// Sends the request to `/api/chat` with `stream: false` and returns
    /// the whole completion.
    pub async fn chat(&self, request: ChatRequest) -> Result<ChatResponse> {
        let start = std::time::Instant::now();

        let mut builder = self
            .http_client
            .post(format!("{}/api/chat", self.base_url))
            .json(&request);

        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }

        let response = builder.send().await.map_err(|e| {
            if e.is_timeout() {
                warn!(error = %e, model = %request.model, "Ollama request timed out");
                OllamaError::Timeout(e.to_string())
            } else {
                warn!(error = %e, model = %request.model, "Ollama request failed");
                OllamaError::Network(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<types::ErrorResponse>(&error_text)
                .map(|e| e.error)
                .unwrap_or(error_text);
            warn!(status = %status, error = %message, "Ollama API error");
            return Err(OllamaError::Api(message));
        }

        let raw: types::ChatResponseRaw = response
            .json()
            .await
            .map_err(|e| OllamaError::Parse(e.to_string()))?;

        let content = raw
            .message
            .map(|m| m.content)
            .ok_or_else(|| OllamaError::Api("no message in response".into()))?;

        let usage = match (raw.prompt_eval_count, raw.eval_count) {
            (Some(prompt_eval_count), Some(eval_count)) => Some(Usage {
                prompt_eval_count,
                eval_count,
            }),
            _ => None,
        };

        debug!(
            model = %request.model,
            duration_ms = start.elapsed().as_millis(),
            "Ollama chat completion"
        );

        Ok(ChatResponse { content, usage })
    }

    /// Type-safe structured output extraction.
    ///
    /// Generates a JSON schema from `T` via `schemars`, passes it as the
    /// `format` constraint so the server enforces the shape while decoding,
    /// and deserializes the completion.
    pub async fn extract<T: StructuredOutput>(
        &self,
        model: &str,
        system_prompt: impl Into<String>,
        user_prompt: impl Into<String>,
    ) -> Result<T> {
        let schema = T::ollama_schema();

        debug!(
            type_name = T::type_name(),
            "Generated Ollama format schema for extraction"
        );

        let response = self
            .chat(
                ChatRequest::new(model)
                    .message(Message::system(system_prompt))
                    .message(Message::user(user_prompt))
                    .temperature(0.0)
                    .format_schema(schema),
            )
            .await?;

        serde_json::from_str(&response.content)
            .map_err(|e| OllamaError::Parse(format!("Failed to deserialize response: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_builder() {
        let client =
            OllamaClient::new("http://ollama.internal:11434").with_timeout(Duration::from_secs(30));

        assert_eq!(client.base_url, "http://ollama.internal:11434");
        assert_eq!(client.timeout, Some(Duration::from_secs(30)));
    }

    #[test]
    fn test_from_env_falls_back_to_localhost() {
        // Only meaningful when OLLAMA_HOST is unset in the test env
        if std::env::var("OLLAMA_HOST").is_err() {
            let client = OllamaClient::from_env();
            assert_eq!(client.base_url, DEFAULT_BASE_URL);
        }
    }
}
