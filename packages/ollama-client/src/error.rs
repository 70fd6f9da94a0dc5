//! Error types for the Ollama client.

use thiserror::Error;

/// Result type for Ollama client operations.
pub type Result<T> = std::result::Result<T, OllamaError>;

/// Ollama client errors.
#[derive(Debug, Error)]
pub enum OllamaError {
    /// Network error (connection refused, DNS failure)
    #[error("Network error: {0}")]
    Network(String),

    /// Request exceeded the configured deadline
    #[error("Request timed out: {0}")]
    Timeout(String),

    /// API error (non-2xx response from the server)
    #[error("API error: {0}")]
    Api(String),

    /// Parse error (invalid JSON, unexpected response format)
    #[error("Parse error: {0}")]
    Parse(String),
}

impl OllamaError {
    /// Whether a retry with the same request could plausibly succeed.
    ///
    /// Network and timeout failures are transient; API and parse
    /// failures are not.
    pub fn is_transient(&self) -> bool {
        matches!(self, OllamaError::Network(_) | OllamaError::Timeout(_))
    }
}
