//! Typed errors for the extraction library.
//!
//! Uses `thiserror` for library errors (not `anyhow`) to provide
//! strongly-typed, composable error handling. Every error is terminal for
//! a single extraction call; retry policy belongs to the caller.

use thiserror::Error;

use crate::pipeline::validate::Violation;

/// Errors that can occur during a debate extraction.
#[derive(Debug, Error)]
pub enum ExtractionError {
    /// The generation backend was unreachable, timed out, or failed
    #[error("backend error: {0}")]
    Backend(#[from] BackendError),

    /// No brace-delimited JSON span could be located in the completion
    #[error("no JSON object found in completion")]
    NoStructureFound,

    /// A candidate span was found but failed to parse even after sanitization
    #[error("malformed JSON at line {line}, column {column}: {message}")]
    MalformedJson {
        line: usize,
        column: usize,
        message: String,
    },

    /// The parsed structure failed type, enum, referential, or acyclicity
    /// checks. Carries every violation, not just the first.
    #[error("schema violation: {} issue(s)", .violations.len())]
    SchemaViolation { violations: Vec<Violation> },
}

/// Errors raised by a text-generation backend.
///
/// Callers deciding on retry policy can use [`BackendError::is_transient`]
/// to distinguish failures worth retrying from permanent ones.
#[derive(Debug, Error)]
pub enum BackendError {
    /// Connection-level failure (refused, DNS, reset)
    #[error("network error: {0}")]
    Network(String),

    /// The request exceeded its deadline
    #[error("request timed out: {0}")]
    Timeout(String),

    /// The backend answered with an error of its own
    #[error("backend API error: {0}")]
    Api(String),

    /// The backend's response envelope could not be read
    #[error("backend response error: {0}")]
    Response(String),
}

impl BackendError {
    /// Whether a retry with the same request could plausibly succeed.
    pub fn is_transient(&self) -> bool {
        matches!(self, BackendError::Network(_) | BackendError::Timeout(_))
    }
}

/// Result type alias for extraction operations.
pub type Result<T> = std::result::Result<T, ExtractionError>;

/// Result type alias for backend operations.
pub type BackendResult<T> = std::result::Result<T, BackendError>;
