//! AI trait for text-generation backends.
//!
//! The trait abstracts the one capability the pipeline needs from an LLM:
//! turn a (system instruction, user text) pair into a raw completion at
//! deterministic sampling settings. The completion is treated as an
//! untrusted channel; recovery and validation downstream are the trust
//! boundary, not the backend.

use async_trait::async_trait;

use crate::error::BackendResult;

/// AI trait for text-generation backends.
///
/// Implementations wrap specific providers (Ollama, OpenAI, etc.) and are
/// expected to sample at temperature 0 so repeated calls with identical
/// input are as reproducible as the backend allows. Implementations do
/// not retry; retry policy belongs to the caller, which can consult
/// [`BackendError::is_transient`](crate::error::BackendError::is_transient).
#[async_trait]
pub trait AI: Send + Sync {
    /// Return the raw completion for a system instruction and user text.
    async fn complete(&self, system: &str, user: &str) -> BackendResult<String>;

    /// Schema-enforced completion, where the backend constrains decoding
    /// to the given JSON schema.
    ///
    /// Backends without a structured-output mode fall back to the plain
    /// completion; the pipeline validates either way.
    async fn complete_structured(
        &self,
        system: &str,
        user: &str,
        schema: serde_json::Value,
    ) -> BackendResult<String> {
        let _ = schema;
        self.complete(system, user).await
    }
}
