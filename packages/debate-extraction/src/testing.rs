//! Testing utilities including mock implementations.
//!
//! These are useful for testing applications that use the extraction
//! library without a running model server.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, RwLock};

use crate::error::{BackendError, BackendResult};
use crate::traits::AI;

/// The completion for a text with no argumentative structure.
pub const EMPTY_COMPLETION: &str = r#"{"atoms":[],"rules":[],"arguments":[],"attacks":[]}"#;

/// A mock AI implementation for testing.
///
/// Returns queued completions in order, falling back to the empty
/// structure when the queue runs dry, and records every call for
/// assertions.
#[derive(Default, Clone)]
pub struct MockAI {
    /// Queued completions, served front-first
    completions: Arc<RwLock<VecDeque<String>>>,

    /// Call tracking for assertions
    calls: Arc<RwLock<Vec<MockAICall>>>,
}

/// Record of a call made to the mock AI.
#[derive(Debug, Clone)]
pub enum MockAICall {
    Complete {
        system_chars: usize,
        user: String,
    },
    CompleteStructured {
        user: String,
        schema: serde_json::Value,
    },
}

impl MockAI {
    /// Create a new mock AI with default behavior.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a canned completion.
    pub fn with_completion(self, completion: impl Into<String>) -> Self {
        self.completions.write().unwrap().push_back(completion.into());
        self
    }

    /// All calls made so far.
    pub fn calls(&self) -> Vec<MockAICall> {
        self.calls.read().unwrap().clone()
    }

    fn next_completion(&self) -> String {
        self.completions
            .write()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| EMPTY_COMPLETION.to_string())
    }
}

#[async_trait]
impl AI for MockAI {
    async fn complete(&self, system: &str, user: &str) -> BackendResult<String> {
        self.calls.write().unwrap().push(MockAICall::Complete {
            system_chars: system.len(),
            user: user.to_string(),
        });
        Ok(self.next_completion())
    }

    async fn complete_structured(
        &self,
        _system: &str,
        user: &str,
        schema: serde_json::Value,
    ) -> BackendResult<String> {
        self.calls
            .write()
            .unwrap()
            .push(MockAICall::CompleteStructured {
                user: user.to_string(),
                schema,
            });
        Ok(self.next_completion())
    }
}

/// An AI implementation whose every call fails.
///
/// Useful for exercising backend-error paths, in both the transient and
/// the permanent flavor.
#[derive(Debug, Clone, Copy)]
pub struct FailingAI {
    transient: bool,
}

impl FailingAI {
    /// Fail with a transient (timeout) error.
    pub fn transient() -> Self {
        Self { transient: true }
    }

    /// Fail with a permanent (API) error.
    pub fn permanent() -> Self {
        Self { transient: false }
    }
}

#[async_trait]
impl AI for FailingAI {
    async fn complete(&self, _system: &str, _user: &str) -> BackendResult<String> {
        if self.transient {
            Err(BackendError::Timeout("mock deadline elapsed".into()))
        } else {
            Err(BackendError::Api("mock backend failure".into()))
        }
    }
}
