//! Configuration for the extraction pipeline.

use serde::{Deserialize, Serialize};

/// Configuration for a debate extraction pipeline.
///
/// An immutable value handed to the [`Extractor`](crate::pipeline::Extractor)
/// at construction; nothing here is mutated during a run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionConfig {
    /// Ask the backend to enforce the output schema while decoding.
    ///
    /// When true, the completion is requested through the structured
    /// channel with the full JSON schema attached, a stronger invariant
    /// than prompt-only enforcement. Recovery and validation still run
    /// afterwards: the schema cannot express referential integrity,
    /// acyclicity, or attack legality.
    ///
    /// Default: true.
    pub structured: bool,

    /// Escalate attack-legality warnings to hard validation failures.
    ///
    /// A `rebut` against a conclusion not produced by a defeasible rule
    /// is normally reported as a warning on an otherwise-valid result,
    /// since the upstream model gets this modeling nuance wrong often
    /// enough that hard-failing throws away usable structure.
    ///
    /// Default: false.
    pub strict_attacks: bool,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            structured: true,
            strict_attacks: false,
        }
    }
}

impl ExtractionConfig {
    /// Create a new config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set backend-enforced structured decoding.
    pub fn with_structured(mut self, structured: bool) -> Self {
        self.structured = structured;
        self
    }

    /// Set attack-legality strictness.
    pub fn with_strict_attacks(mut self, strict: bool) -> Self {
        self.strict_attacks = strict;
        self
    }
}
