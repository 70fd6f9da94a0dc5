//! The Extractor - main entry point for the extraction library.
//!
//! One extraction is one sequential pipeline invocation: prompt + text to
//! the backend, recovery over the raw completion, validation into a typed
//! structure. The extractor holds no mutable state, so independent inputs
//! can run through separate invocations concurrently without coordination.

use tracing::{debug, warn};

use crate::error::Result;
use crate::pipeline::{prompts, recover, validate};
use crate::pipeline::validate::{ValidatedDebate, Violation};
use crate::traits::AI;
use crate::types::config::ExtractionConfig;
use crate::types::debate::DebateStructure;

/// The main entry point - extracts argumentation structures from text.
///
/// # Example
///
/// ```rust,ignore
/// use debate_extraction::{Extractor, testing::MockAI};
///
/// let extractor = Extractor::new(MockAI::new());
/// let result = extractor.extract("John says the car is red, so it is red.").await?;
/// println!("{} arguments", result.structure.arguments.len());
/// ```
pub struct Extractor<A: AI> {
    ai: A,
    config: ExtractionConfig,
}

impl<A: AI> Extractor<A> {
    /// Create a new extractor with default configuration.
    pub fn new(ai: A) -> Self {
        Self {
            ai,
            config: ExtractionConfig::default(),
        }
    }

    /// Create with custom configuration.
    pub fn with_config(ai: A, config: ExtractionConfig) -> Self {
        Self { ai, config }
    }

    /// Get a reference to the configuration.
    pub fn config(&self) -> &ExtractionConfig {
        &self.config
    }

    /// Extract the argumentation structure of one debate text.
    ///
    /// Terminal on every error kind: no retries, no self-repair. A caller
    /// that wants to re-prompt (for instance by feeding the violation
    /// list back to the model) does so around this method.
    pub async fn extract(&self, text: &str) -> Result<ValidatedDebate> {
        let prompt_hash = prompts::extract_prompt_hash();
        debug!(
            chars = text.len(),
            structured = self.config.structured,
            prompt = &prompt_hash[..12],
            "starting debate extraction"
        );

        let raw = if self.config.structured {
            self.ai
                .complete_structured(
                    prompts::EXTRACT_DEBATE_PROMPT,
                    text,
                    DebateStructure::output_schema(),
                )
                .await?
        } else {
            self.ai.complete(prompts::EXTRACT_DEBATE_PROMPT, text).await?
        };

        debug!(completion_chars = raw.len(), "completion received");

        let candidate = recover::recover(&raw)?;
        let validated = validate::validate(&candidate)?;

        if !validated.warnings.is_empty() {
            warn!(
                warnings = validated.warnings.len(),
                "extraction validated with warnings"
            );
            if self.config.strict_attacks {
                return Err(crate::error::ExtractionError::SchemaViolation {
                    violations: validated
                        .warnings
                        .into_iter()
                        .map(|w| Violation::IllegalAttack {
                            path: w.path,
                            message: w.message,
                        })
                        .collect(),
                });
            }
        }

        debug!(
            atoms = validated.structure.atoms.len(),
            rules = validated.structure.rules.len(),
            arguments = validated.structure.arguments.len(),
            attacks = validated.structure.attacks.len(),
            "extraction complete"
        );

        Ok(validated)
    }
}
