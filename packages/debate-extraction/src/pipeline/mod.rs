//! Extraction pipeline - the core of the library.
//!
//! The pipeline orchestrates:
//! - Prompting (fixed instruction document + input text)
//! - Completion (via the AI trait, plain or schema-enforced)
//! - Recovery (noisy completion to untyped JSON)
//! - Validation (untyped JSON to a typed, invariant-checked structure)

pub mod extractor;
pub mod prompts;
pub mod recover;
pub mod validate;

pub use extractor::Extractor;
pub use prompts::{extract_prompt_hash, EXTRACT_DEBATE_PROMPT};
pub use recover::{json_span, recover, repair_key_drift, strip_control_chars};
pub use validate::{validate, ValidatedDebate, Violation, Warning, ATTACK_KINDS, RULE_KINDS};
