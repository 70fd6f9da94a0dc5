//! ASPIC+ Argumentation-Structure Extraction
//!
//! Extracts a formal argumentation framework (atomic propositions,
//! strict/defeasible inference rules, tree-structured arguments, attack
//! relations) from unstructured debate text by delegating the reading to
//! a large language model and validating its completion against a strict
//! schema.
//!
//! # Design Philosophy
//!
//! **"Parse, don't trust"**
//!
//! - The completion is an untrusted, lossy channel
//! - Recovery degrades gracefully; validation rejects loudly, with every
//!   violation in one pass
//! - The prompt is the quality lever; recovery and validation are the
//!   trust boundary
//! - One extraction, one immutable `DebateStructure`; no shared state
//!
//! # Usage
//!
//! ```rust,ignore
//! use debate_extraction::{ai::Ollama, Extractor};
//!
//! let ai = Ollama::from_env().with_model("qwen2.5:14b");
//! let extractor = Extractor::new(ai);
//!
//! let result = extractor
//!     .extract("John says the car is red, so the car is red. However, John is colorblind.")
//!     .await?;
//!
//! for attack in &result.structure.attacks {
//!     println!("{} -[{:?}]-> {}", attack.attacker, attack.kind, attack.target);
//! }
//! ```
//!
//! # Modules
//!
//! - [`traits`] - The AI seam to the text-generation backend
//! - [`types`] - The argumentation-framework data model
//! - [`pipeline`] - Prompt, recovery, validation, orchestration
//! - [`testing`] - Mock implementations for testing

pub mod error;
pub mod pipeline;
pub mod testing;
pub mod traits;
pub mod types;

#[cfg(feature = "ollama")]
pub mod ai;

// Re-export core types at crate root
pub use error::{BackendError, ExtractionError, Result};
pub use traits::AI;
pub use types::{
    config::ExtractionConfig,
    debate::{Argument, Atom, Attack, AttackKind, DebateStructure, Rule, RuleKind},
};

// Re-export pipeline components
pub use pipeline::{
    extract_prompt_hash, json_span, recover, repair_key_drift, strip_control_chars, validate,
    Extractor, ValidatedDebate, Violation, Warning, ATTACK_KINDS, EXTRACT_DEBATE_PROMPT,
    RULE_KINDS,
};

// Re-export testing utilities
pub use testing::{FailingAI, MockAI};
