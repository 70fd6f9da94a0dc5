//! Data types for the argumentation framework and pipeline configuration.

pub mod config;
pub mod debate;

pub use config::ExtractionConfig;
pub use debate::{Argument, Atom, Attack, AttackKind, DebateStructure, Rule, RuleKind};
