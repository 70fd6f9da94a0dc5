//! Backend implementations of the [`AI`](crate::traits::AI) trait.

mod ollama;

pub use ollama::Ollama;
