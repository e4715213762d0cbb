//! Generation backend implementations
//!
//! Concrete [`GenerationBackend`](crate::GenerationBackend) providers.

pub mod gemini;

pub use gemini::GeminiBackend;
