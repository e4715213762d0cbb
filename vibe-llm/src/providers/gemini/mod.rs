//! Google Gemini provider
//!
//! Calls the `generateContent` REST endpoint with a system instruction and a
//! single user turn.

pub mod client;
pub mod types;

pub use client::{GeminiBackend, DEFAULT_BASE_URL};
