//! Error types for VibeCoder operations

use thiserror::Error;

/// Text-generation backend errors.
///
/// These never reach the pipeline: the generation client turns them into a
/// displayed string.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GenerationError {
    #[error("No generation credential configured")]
    NotConfigured,

    #[error("Request failed with status {status}: {message}")]
    RequestFailed { status: u16, message: String },

    #[error("Invalid response: {reason}")]
    InvalidResponse { reason: String },

    #[error("Transport error: {reason}")]
    Transport { reason: String },

    #[error("Request timed out after {after_ms}ms")]
    Timeout { after_ms: u64 },
}

/// Knowledge-service client errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum KnowledgeError {
    #[error("MCP Client not connected")]
    NotConnected,
}

/// Master error type for the workspace.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum VibeError {
    #[error("Generation error: {0}")]
    Generation(#[from] GenerationError),

    #[error("Knowledge error: {0}")]
    Knowledge(#[from] KnowledgeError),

    #[error("Invalid value for {field}: {reason}")]
    Validation { field: &'static str, reason: String },
}

/// Result type alias for VibeCoder operations.
pub type VibeResult<T> = Result<T, VibeError>;

// =============================================================================
// TESTS
// =============================================================================
