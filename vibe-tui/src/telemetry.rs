//! Structured logging setup.
//!
//! The terminal belongs to the UI, so log records go to a file as JSON lines.
//! Filtering follows `VIBECODER_LOG`, defaulting to [`DEFAULT_FILTER`].

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub const LOG_ENV_VAR: &str = "VIBECODER_LOG";
pub const DEFAULT_FILTER: &str = "warn,vibe=info";

#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    #[error("Failed to open log file {path}: {source}")]
    LogFile {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to init subscriber: {0}")]
    Init(String),
}

pub fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Install the global subscriber writing JSON to `log_path` (appending).
pub fn init_logging(log_path: &Path) -> Result<(), TelemetryError> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path)
        .map_err(|source| TelemetryError::LogFile {
            path: log_path.display().to_string(),
            source,
        })?;

    tracing_subscriber::registry()
        .with(env_filter())
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .try_init()
        .map_err(|e| TelemetryError::Init(e.to_string()))?;

    tracing::info!(log_path = %log_path.display(), "Logging initialized");
    Ok(())
}
