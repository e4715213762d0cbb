//! Configuration loading for the VibeCoder TUI.
//!
//! The file is optional: without `--config` or `VIBECODER_CONFIG` the
//! built-in defaults are used. Every table and field may be omitted; unknown
//! keys are rejected. The generation credential never comes from this file.

use crate::theme::ThemeName;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use vibe_context::KnowledgeSettings;
use vibe_llm::GenerationSettings;
use vibe_swarm::{HostingSettings, PipelineTimings, SwarmSettings};

pub const CONFIG_ENV_VAR: &str = "VIBECODER_CONFIG";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct VibeConfig {
    pub log_path: PathBuf,
    pub generation: GenerationSettings,
    pub knowledge: KnowledgeSettings,
    pub pipeline: PipelineTimings,
    pub hosting: HostingSettings,
    pub ui: UiConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct UiConfig {
    pub tick_rate_ms: u64,
    pub theme: String,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: 250,
            theme: "vibe".to_string(),
        }
    }
}

impl Default for VibeConfig {
    fn default() -> Self {
        Self {
            log_path: PathBuf::from("vibecoder.log"),
            generation: GenerationSettings::default(),
            knowledge: KnowledgeSettings::default(),
            pipeline: PipelineTimings::default(),
            hosting: HostingSettings::default(),
            ui: UiConfig::default(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Invalid config value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

impl VibeConfig {
    /// Load from `--config <path>`, then `VIBECODER_CONFIG`, else defaults.
    pub fn load() -> Result<Self, ConfigError> {
        let config = match config_path_from_args().or_else(config_path_from_env) {
            Some(path) => Self::from_path(&path)?,
            None => Self::default(),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.generation.base_url.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "generation.base_url",
                reason: "must not be empty".to_string(),
            });
        }
        if self.generation.models.fast.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "generation.models.fast",
                reason: "must not be empty".to_string(),
            });
        }
        if self.generation.models.reasoning.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "generation.models.reasoning",
                reason: "must not be empty".to_string(),
            });
        }
        if self.generation.request_timeout_ms == Some(0) {
            return Err(ConfigError::InvalidValue {
                field: "generation.request_timeout_ms",
                reason: "must be > 0 when set".to_string(),
            });
        }
        if self.hosting.repository_name.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "hosting.repository_name",
                reason: "must not be empty".to_string(),
            });
        }
        if self.ui.tick_rate_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "ui.tick_rate_ms",
                reason: "must be > 0".to_string(),
            });
        }
        if self.ui.theme.parse::<ThemeName>().is_err() {
            return Err(ConfigError::InvalidValue {
                field: "ui.theme",
                reason: format!("unknown theme '{}'", self.ui.theme),
            });
        }
        if self.log_path.as_os_str().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "log_path",
                reason: "must not be empty".to_string(),
            });
        }
        Ok(())
    }

    pub fn swarm_settings(&self) -> SwarmSettings {
        SwarmSettings {
            knowledge_credential: self.knowledge.credential.clone(),
            pipeline: self.pipeline.clone(),
            hosting: self.hosting.clone(),
        }
    }
}

fn config_path_from_env() -> Option<PathBuf> {
    std::env::var(CONFIG_ENV_VAR).ok().map(PathBuf::from)
}

fn config_path_from_args() -> Option<PathBuf> {
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        if arg == "--config" {
            return args.next().map(PathBuf::from);
        }
    }
    None
}
