//! Enum types for swarm entities

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// AGENT ENUMS
// ============================================================================

/// Role an agent plays in the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AgentRole {
    /// Reads the user's idea and answers first
    Coordinator,
    /// Proposes stack and file structure
    Architect,
    /// Checks library versions against the knowledge service
    Integrator,
    /// Produces the scaffold
    Coder,
    /// Declared, never scheduled by the pipeline
    QualityChecker,
}

impl AgentRole {
    /// Stable upper-case tag used in logs and fallback text.
    pub fn as_tag(&self) -> &'static str {
        match self {
            AgentRole::Coordinator => "COORDINATOR",
            AgentRole::Architect => "ARCHITECT",
            AgentRole::Integrator => "INTEGRATOR",
            AgentRole::Coder => "CODER",
            AgentRole::QualityChecker => "QA",
        }
    }

    /// Parse from tag, case-insensitive.
    pub fn from_tag(s: &str) -> Result<Self, AgentRoleParseError> {
        match s.trim().to_ascii_uppercase().as_str() {
            "COORDINATOR" => Ok(AgentRole::Coordinator),
            "ARCHITECT" => Ok(AgentRole::Architect),
            "INTEGRATOR" => Ok(AgentRole::Integrator),
            "CODER" => Ok(AgentRole::Coder),
            "QA" => Ok(AgentRole::QualityChecker),
            _ => Err(AgentRoleParseError(s.to_string())),
        }
    }

    pub fn all() -> &'static [AgentRole] {
        &[
            AgentRole::Coordinator,
            AgentRole::Architect,
            AgentRole::Integrator,
            AgentRole::Coder,
            AgentRole::QualityChecker,
        ]
    }
}

impl fmt::Display for AgentRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_tag())
    }
}

impl FromStr for AgentRole {
    type Err = AgentRoleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_tag(s)
    }
}

/// Error when parsing an invalid agent role string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentRoleParseError(pub String);

impl fmt::Display for AgentRoleParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid agent role: {}", self.0)
    }
}

impl std::error::Error for AgentRoleParseError {}

/// Status of an agent as shown in the swarm strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum AgentStatus {
    #[default]
    Idle,
    Thinking,
    Working,
    Waiting,
    Completed,
    Error,
}

impl AgentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AgentStatus::Idle => "Idle",
            AgentStatus::Thinking => "Thinking",
            AgentStatus::Working => "Working",
            AgentStatus::Waiting => "Waiting",
            AgentStatus::Completed => "Completed",
            AgentStatus::Error => "Error",
        }
    }

    /// Thinking and Working pulse in the UI.
    pub fn is_busy(&self) -> bool {
        matches!(self, AgentStatus::Thinking | AgentStatus::Working)
    }

    /// Short label for the status strip.
    pub fn status_text<'a>(&self, task: Option<&'a str>) -> &'a str {
        match self {
            AgentStatus::Thinking => "Reasoning...",
            AgentStatus::Working => task.unwrap_or("Processing..."),
            AgentStatus::Completed => "Done",
            AgentStatus::Error => "Failed",
            AgentStatus::Idle | AgentStatus::Waiting => "Idle",
        }
    }
}

impl fmt::Display for AgentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// CHAT / PROJECT ENUMS
// ============================================================================

/// Who produced a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageOrigin {
    User,
    Assistant,
    System,
}

/// Where a tool comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ToolSource {
    Context7,
    System,
    GitHub,
}

impl fmt::Display for ToolSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ToolSource::Context7 => "Context7",
            ToolSource::System => "System",
            ToolSource::GitHub => "GitHub",
        };
        write!(f, "{}", label)
    }
}

/// Which main pane is visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ViewMode {
    #[default]
    Chat,
    Code,
}

impl ViewMode {
    pub fn title(&self) -> &'static str {
        match self {
            ViewMode::Chat => "Chat",
            ViewMode::Code => "IDE",
        }
    }

    pub fn toggled(&self) -> ViewMode {
        match self {
            ViewMode::Chat => ViewMode::Code,
            ViewMode::Code => ViewMode::Chat,
        }
    }
}
