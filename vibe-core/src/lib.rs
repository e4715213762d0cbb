//! VibeCoder Core - Entity Types
//!
//! Pure data structures shared by every other crate: agents, chat messages,
//! the in-memory project tree, and the fixed fixtures the demo starts from.
//! No I/O and no async here.

use chrono::{DateTime, Utc};
use uuid::Uuid;

pub mod entities;
pub mod enums;
pub mod error;
pub mod fixtures;

pub use entities::{Agent, FileNode, Message, NodeKind, Project, Tool};
pub use enums::{
    AgentRole, AgentRoleParseError, AgentStatus, MessageOrigin, ToolSource, ViewMode,
};
pub use error::{GenerationError, KnowledgeError, VibeError, VibeResult};
pub use fixtures::{
    generated_scaffold, initial_agents, initial_project, GENERATED_PROJECT_NAME,
    INITIAL_PROJECT_NAME,
};

// ============================================================================
// IDENTITY TYPES
// ============================================================================

/// Message identifier using UUIDv7 for timestamp-sortable IDs.
pub type MessageId = Uuid;

/// Timestamp type using UTC timezone.
pub type Timestamp = DateTime<Utc>;

/// Generate a new UUIDv7 identifier.
pub fn new_message_id() -> MessageId {
    Uuid::now_v7()
}
