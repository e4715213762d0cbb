//! Swarm event types
//!
//! Everything the pipeline and the background tasks want to change in the
//! session is sent as a [`SwarmEvent`] and folded in by
//! [`SwarmState::apply`](crate::SwarmState::apply), in channel order.

use crate::PipelineStage;
use serde::{Deserialize, Serialize};
use vibe_core::{AgentRole, AgentStatus, FileNode, Message, Tool, ViewMode};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SwarmEvent {
    // ========================================================================
    // PIPELINE EVENTS
    // ========================================================================
    /// The runner moved to a new stage.
    StageEntered { stage: PipelineStage },

    /// Every agent with `role` takes this status and task.
    AgentUpdated {
        role: AgentRole,
        status: AgentStatus,
        task: Option<String>,
    },

    /// A line of agent output that does not go to chat.
    AgentLog { role: AgentRole, line: String },

    MessageAppended { message: Message },

    /// The coder stage replaced the project files.
    ProjectGenerated { name: String, files: Vec<FileNode> },

    ProcessingFinished,

    ViewModeChanged { mode: ViewMode },

    // ========================================================================
    // KNOWLEDGE EVENTS
    // ========================================================================
    KnowledgeConnected,

    ToolsListed { tools: Vec<Tool> },

    // ========================================================================
    // HOSTING EVENTS
    // ========================================================================
    HostingConnected,

    /// The simulated push finished.
    PushCompleted { url: String },
}

impl SwarmEvent {
    pub fn event_type(&self) -> &'static str {
        match self {
            SwarmEvent::StageEntered { .. } => "StageEntered",
            SwarmEvent::AgentUpdated { .. } => "AgentUpdated",
            SwarmEvent::AgentLog { .. } => "AgentLog",
            SwarmEvent::MessageAppended { .. } => "MessageAppended",
            SwarmEvent::ProjectGenerated { .. } => "ProjectGenerated",
            SwarmEvent::ProcessingFinished => "ProcessingFinished",
            SwarmEvent::ViewModeChanged { .. } => "ViewModeChanged",
            SwarmEvent::KnowledgeConnected => "KnowledgeConnected",
            SwarmEvent::ToolsListed { .. } => "ToolsListed",
            SwarmEvent::HostingConnected => "HostingConnected",
            SwarmEvent::PushCompleted { .. } => "PushCompleted",
        }
    }

    pub fn agent_updated(role: AgentRole, status: AgentStatus, task: Option<&str>) -> Self {
        SwarmEvent::AgentUpdated {
            role,
            status,
            task: task.map(str::to_string),
        }
    }

    pub fn system_message(content: impl Into<String>) -> Self {
        SwarmEvent::MessageAppended {
            message: Message::system(content),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_serializes_with_type_tag() {
        let event = SwarmEvent::agent_updated(AgentRole::Coder, AgentStatus::Working, Some("x"));
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "AgentUpdated");
        assert_eq!(json["task"], "x");
        assert_eq!(event.event_type(), "AgentUpdated");
    }

    #[test]
    fn test_system_message_helper() {
        match SwarmEvent::system_message("hi") {
            SwarmEvent::MessageAppended { message } => {
                assert_eq!(message.content, "hi");
                assert_eq!(message.origin, vibe_core::MessageOrigin::System);
            }
            other => panic!("unexpected event {:?}", other),
        }
    }
}
