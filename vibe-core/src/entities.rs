//! Core entity structures

use crate::{
    new_message_id, AgentRole, AgentStatus, MessageId, MessageOrigin, Timestamp, ToolSource,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};

// ============================================================================
// AGENT
// ============================================================================

/// A named participant in the simulated pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Agent {
    pub id: String,
    pub name: String,
    pub role: AgentRole,
    pub status: AgentStatus,
    pub current_task: Option<String>,
    pub logs: Vec<String>,
}

impl Agent {
    pub fn new(id: impl Into<String>, name: impl Into<String>, role: AgentRole) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            role,
            status: AgentStatus::Idle,
            current_task: None,
            logs: Vec::new(),
        }
    }

    /// Label for the status strip.
    pub fn status_text(&self) -> &str {
        self.status.status_text(self.current_task.as_deref())
    }
}

// ============================================================================
// MESSAGE
// ============================================================================

/// One entry in the chat history. Append-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: MessageId,
    pub origin: MessageOrigin,
    pub content: String,
    pub timestamp: Timestamp,
    pub agent_id: Option<String>,
}

impl Message {
    fn new(origin: MessageOrigin, content: impl Into<String>, agent_id: Option<String>) -> Self {
        Self {
            id: new_message_id(),
            origin,
            content: content.into(),
            timestamp: Utc::now(),
            agent_id,
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(MessageOrigin::User, content, None)
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::new(MessageOrigin::System, content, None)
    }

    /// Assistant reply attributed to a specific agent.
    pub fn from_agent(agent_id: impl Into<String>, content: impl Into<String>) -> Self {
        Self::new(MessageOrigin::Assistant, content, Some(agent_id.into()))
    }
}

// ============================================================================
// FILE TREE
// ============================================================================

/// Kind-specific payload of a file tree node.
///
/// Only directories own children, so a tree built from these values cannot
/// contain a file with children or a cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum NodeKind {
    File {
        content: Option<String>,
        language: Option<String>,
    },
    Directory {
        children: Vec<FileNode>,
    },
}

/// A node in the in-memory project file tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileNode {
    pub id: String,
    pub name: String,
    pub path: String,
    #[serde(flatten)]
    pub kind: NodeKind,
}

impl FileNode {
    pub fn file(
        id: impl Into<String>,
        name: impl Into<String>,
        path: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            path: path.into(),
            kind: NodeKind::File {
                content: Some(content.into()),
                language: None,
            },
        }
    }

    pub fn directory(
        id: impl Into<String>,
        name: impl Into<String>,
        path: impl Into<String>,
        children: Vec<FileNode>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            path: path.into(),
            kind: NodeKind::Directory { children },
        }
    }

    pub fn with_language(mut self, tag: impl Into<String>) -> Self {
        if let NodeKind::File { language, .. } = &mut self.kind {
            *language = Some(tag.into());
        }
        self
    }

    pub fn is_directory(&self) -> bool {
        matches!(self.kind, NodeKind::Directory { .. })
    }

    pub fn children(&self) -> &[FileNode] {
        match &self.kind {
            NodeKind::Directory { children } => children,
            NodeKind::File { .. } => &[],
        }
    }

    pub fn content(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::File { content, .. } => content.as_deref(),
            NodeKind::Directory { .. } => None,
        }
    }

    pub fn language(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::File { language, .. } => language.as_deref(),
            NodeKind::Directory { .. } => None,
        }
    }

    /// Number of file-kind nodes in this subtree.
    pub fn file_count(&self) -> usize {
        match &self.kind {
            NodeKind::File { .. } => 1,
            NodeKind::Directory { children } => children.iter().map(FileNode::file_count).sum(),
        }
    }

    /// Depth-first search by id.
    pub fn find(&self, id: &str) -> Option<&FileNode> {
        if self.id == id {
            return Some(self);
        }
        self.children().iter().find_map(|child| child.find(id))
    }

    /// First file in depth-first order.
    pub fn first_file(&self) -> Option<&FileNode> {
        match &self.kind {
            NodeKind::File { .. } => Some(self),
            NodeKind::Directory { children } => children.iter().find_map(FileNode::first_file),
        }
    }
}

// ============================================================================
// PROJECT
// ============================================================================

/// The project being "generated". Replaced wholesale when the coder stage
/// completes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    pub name: String,
    pub files: Vec<FileNode>,
    pub knowledge_connected: bool,
    pub hosting_connected: bool,
    pub repository_url: Option<String>,
    pub description: Option<String>,
}

impl Project {
    /// Number of files across all roots, counted recursively.
    pub fn file_count(&self) -> usize {
        self.files.iter().map(FileNode::file_count).sum()
    }

    pub fn find_node(&self, id: &str) -> Option<&FileNode> {
        self.files.iter().find_map(|root| root.find(id))
    }

    pub fn first_file(&self) -> Option<&FileNode> {
        self.files.iter().find_map(FileNode::first_file)
    }

    /// The Chat/Code toggle is only offered once there is more than one file.
    pub fn can_toggle_view(&self) -> bool {
        self.file_count() > 1
    }
}

// ============================================================================
// TOOL
// ============================================================================

/// A capability advertised by the knowledge service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tool {
    pub name: String,
    pub description: String,
    pub source: ToolSource,
}

impl Tool {
    pub fn new(name: impl Into<String>, description: impl Into<String>, source: ToolSource) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            source,
        }
    }
}
