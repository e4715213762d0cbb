//! Session state folded from swarm events.

use crate::hosting::push_success_notice;
use crate::{PipelineStage, SwarmEvent};
use vibe_core::{
    initial_agents, initial_project, Agent, AgentRole, Message, Project, Tool, VibeError,
    VibeResult, ViewMode,
};

pub const KNOWLEDGE_READY_MESSAGE: &str =
    "Connected to Context 7 MCP Server. Integration Swarm ready.";

/// Everything the UI renders. Owned by the UI loop; only mutated through
/// [`SwarmState::begin_submission`], [`SwarmState::set_view_mode`] and
/// [`SwarmState::apply`].
#[derive(Debug, Clone, PartialEq)]
pub struct SwarmState {
    pub agents: Vec<Agent>,
    pub messages: Vec<Message>,
    pub project: Project,
    pub view_mode: ViewMode,
    /// Set while a pipeline run is in flight. The only concurrency guard.
    pub processing: bool,
    pub stage: PipelineStage,
    pub tools: Vec<Tool>,
}

impl Default for SwarmState {
    fn default() -> Self {
        Self {
            agents: initial_agents(),
            messages: Vec::new(),
            project: initial_project(),
            view_mode: ViewMode::Chat,
            processing: false,
            stage: PipelineStage::Idle,
            tools: Vec::new(),
        }
    }
}

impl SwarmState {
    /// Accept `input` for a new run.
    ///
    /// Returns `false` and changes nothing for blank input or while a run is
    /// in flight.
    pub fn begin_submission(&mut self, input: &str) -> bool {
        if input.trim().is_empty() || self.processing {
            return false;
        }
        self.messages.push(Message::user(input));
        self.processing = true;
        self.view_mode = ViewMode::Chat;
        true
    }

    /// User-initiated view change, allowed once there is more than one file.
    pub fn set_view_mode(&mut self, mode: ViewMode) -> VibeResult<()> {
        if !self.project.can_toggle_view() {
            return Err(VibeError::Validation {
                field: "view_mode",
                reason: format!(
                    "project has {} file(s); the code view needs more than one",
                    self.project.file_count()
                ),
            });
        }
        self.view_mode = mode;
        Ok(())
    }

    pub fn agent(&self, id: &str) -> Option<&Agent> {
        self.agents.iter().find(|a| a.id == id)
    }

    pub fn agent_by_role(&self, role: AgentRole) -> Option<&Agent> {
        self.agents.iter().find(|a| a.role == role)
    }

    /// Label for an assistant message: the agent's name, or "AI".
    pub fn speaker_name(&self, message: &Message) -> &str {
        message
            .agent_id
            .as_deref()
            .and_then(|id| self.agent(id))
            .map(|a| a.name.as_str())
            .unwrap_or("AI")
    }

    /// Fold one event into the state. Returns a user-facing notice when the
    /// event warrants one.
    pub fn apply(&mut self, event: SwarmEvent) -> Option<String> {
        tracing::debug!(event = event.event_type(), "Applying swarm event");
        match event {
            SwarmEvent::StageEntered { stage } => self.stage = stage,
            SwarmEvent::AgentUpdated { role, status, task } => {
                for agent in self.agents.iter_mut().filter(|a| a.role == role) {
                    agent.status = status;
                    agent.current_task = task.clone();
                }
            }
            SwarmEvent::AgentLog { role, line } => {
                for agent in self.agents.iter_mut().filter(|a| a.role == role) {
                    agent.logs.push(line.clone());
                }
            }
            SwarmEvent::MessageAppended { message } => self.messages.push(message),
            SwarmEvent::ProjectGenerated { name, files } => {
                self.project.name = name;
                self.project.files = files;
            }
            SwarmEvent::ProcessingFinished => self.processing = false,
            SwarmEvent::ViewModeChanged { mode } => self.view_mode = mode,
            SwarmEvent::KnowledgeConnected => {
                self.project.knowledge_connected = true;
                self.messages.push(Message::system(KNOWLEDGE_READY_MESSAGE));
            }
            SwarmEvent::ToolsListed { tools } => self.tools = tools,
            SwarmEvent::HostingConnected => self.project.hosting_connected = true,
            SwarmEvent::PushCompleted { url } => {
                let notice = push_success_notice(&url);
                self.project.repository_url = Some(url);
                return Some(notice);
            }
        }
        None
    }
}
