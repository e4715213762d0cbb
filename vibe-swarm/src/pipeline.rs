//! The scripted four-stage pipeline.
//!
//! Stages run strictly in order. Each stage handler awaits its collaborator,
//! emits its effects as [`SwarmEvent`]s and only then does the runner call
//! [`PipelineStage::advance`].

use crate::SwarmEvent;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use vibe_context::KnowledgeService;
use vibe_core::{generated_scaffold, AgentRole, AgentStatus, Message, ViewMode, GENERATED_PROJECT_NAME};
use vibe_llm::TextGenerator;

pub const BUILD_COMPLETE_MESSAGE: &str = "Build complete. Swapping to IDE View.";

/// Coordinator agent id, used to attribute the plan message.
pub const COORDINATOR_AGENT_ID: &str = "mgr-1";

/// Emission fails only when the receiving session is gone.
pub type EmitResult = Result<(), mpsc::error::SendError<SwarmEvent>>;

// ============================================================================
// STAGES
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum PipelineStage {
    #[default]
    Idle,
    Coordinator,
    Architect,
    Integrator,
    Coder,
    Done,
}

impl PipelineStage {
    /// Next stage. `Done` is terminal.
    pub fn advance(self) -> Self {
        match self {
            PipelineStage::Idle => PipelineStage::Coordinator,
            PipelineStage::Coordinator => PipelineStage::Architect,
            PipelineStage::Architect => PipelineStage::Integrator,
            PipelineStage::Integrator => PipelineStage::Coder,
            PipelineStage::Coder | PipelineStage::Done => PipelineStage::Done,
        }
    }

    /// Role of the agent that works this stage.
    pub fn role(self) -> Option<AgentRole> {
        match self {
            PipelineStage::Coordinator => Some(AgentRole::Coordinator),
            PipelineStage::Architect => Some(AgentRole::Architect),
            PipelineStage::Integrator => Some(AgentRole::Integrator),
            PipelineStage::Coder => Some(AgentRole::Coder),
            PipelineStage::Idle | PipelineStage::Done => None,
        }
    }

    /// Status the stage's agent enters with.
    pub fn entry_status(self) -> Option<AgentStatus> {
        match self {
            PipelineStage::Coordinator | PipelineStage::Architect => Some(AgentStatus::Thinking),
            PipelineStage::Integrator | PipelineStage::Coder => Some(AgentStatus::Working),
            PipelineStage::Idle | PipelineStage::Done => None,
        }
    }

    pub fn task_label(self) -> Option<&'static str> {
        match self {
            PipelineStage::Coordinator => Some("Analyzing vibe..."),
            PipelineStage::Architect => Some("Drafting architecture..."),
            PipelineStage::Integrator => Some("Querying Context 7..."),
            PipelineStage::Coder => Some("Scaffolding codebase..."),
            PipelineStage::Idle | PipelineStage::Done => None,
        }
    }

    pub fn is_running(self) -> bool {
        !matches!(self, PipelineStage::Idle | PipelineStage::Done)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PipelineStage::Idle => "Idle",
            PipelineStage::Coordinator => "Coordinator",
            PipelineStage::Architect => "Architect",
            PipelineStage::Integrator => "Integrator",
            PipelineStage::Coder => "Coder",
            PipelineStage::Done => "Done",
        }
    }
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// TIMINGS
// ============================================================================

/// Coder-stage timers, from the `[pipeline]` config table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct PipelineTimings {
    /// Simulated scaffolding time before the files appear.
    pub scaffold_delay_ms: u64,
    /// Pause between "Build complete" and the switch to the code view.
    pub view_switch_delay_ms: u64,
}

impl Default for PipelineTimings {
    fn default() -> Self {
        Self {
            scaffold_delay_ms: 3000,
            view_switch_delay_ms: 1000,
        }
    }
}

// ============================================================================
// RUNNER
// ============================================================================

/// Runs one submission through every stage. Holds no session state.
pub struct Pipeline {
    generator: Arc<dyn TextGenerator>,
    knowledge: Arc<dyn KnowledgeService>,
    timings: PipelineTimings,
}

impl Pipeline {
    pub fn new(
        generator: Arc<dyn TextGenerator>,
        knowledge: Arc<dyn KnowledgeService>,
        timings: PipelineTimings,
    ) -> Self {
        Self {
            generator,
            knowledge,
            timings,
        }
    }

    /// Drive `input` from the first stage to `Done`.
    pub async fn run(&self, input: &str, events: &mpsc::Sender<SwarmEvent>) -> EmitResult {
        let mut stage = PipelineStage::Idle.advance();
        while stage.is_running() {
            tracing::info!(stage = %stage, "Entering pipeline stage");
            events.send(SwarmEvent::StageEntered { stage }).await?;
            if let (Some(role), Some(status)) = (stage.role(), stage.entry_status()) {
                events
                    .send(SwarmEvent::agent_updated(role, status, stage.task_label()))
                    .await?;
            }
            self.run_stage(stage, input, events).await?;
            stage = stage.advance();
        }
        events.send(SwarmEvent::StageEntered { stage }).await
    }

    async fn run_stage(
        &self,
        stage: PipelineStage,
        input: &str,
        events: &mpsc::Sender<SwarmEvent>,
    ) -> EmitResult {
        match stage {
            PipelineStage::Coordinator => self.coordinate(input, events).await,
            PipelineStage::Architect => self.architect(input, events).await,
            PipelineStage::Integrator => self.integrate(input, events).await,
            PipelineStage::Coder => self.scaffold(events).await,
            PipelineStage::Idle | PipelineStage::Done => Ok(()),
        }
    }

    async fn coordinate(&self, input: &str, events: &mpsc::Sender<SwarmEvent>) -> EmitResult {
        let plan = self.generator.generate(input, AgentRole::Coordinator, "").await;
        events
            .send(SwarmEvent::MessageAppended {
                message: Message::from_agent(COORDINATOR_AGENT_ID, plan),
            })
            .await?;
        complete(AgentRole::Coordinator, events).await
    }

    async fn architect(&self, input: &str, events: &mpsc::Sender<SwarmEvent>) -> EmitResult {
        let prompt = format!("Create a file structure for: {}", input);
        let architecture = self.generator.generate(&prompt, AgentRole::Architect, "").await;
        events
            .send(SwarmEvent::AgentLog {
                role: AgentRole::Architect,
                line: architecture,
            })
            .await?;
        complete(AgentRole::Architect, events).await
    }

    async fn integrate(&self, input: &str, events: &mpsc::Sender<SwarmEvent>) -> EmitResult {
        match self.knowledge.query(input).await {
            Ok(insight) => {
                events
                    .send(SwarmEvent::system_message(format!("Context 7 Insight: {}", insight)))
                    .await?;
                complete(AgentRole::Integrator, events).await
            }
            Err(err) => {
                tracing::warn!(error = %err, "Knowledge query failed, continuing without insight");
                events
                    .send(SwarmEvent::agent_updated(AgentRole::Integrator, AgentStatus::Error, None))
                    .await?;
                events
                    .send(SwarmEvent::system_message(format!("Context 7 unavailable: {}", err)))
                    .await
            }
        }
    }

    async fn scaffold(&self, events: &mpsc::Sender<SwarmEvent>) -> EmitResult {
        tokio::time::sleep(Duration::from_millis(self.timings.scaffold_delay_ms)).await;
        events
            .send(SwarmEvent::ProjectGenerated {
                name: GENERATED_PROJECT_NAME.to_string(),
                files: generated_scaffold(),
            })
            .await?;
        complete(AgentRole::Coder, events).await?;
        events.send(SwarmEvent::ProcessingFinished).await?;
        events.send(SwarmEvent::system_message(BUILD_COMPLETE_MESSAGE)).await?;

        tokio::time::sleep(Duration::from_millis(self.timings.view_switch_delay_ms)).await;
        events
            .send(SwarmEvent::ViewModeChanged {
                mode: ViewMode::Code,
            })
            .await
    }
}

async fn complete(role: AgentRole, events: &mpsc::Sender<SwarmEvent>) -> EmitResult {
    events
        .send(SwarmEvent::agent_updated(role, AgentStatus::Completed, None))
        .await
}

impl fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pipeline")
            .field("timings", &self.timings)
            .finish_non_exhaustive()
    }
}
