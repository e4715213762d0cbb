//! VibeCoder Swarm - pipeline and session controller
//!
//! [`Swarm`] is the application context. It owns the session
//! [`SwarmState`], the injected generator and knowledge service, the push
//! simulator, and every task it spawns. Background work never touches the
//! state directly: it sends [`SwarmEvent`]s that the UI loop hands back to
//! [`Swarm::apply`].

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use vibe_context::{KnowledgeService, DEMO_CREDENTIAL};
use vibe_core::{VibeResult, ViewMode};
use vibe_llm::TextGenerator;

pub mod events;
pub mod hosting;
pub mod pipeline;
pub mod state;

pub use events::SwarmEvent;
pub use hosting::{HostingSettings, HostingSimulator, PushRequest};
pub use pipeline::{Pipeline, PipelineStage, PipelineTimings};
pub use state::SwarmState;

/// Capacity of the event channel between background tasks and the UI loop.
pub const EVENT_CHANNEL_CAPACITY: usize = 256;

/// Runtime knobs for the controller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwarmSettings {
    pub knowledge_credential: String,
    pub pipeline: PipelineTimings,
    pub hosting: HostingSettings,
}

impl Default for SwarmSettings {
    fn default() -> Self {
        Self {
            knowledge_credential: DEMO_CREDENTIAL.to_string(),
            pipeline: PipelineTimings::default(),
            hosting: HostingSettings::default(),
        }
    }
}

pub struct Swarm {
    state: SwarmState,
    pipeline: Arc<Pipeline>,
    knowledge: Arc<dyn KnowledgeService>,
    hosting: Arc<HostingSimulator>,
    credential: String,
    events: mpsc::Sender<SwarmEvent>,
    tasks: Vec<JoinHandle<()>>,
}

impl Swarm {
    /// Build the controller and the receiving end of its event channel.
    pub fn new(
        generator: Arc<dyn TextGenerator>,
        knowledge: Arc<dyn KnowledgeService>,
        settings: SwarmSettings,
    ) -> (Self, mpsc::Receiver<SwarmEvent>) {
        let (events, receiver) = mpsc::channel(EVENT_CHANNEL_CAPACITY);
        let pipeline = Pipeline::new(generator, Arc::clone(&knowledge), settings.pipeline);
        let swarm = Self {
            state: SwarmState::default(),
            pipeline: Arc::new(pipeline),
            knowledge,
            hosting: Arc::new(HostingSimulator::new(settings.hosting)),
            credential: settings.knowledge_credential,
            events,
            tasks: Vec::new(),
        };
        (swarm, receiver)
    }

    pub fn state(&self) -> &SwarmState {
        &self.state
    }

    /// Spawn the knowledge handshake: connect, announce, list tools.
    pub fn start(&mut self) {
        let knowledge = Arc::clone(&self.knowledge);
        let events = self.events.clone();
        let credential = self.credential.clone();
        self.spawn(async move {
            if !knowledge.connect(&credential).await {
                tracing::warn!("Knowledge service refused the connection");
                return;
            }
            if events.send(SwarmEvent::KnowledgeConnected).await.is_err() {
                return;
            }
            match knowledge.list_tools().await {
                Ok(tools) => {
                    tracing::info!(count = tools.len(), "Knowledge tools listed");
                    let _ = events.send(SwarmEvent::ToolsListed { tools }).await;
                }
                Err(err) => tracing::warn!(error = %err, "Could not list knowledge tools"),
            }
        });
    }

    /// Submit user input. Returns `false` when the input was ignored.
    pub fn submit(&mut self, input: &str) -> bool {
        if !self.state.begin_submission(input) {
            tracing::debug!(processing = self.state.processing, "Submission ignored");
            return false;
        }
        let pipeline = Arc::clone(&self.pipeline);
        let events = self.events.clone();
        let input = input.to_string();
        self.spawn(async move {
            if pipeline.run(&input, &events).await.is_err() {
                tracing::debug!("Session closed before the pipeline finished");
            }
        });
        true
    }

    pub fn apply(&mut self, event: SwarmEvent) -> Option<String> {
        self.state.apply(event)
    }

    pub fn set_view_mode(&mut self, mode: ViewMode) -> VibeResult<()> {
        self.state.set_view_mode(mode)
    }

    /// Flip between chat and code views.
    pub fn toggle_view(&mut self) -> VibeResult<ViewMode> {
        let mode = self.state.view_mode.toggled();
        self.state.set_view_mode(mode)?;
        Ok(mode)
    }

    pub fn request_push(&self) -> PushRequest {
        self.hosting.request(self.state.project.hosting_connected)
    }

    /// The user confirmed connecting the hosting account. Marks it connected,
    /// starts the simulated push and returns the notice to show now.
    pub fn confirm_push(&mut self) -> String {
        self.state.apply(SwarmEvent::HostingConnected);
        let hosting = Arc::clone(&self.hosting);
        let events = self.events.clone();
        self.spawn(async move {
            let url = hosting.push().await;
            let _ = events.send(SwarmEvent::PushCompleted { url }).await;
        });
        self.hosting.connected_notice()
    }

    /// Abort every outstanding task.
    pub fn shutdown(&mut self) {
        for task in self.tasks.drain(..) {
            task.abort();
        }
    }

    fn spawn<F>(&mut self, future: F)
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        self.tasks.retain(|task| !task.is_finished());
        self.tasks.push(tokio::spawn(future));
    }
}

impl Drop for Swarm {
    fn drop(&mut self) {
        self.shutdown();
    }
}

impl std::fmt::Debug for Swarm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Swarm")
            .field("state", &self.state)
            .field("pipeline", &self.pipeline)
            .field("tasks", &self.tasks.len())
            .finish_non_exhaustive()
    }
}
