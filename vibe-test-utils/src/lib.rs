//! VibeCoder Test Utilities
//!
//! Shared test infrastructure for the workspace:
//! - Scripted text generators and generation backends
//! - Knowledge-service builders with zero delays
//! - Proptest generators for prompts, roles and file trees

pub use vibe_core::{
    AgentRole, AgentStatus, FileNode, GenerationError, KnowledgeError, Message, MessageOrigin,
    NodeKind, Project, Tool, ViewMode,
};

use async_trait::async_trait;
use std::sync::Mutex;
use vibe_context::{Context7Mock, KnowledgeResult, KnowledgeService, KnowledgeSettings};
use vibe_llm::{GenerationBackend, GenerationRequest, TextGenerator};

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

// ============================================================================
// MOCK GENERATORS
// ============================================================================

/// One recorded `generate` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationCall {
    pub prompt: String,
    pub role: AgentRole,
    pub context: String,
}

/// Generator that answers `"{ROLE}: {prompt}"` and records every call.
#[derive(Debug, Default)]
pub struct ScriptedGenerator {
    calls: Mutex<Vec<GenerationCall>>,
}

impl ScriptedGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<GenerationCall> {
        lock(&self.calls).clone()
    }

    pub fn reply_for(role: AgentRole, prompt: &str) -> String {
        format!("{}: {}", role, prompt)
    }
}

#[async_trait]
impl TextGenerator for ScriptedGenerator {
    async fn generate(&self, prompt: &str, role: AgentRole, context: &str) -> String {
        lock(&self.calls).push(GenerationCall {
            prompt: prompt.to_string(),
            role,
            context: context.to_string(),
        });
        Self::reply_for(role, prompt)
    }
}

// ============================================================================
// MOCK BACKENDS
// ============================================================================

/// Backend returning a fixed result and recording the requests it saw.
#[derive(Debug)]
pub struct StaticBackend {
    result: Result<String, GenerationError>,
    requests: Mutex<Vec<GenerationRequest>>,
}

impl StaticBackend {
    pub fn replying(text: impl Into<String>) -> Self {
        Self {
            result: Ok(text.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(error: GenerationError) -> Self {
        Self {
            result: Err(error),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<GenerationRequest> {
        lock(&self.requests).clone()
    }
}

#[async_trait]
impl GenerationBackend for StaticBackend {
    async fn generate_content(
        &self,
        request: &GenerationRequest,
    ) -> Result<String, GenerationError> {
        lock(&self.requests).push(request.clone());
        self.result.clone()
    }

    fn provider_id(&self) -> &str {
        "static"
    }
}

// ============================================================================
// KNOWLEDGE SERVICES
// ============================================================================

/// Knowledge settings with every delay set to zero.
pub fn instant_knowledge_settings() -> KnowledgeSettings {
    KnowledgeSettings {
        connect_delay_ms: 0,
        query_delay_ms: 0,
        tools_delay_ms: 0,
        ..KnowledgeSettings::default()
    }
}

/// Knowledge service that never connects, so every query fails.
#[derive(Debug, Default)]
pub struct OfflineKnowledge;

#[async_trait]
impl KnowledgeService for OfflineKnowledge {
    async fn connect(&self, _credential: &str) -> bool {
        false
    }

    async fn query(&self, _query: &str) -> KnowledgeResult<String> {
        Err(KnowledgeError::NotConnected)
    }

    async fn list_tools(&self) -> KnowledgeResult<Vec<Tool>> {
        Err(KnowledgeError::NotConnected)
    }

    fn is_connected(&self) -> bool {
        false
    }
}

/// A connected mock with default delays.
pub async fn connected_context7() -> Context7Mock {
    let mock = Context7Mock::default();
    mock.connect(vibe_context::DEMO_CREDENTIAL).await;
    mock
}

// ============================================================================
// PROPTEST GENERATORS
// ============================================================================

pub mod generators {
    //! Proptest strategies for VibeCoder inputs.

    use super::*;
    use proptest::prelude::*;

    /// Input made only of whitespace, including the empty string.
    pub fn arb_blank_input() -> impl Strategy<Value = String> {
        prop::collection::vec(prop::sample::select(vec![' ', '\t', '\n', '\r']), 0..12)
            .prop_map(|chars| chars.into_iter().collect())
    }

    /// Input with at least one visible character.
    pub fn arb_prompt() -> impl Strategy<Value = String> {
        ("[ ]{0,3}", "[a-zA-Z0-9][a-zA-Z0-9 ,.!?-]{0,60}")
            .prop_map(|(lead, body)| format!("{}{}", lead, body))
    }

    pub fn arb_agent_role() -> impl Strategy<Value = AgentRole> {
        prop::sample::select(AgentRole::all().to_vec())
    }

    /// A source line built from fragments the colorizer has rules for.
    pub fn arb_code_line() -> impl Strategy<Value = String> {
        let fragment = prop::sample::select(vec![
            "const ", "let ", "import ", "from ", "export ", "default ", "function ",
            "return ", "interface ", "type ", "'str'", "\"dq\"", "// note", "App",
            "Header", "{", "}", "(", ")", "[", "]", " ", "x", "=", ";", "<div>", "'",
            "\"", "1", "é",
        ]);
        prop::collection::vec(fragment, 0..16).prop_map(|parts| parts.concat())
    }

    /// A file tree whose node ids are unique.
    pub fn arb_file_tree() -> impl Strategy<Value = Vec<FileNode>> {
        let leaf = "[a-z]{1,6}".prop_map(|name| {
            FileNode::file(name.clone(), format!("{}.ts", name), format!("/{}.ts", name), "")
        });
        let node = leaf.prop_recursive(3, 24, 4, |inner| {
            ("[a-z]{1,6}", prop::collection::vec(inner, 0..4)).prop_map(|(name, children)| {
                FileNode::directory(name.clone(), name.clone(), format!("/{}", name), children)
            })
        });
        prop::collection::vec(node, 1..4).prop_map(|mut roots| {
            let mut next = 0usize;
            for root in roots.iter_mut() {
                renumber(root, &mut next);
            }
            roots
        })
    }

    fn renumber(node: &mut FileNode, next: &mut usize) {
        node.id = format!("n{}", next);
        *next += 1;
        if let NodeKind::Directory { children } = &mut node.kind {
            for child in children.iter_mut() {
                renumber(child, next);
            }
        }
    }
}
