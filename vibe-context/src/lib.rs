//! VibeCoder Context - knowledge-service client
//!
//! "Context 7" is an external documentation/knowledge service the integrator
//! agent consults. The only implementation here is [`Context7Mock`], which
//! answers with canned text after artificial delays. Callers depend on the
//! [`KnowledgeService`] trait so a real MCP client can replace it.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use vibe_core::{KnowledgeError, Tool, ToolSource};

/// Result type for knowledge-service calls.
pub type KnowledgeResult<T> = Result<T, KnowledgeError>;

// ============================================================================
// TRAIT
// ============================================================================

/// Client for an external knowledge service.
///
/// Connection state is interior so one client can be shared as
/// `Arc<dyn KnowledgeService>` between the startup handshake and the pipeline.
#[async_trait]
pub trait KnowledgeService: Send + Sync {
    /// Perform the handshake. Returns `true` once connected.
    async fn connect(&self, credential: &str) -> bool;

    /// Look up documentation relevant to `query`.
    async fn query(&self, query: &str) -> KnowledgeResult<String>;

    /// Tools advertised by the service.
    async fn list_tools(&self) -> KnowledgeResult<Vec<Tool>>;

    fn is_connected(&self) -> bool;
}

// ============================================================================
// SETTINGS
// ============================================================================

/// Delays and credential for the mock, from the `[knowledge]` config table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct KnowledgeSettings {
    pub credential: String,
    pub connect_delay_ms: u64,
    pub query_delay_ms: u64,
    pub tools_delay_ms: u64,
}

impl Default for KnowledgeSettings {
    fn default() -> Self {
        Self {
            credential: DEMO_CREDENTIAL.to_string(),
            connect_delay_ms: 1200,
            query_delay_ms: 1500,
            tools_delay_ms: 500,
        }
    }
}

pub const DEMO_CREDENTIAL: &str = "demo-key";

// ============================================================================
// MOCK
// ============================================================================

const NEXT_REPLY: &str = "[Context 7] Retrieved latest Next.js 14 App Router patterns.
      - Use server components by default.
      - Use 'use client' for interactive components.
      - Route handlers in route.ts.";

const TAILWIND_REPLY: &str = "[Context 7] Retrieved Tailwind CSS v3.4 docs.
      - Support for nested groups.
      - New size-* utilities.";

/// The fixed tool catalogue.
pub fn context7_tools() -> Vec<Tool> {
    vec![
        Tool::new(
            "search_documentation",
            "Search for latest documentation on libraries via Context 7",
            ToolSource::Context7,
        ),
        Tool::new(
            "get_library_version",
            "Get the latest stable version of a package",
            ToolSource::Context7,
        ),
        Tool::new(
            "validate_integration_pattern",
            "Check if a coding pattern is deprecated using Context 7 knowledge base",
            ToolSource::Context7,
        ),
    ]
}

/// Canned answer for a query, picked by case-insensitive keyword.
pub fn canned_reply(query: &str) -> String {
    let lowered = query.to_lowercase();
    if lowered.contains("next") {
        NEXT_REPLY.to_string()
    } else if lowered.contains("tailwind") {
        TAILWIND_REPLY.to_string()
    } else {
        format!(
            "[Context 7] Retrieved generic latest context for: {}. Integration verified.",
            query
        )
    }
}

/// Simulated Context 7 client. Performs no I/O.
#[derive(Debug)]
pub struct Context7Mock {
    connected: AtomicBool,
    connect_delay: Duration,
    query_delay: Duration,
    tools_delay: Duration,
}

impl Context7Mock {
    pub fn new(settings: &KnowledgeSettings) -> Self {
        Self {
            connected: AtomicBool::new(false),
            connect_delay: Duration::from_millis(settings.connect_delay_ms),
            query_delay: Duration::from_millis(settings.query_delay_ms),
            tools_delay: Duration::from_millis(settings.tools_delay_ms),
        }
    }

    fn ensure_connected(&self) -> KnowledgeResult<()> {
        if self.connected.load(Ordering::Acquire) {
            Ok(())
        } else {
            Err(KnowledgeError::NotConnected)
        }
    }
}

impl Default for Context7Mock {
    fn default() -> Self {
        Self::new(&KnowledgeSettings::default())
    }
}

#[async_trait]
impl KnowledgeService for Context7Mock {
    async fn connect(&self, _credential: &str) -> bool {
        tokio::time::sleep(self.connect_delay).await;
        self.connected.store(true, Ordering::Release);
        tracing::info!("Connected to Context 7 server");
        true
    }

    async fn query(&self, query: &str) -> KnowledgeResult<String> {
        self.ensure_connected()?;
        tracing::info!(query = %query, "Querying Context 7");
        tokio::time::sleep(self.query_delay).await;
        Ok(canned_reply(query))
    }

    async fn list_tools(&self) -> KnowledgeResult<Vec<Tool>> {
        self.ensure_connected()?;
        tokio::time::sleep(self.tools_delay).await;
        Ok(context7_tools())
    }

    fn is_connected(&self) -> bool {
        self.connected.load(Ordering::Acquire)
    }
}
