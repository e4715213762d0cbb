//! VibeCoder LLM - role-aware text generation
//!
//! The pipeline talks to a [`TextGenerator`], which never fails: transport
//! and API errors come back as displayable text. The HTTP work lives behind
//! [`GenerationBackend`] so the Gemini provider can be swapped or mocked.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use vibe_core::{AgentRole, GenerationError};

pub mod profiles;
pub mod providers;

pub use profiles::{ModelSelection, ModelTier, RoleProfile};
pub use providers::GeminiBackend;

/// Returned when the backend answers with no text.
pub const EMPTY_RESPONSE: &str = "No response generated.";

/// Environment variables checked, in order, for the generation credential.
pub const API_KEY_ENV_VARS: &[&str] = &["API_KEY", "GEMINI_API_KEY"];

// ============================================================================
// TRAITS
// ============================================================================

/// Produces agent text for a role. Implementations must not fail.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str, role: AgentRole, context: &str) -> String;
}

/// A single generation call, already resolved to a model and instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    pub model: String,
    pub system_instruction: String,
    pub contents: String,
}

/// Raw access to a generative-text endpoint.
#[async_trait]
pub trait GenerationBackend: Send + Sync {
    async fn generate_content(&self, request: &GenerationRequest)
        -> Result<String, GenerationError>;

    /// Short provider name for logs.
    fn provider_id(&self) -> &str;
}

// ============================================================================
// SETTINGS
// ============================================================================

/// Endpoint and model settings, loaded from the `[generation]` config table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct GenerationSettings {
    pub base_url: String,
    pub models: ModelSelection,
    /// No timeout when absent.
    pub request_timeout_ms: Option<u64>,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            base_url: providers::gemini::DEFAULT_BASE_URL.to_string(),
            models: ModelSelection::default(),
            request_timeout_ms: None,
        }
    }
}

/// Read the credential once from the process environment. Empty values count
/// as absent.
pub fn api_key_from_env() -> Option<String> {
    API_KEY_ENV_VARS
        .iter()
        .filter_map(|name| std::env::var(name).ok())
        .map(|value| value.trim().to_string())
        .find(|value| !value.is_empty())
}

// ============================================================================
// CLIENT
// ============================================================================

/// Text shown when no credential is configured.
pub fn fallback_response(role: AgentRole, prompt: &str) -> String {
    format!(
        "[System] API Key not configured. Simulating {} response to: \"{}\"",
        role, prompt
    )
}

/// Text shown when the backend call fails.
pub fn error_response(error: &GenerationError) -> String {
    format!("Error generating content: {}", error)
}

/// Generation client used by the pipeline.
///
/// Without a backend the client is disabled and every call returns
/// [`fallback_response`].
#[derive(Clone)]
pub struct GenerationClient {
    backend: Option<Arc<dyn GenerationBackend>>,
    models: ModelSelection,
    timeout: Option<Duration>,
}

impl GenerationClient {
    pub fn new(backend: Arc<dyn GenerationBackend>, models: ModelSelection) -> Self {
        Self {
            backend: Some(backend),
            models,
            timeout: None,
        }
    }

    pub fn disabled() -> Self {
        Self {
            backend: None,
            models: ModelSelection::default(),
            timeout: None,
        }
    }

    /// Gemini-backed client when a credential is present, disabled otherwise.
    pub fn from_settings(api_key: Option<String>, settings: &GenerationSettings) -> Self {
        let client = match api_key {
            Some(key) => {
                let backend = GeminiBackend::new(key).with_base_url(settings.base_url.clone());
                Self::new(Arc::new(backend), settings.models.clone())
            }
            None => {
                tracing::warn!("No generation credential found; agents will answer with fallback text");
                Self::disabled()
            }
        };
        match settings.request_timeout_ms {
            Some(ms) => client.with_timeout(Duration::from_millis(ms)),
            None => client,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn is_enabled(&self) -> bool {
        self.backend.is_some()
    }

    /// Resolve model, instruction and the `Context`/`Task` text blob.
    pub fn build_request(&self, prompt: &str, role: AgentRole, context: &str) -> GenerationRequest {
        let profile = RoleProfile::for_role(role);
        GenerationRequest {
            model: self.models.model_for(profile.tier).to_string(),
            system_instruction: profile.system_instruction.to_string(),
            contents: format!("Context: {}\n\nTask: {}", context, prompt),
        }
    }

    async fn call(
        &self,
        backend: &dyn GenerationBackend,
        request: &GenerationRequest,
    ) -> Result<String, GenerationError> {
        match self.timeout {
            Some(limit) => tokio::time::timeout(limit, backend.generate_content(request))
                .await
                .map_err(|_| GenerationError::Timeout {
                    after_ms: limit.as_millis() as u64,
                })?,
            None => backend.generate_content(request).await,
        }
    }
}

#[async_trait]
impl TextGenerator for GenerationClient {
    async fn generate(&self, prompt: &str, role: AgentRole, context: &str) -> String {
        let Some(backend) = self.backend.as_deref() else {
            return fallback_response(role, prompt);
        };

        let request = self.build_request(prompt, role, context);
        tracing::debug!(
            provider = backend.provider_id(),
            model = %request.model,
            role = %role,
            "Sending generation request"
        );

        match self.call(backend, &request).await {
            Ok(text) if text.is_empty() => EMPTY_RESPONSE.to_string(),
            Ok(text) => text,
            Err(err) => {
                tracing::error!(role = %role, error = %err, "Generation request failed");
                error_response(&err)
            }
        }
    }
}

impl std::fmt::Debug for GenerationClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GenerationClient")
            .field("enabled", &self.backend.is_some())
            .field("models", &self.models)
            .field("timeout", &self.timeout)
            .finish()
    }
}
