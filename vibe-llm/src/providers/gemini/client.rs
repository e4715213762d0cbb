//! Gemini HTTP client

use super::types::{ApiError, Content, GenerateContentRequest, GenerateContentResponse};
use crate::{GenerationBackend, GenerationRequest};
use async_trait::async_trait;
use reqwest::Client;
use vibe_core::GenerationError;

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Gemini `generateContent` backend. No retries, no rate limiting.
pub struct GeminiBackend {
    client: Client,
    api_key: String,
    base_url: String,
}

impl GeminiBackend {
    /// Create a backend against the public endpoint.
    ///
    /// # Arguments
    /// * `api_key` - Gemini API key, sent as `x-goog-api-key`
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn endpoint(&self, model: &str) -> String {
        format!("{}/models/{}:generateContent", self.base_url, model)
    }
}

#[async_trait]
impl GenerationBackend for GeminiBackend {
    async fn generate_content(
        &self,
        request: &GenerationRequest,
    ) -> Result<String, GenerationError> {
        if self.api_key.trim().is_empty() {
            return Err(GenerationError::NotConfigured);
        }

        let body = GenerateContentRequest {
            system_instruction: Content::text(None, request.system_instruction.clone()),
            contents: vec![Content::text(Some("user"), request.contents.clone())],
        };

        let response = self
            .client
            .post(self.endpoint(&request.model))
            .header("x-goog-api-key", &self.api_key)
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| GenerationError::Transport {
                reason: e.to_string(),
            })?;

        let status = response.status();
        if status.is_success() {
            let parsed: GenerateContentResponse =
                response
                    .json()
                    .await
                    .map_err(|e| GenerationError::InvalidResponse {
                        reason: format!("Failed to parse response: {}", e),
                    })?;
            Ok(parsed.text())
        } else {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());

            let message = match serde_json::from_str::<ApiError>(&error_text) {
                Ok(api_error) => api_error.error.message,
                Err(_) => error_text,
            };

            Err(GenerationError::RequestFailed {
                status: status.as_u16(),
                message,
            })
        }
    }

    fn provider_id(&self) -> &str {
        "gemini"
    }
}

impl std::fmt::Debug for GeminiBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiBackend")
            .field("base_url", &self.base_url)
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}
