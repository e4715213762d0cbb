//! Generation client behaviour against recorded backends.

use proptest::prelude::*;
use std::sync::Arc;
use std::time::Duration;
use vibe_core::{AgentRole, GenerationError};
use vibe_llm::{
    profiles::{DEFAULT_FAST_MODEL, DEFAULT_REASONING_MODEL},
    GenerationBackend, GenerationClient, GenerationRequest, ModelSelection, TextGenerator,
};
use vibe_test_utils::generators::{arb_agent_role, arb_prompt};
use vibe_test_utils::StaticBackend;

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(50))]

    /// Property: without a credential the reply names the role and quotes the prompt
    #[test]
    fn prop_fallback_quotes_prompt(prompt in arb_prompt(), role in arb_agent_role()) {
        let text = runtime().block_on(GenerationClient::disabled().generate(&prompt, role, ""));
        prop_assert!(text.contains("API Key not configured"));
        let quoted = format!("\"{}\"", prompt);
        prop_assert!(text.contains(&quoted));
        prop_assert!(text.contains(role.as_tag()));
    }
}

#[tokio::test]
async fn test_request_carries_profile_and_context() {
    let backend = Arc::new(StaticBackend::replying("ok"));
    let client = GenerationClient::new(backend.clone(), ModelSelection::default());

    assert_eq!(client.generate("design it", AgentRole::Architect, "notes").await, "ok");
    assert_eq!(client.generate("build it", AgentRole::Coder, "").await, "ok");

    let requests = backend.requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].model, DEFAULT_REASONING_MODEL);
    assert_eq!(requests[0].contents, "Context: notes\n\nTask: design it");
    assert!(requests[0].system_instruction.starts_with("You are a Senior Software Architect"));
    assert_eq!(requests[1].model, DEFAULT_FAST_MODEL);
    assert_eq!(requests[1].contents, "Context: \n\nTask: build it");
    assert!(requests[1].system_instruction.contains("TypeScript only"));
}

#[tokio::test]
async fn test_failure_is_reported_as_text() {
    let backend = Arc::new(StaticBackend::failing(GenerationError::Transport {
        reason: "connection refused".to_string(),
    }));
    let client = GenerationClient::new(backend, ModelSelection::default());
    assert_eq!(
        client.generate("x", AgentRole::Integrator, "").await,
        "Error generating content: Transport error: connection refused"
    );
}

struct StalledBackend;

#[async_trait::async_trait]
impl GenerationBackend for StalledBackend {
    async fn generate_content(
        &self,
        _request: &GenerationRequest,
    ) -> Result<String, GenerationError> {
        tokio::time::sleep(Duration::from_secs(3600)).await;
        Ok("late".to_string())
    }

    fn provider_id(&self) -> &str {
        "stalled"
    }
}

#[tokio::test(start_paused = true)]
async fn test_timeout_is_reported_as_text() {
    let client = GenerationClient::new(Arc::new(StalledBackend), ModelSelection::default())
        .with_timeout(Duration::from_millis(250));
    assert_eq!(
        client.generate("x", AgentRole::Coordinator, "").await,
        "Error generating content: Request timed out after 250ms"
    );
}
