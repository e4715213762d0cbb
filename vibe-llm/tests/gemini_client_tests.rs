//! Gemini backend against a local one-shot HTTP stub.

use std::sync::Arc;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;
use vibe_core::{AgentRole, GenerationError};
use vibe_llm::{
    GeminiBackend, GenerationBackend, GenerationClient, GenerationRequest, ModelSelection,
    TextGenerator,
};

/// Serve one canned response, returning the base URL and the raw request seen.
async fn serve_once(status_line: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind stub listener");
    let address = listener.local_addr().expect("stub local addr");
    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.expect("accept request");
        let request = read_request(&mut socket).await;
        let response = format!(
            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status_line,
            body.len(),
            body
        );
        socket.write_all(response.as_bytes()).await.expect("write response");
        let _ = socket.shutdown().await;
        request
    });
    (format!("http://{}", address), handle)
}

async fn read_request(socket: &mut TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    loop {
        let n = socket.read(&mut chunk).await.expect("read request");
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
        let Some(end) = buf.windows(4).position(|w| w == b"\r\n\r\n") else {
            continue;
        };
        let headers = String::from_utf8_lossy(&buf[..end]).to_lowercase();
        let body_len = headers
            .lines()
            .find_map(|line| line.strip_prefix("content-length:"))
            .and_then(|value| value.trim().parse::<usize>().ok())
            .unwrap_or(0);
        if buf.len() >= end + 4 + body_len {
            break;
        }
    }
    String::from_utf8_lossy(&buf).into_owned()
}

fn request() -> GenerationRequest {
    GenerationRequest {
        model: "gemini-2.5-flash".to_string(),
        system_instruction: "be brief".to_string(),
        contents: "Context: \n\nTask: todo app".to_string(),
    }
}

#[tokio::test]
async fn test_error_status_extracts_api_message() {
    let (base_url, server) = serve_once(
        "400 Bad Request",
        r#"{"error":{"code":400,"message":"bad key","status":"INVALID_ARGUMENT"}}"#,
    )
    .await;
    let backend = GeminiBackend::new("secret-key").with_base_url(base_url);

    let err = backend.generate_content(&request()).await.unwrap_err();
    assert_eq!(
        err,
        GenerationError::RequestFailed {
            status: 400,
            message: "bad key".to_string(),
        }
    );

    let seen = server.await.unwrap();
    assert!(seen.starts_with("POST /models/gemini-2.5-flash:generateContent "));
    assert!(seen.to_lowercase().contains("x-goog-api-key: secret-key"));
    assert!(seen.contains(r#""systemInstruction""#));
}

#[tokio::test]
async fn test_error_status_without_json_keeps_raw_body() {
    let (base_url, _server) = serve_once("503 Service Unavailable", "upstream overloaded").await;
    let backend = GeminiBackend::new("k").with_base_url(base_url);

    let err = backend.generate_content(&request()).await.unwrap_err();
    assert_eq!(
        err,
        GenerationError::RequestFailed {
            status: 503,
            message: "upstream overloaded".to_string(),
        }
    );
}

#[tokio::test]
async fn test_success_returns_candidate_text() {
    let (base_url, _server) = serve_once(
        "200 OK",
        r#"{"candidates":[{"content":{"role":"model","parts":[{"text":"Plan: "},{"text":"ship it"}]}}]}"#,
    )
    .await;
    let backend = GeminiBackend::new("k").with_base_url(base_url);

    assert_eq!(backend.generate_content(&request()).await.unwrap(), "Plan: ship it");
}

#[tokio::test]
async fn test_malformed_success_body_is_invalid_response() {
    let (base_url, _server) = serve_once("200 OK", "not json").await;
    let backend = GeminiBackend::new("k").with_base_url(base_url);

    let err = backend.generate_content(&request()).await.unwrap_err();
    assert!(matches!(err, GenerationError::InvalidResponse { .. }));
}

#[tokio::test]
async fn test_client_renders_api_failure_as_text() {
    let (base_url, _server) =
        serve_once("400 Bad Request", r#"{"error":{"code":400,"message":"bad key"}}"#).await;
    let backend = GeminiBackend::new("k").with_base_url(base_url);
    let client = GenerationClient::new(Arc::new(backend), ModelSelection::default());

    let text = client.generate("todo app", AgentRole::Coordinator, "").await;
    assert_eq!(
        text,
        "Error generating content: Request failed with status 400: bad key"
    );
}
