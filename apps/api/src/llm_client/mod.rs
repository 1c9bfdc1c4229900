//! LLM Client: the single point of entry for all generative-service calls.
//!
//! ARCHITECTURAL RULE: No other module may call the generative endpoint directly.
//! Advisory functions and the chat relay both go through `GenerativeClient`.
//!
//! One call = one outbound request. Retries are the caller's decision, never made here.
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

pub mod prompts;

/// Default `generateContent` endpoint. Overridable via `GEMINI_API_URL`.
pub const DEFAULT_API_URL: &str =
    "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.0-flash:generateContent";
/// The model behind `DEFAULT_API_URL`. Logged at startup only.
pub const MODEL: &str = "gemini-2.0-flash";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
const API_KEY_HEADER: &str = "x-goog-api-key";
/// Upstream error bodies are truncated to this many chars before they reach an error message.
const MAX_ERROR_BODY_CHARS: usize = 300;

/// Classified failure of one advisory or chat round trip.
///
/// `Transport` and `Auth` come from the client; the three parse failures come from
/// `advisory::parser`. Callers see the variant unchanged so they know which stage failed.
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("transport error: {message}")]
    Transport {
        status: Option<u16>,
        message: String,
    },

    #[error("credential rejected by the generative service (status {status})")]
    Auth { status: u16 },

    #[error("malformed envelope: {0}")]
    MalformedEnvelope(String),

    #[error("malformed content: {0}")]
    MalformedContent(String),

    #[error("schema violation at `{field}`: {reason}")]
    SchemaViolation { field: String, reason: String },
}

impl LlmError {
    /// Short stage label used in logs and HTTP error bodies.
    pub fn stage(&self) -> &'static str {
        match self {
            LlmError::Transport { .. } => "transport",
            LlmError::Auth { .. } => "auth",
            LlmError::MalformedEnvelope(_) => "envelope",
            LlmError::MalformedContent(_) => "content",
            LlmError::SchemaViolation { .. } => "schema",
        }
    }

    pub fn is_parse_failure(&self) -> bool {
        matches!(
            self,
            LlmError::MalformedEnvelope(_)
                | LlmError::MalformedContent(_)
                | LlmError::SchemaViolation { .. }
        )
    }
}

/// A fully rendered prompt. The only thing the client ever sends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt(String);

impl Prompt {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Unparsed response body from the generative service. Untrusted until parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawModelResponse {
    body: String,
}

impl RawModelResponse {
    pub fn new(body: impl Into<String>) -> Self {
        Self { body: body.into() }
    }

    pub fn body(&self) -> &str {
        &self.body
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Wire types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct GenerateContentRequest<'a> {
    pub contents: Vec<RequestContent<'a>>,
}

#[derive(Debug, Serialize)]
pub struct RequestContent<'a> {
    pub parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
pub struct RequestPart<'a> {
    pub text: &'a str,
}

impl<'a> GenerateContentRequest<'a> {
    pub fn from_prompt(prompt: &'a Prompt) -> Self {
        Self {
            contents: vec![RequestContent {
                parts: vec![RequestPart {
                    text: prompt.as_str(),
                }],
            }],
        }
    }
}

/// Success envelope: `{ candidates: [ { content: { parts: [ { text } ] } } ] }`.
#[derive(Debug, Serialize, Deserialize)]
pub struct GenerateContentResponse {
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Candidate {
    /// Absent when the candidate was blocked (see `finish_reason`).
    #[serde(default)]
    pub content: Option<CandidateContent>,
    #[serde(rename = "finishReason", default, skip_serializing_if = "Option::is_none")]
    pub finish_reason: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<ContentPart>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ContentPart {
    #[serde(default)]
    pub text: Option<String>,
}

impl GenerateContentResponse {
    /// Wraps `text` the way the service does. Used by stubs and tests.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            candidates: vec![Candidate {
                content: Some(CandidateContent {
                    parts: vec![ContentPart {
                        text: Some(text.into()),
                    }],
                }),
                finish_reason: Some("STOP".to_string()),
            }],
        }
    }
}

#[derive(Debug, Deserialize)]
struct ServiceError {
    error: ServiceErrorBody,
}

#[derive(Debug, Deserialize)]
struct ServiceErrorBody {
    #[serde(default)]
    message: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Client
// ────────────────────────────────────────────────────────────────────────────

/// Sends one prompt, returns the raw response. Carried in `AppState` as `Arc<dyn GenerativeClient>`.
#[async_trait]
pub trait GenerativeClient: Send + Sync {
    async fn invoke(&self, prompt: &Prompt) -> Result<RawModelResponse, LlmError>;
}

/// reqwest-backed client for the `generateContent` API.
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: String,
    endpoint: String,
}

impl GeminiClient {
    /// The key is captured here once and only ever written into the request header.
    pub fn new(api_key: String, endpoint: String, timeout: Duration) -> reqwest::Result<Self> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            api_key,
            endpoint,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl GenerativeClient for GeminiClient {
    async fn invoke(&self, prompt: &Prompt) -> Result<RawModelResponse, LlmError> {
        let request_body = GenerateContentRequest::from_prompt(prompt);

        let response = self
            .client
            .post(&self.endpoint)
            .header(API_KEY_HEADER, &self.api_key)
            .json(&request_body)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        let body = response.text().await.map_err(transport_error)?;

        if !status.is_success() {
            let error = classify_failure(status, &body);
            warn!(status = status.as_u16(), stage = error.stage(), "generative call failed");
            return Err(error);
        }

        debug!(
            status = status.as_u16(),
            prompt_bytes = prompt.len(),
            response_bytes = body.len(),
            "generative call succeeded"
        );

        Ok(RawModelResponse::new(body))
    }
}

/// Maps a reqwest failure (connect, timeout, body read) to `Transport`.
pub(crate) fn transport_error(e: reqwest::Error) -> LlmError {
    let message = if e.is_timeout() {
        "request timed out".to_string()
    } else {
        e.to_string()
    };
    LlmError::Transport {
        status: e.status().map(|s| s.as_u16()),
        message,
    }
}

/// Non-2xx → `Auth` when the credential was rejected, `Transport` otherwise.
fn classify_failure(status: StatusCode, body: &str) -> LlmError {
    let key_rejected = status == StatusCode::UNAUTHORIZED
        || status == StatusCode::FORBIDDEN
        || (status == StatusCode::BAD_REQUEST && body.contains("API_KEY_INVALID"));

    if key_rejected {
        return LlmError::Auth {
            status: status.as_u16(),
        };
    }

    let detail = serde_json::from_str::<ServiceError>(body)
        .map(|e| e.error.message)
        .unwrap_or_else(|_| body.chars().take(MAX_ERROR_BODY_CHARS).collect());

    LlmError::Transport {
        status: Some(status.as_u16()),
        message: format!("service returned {status}: {detail}"),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        http::{HeaderMap, StatusCode},
        routing::post,
        Router,
    };
    use tokio::sync::Mutex;

    use super::*;

    type Seen = Arc<Mutex<Option<(Option<String>, serde_json::Value)>>>;

    /// Serves `reply` on a random local port and records the last request it saw.
    async fn spawn_stub(status: StatusCode, reply: &'static str, delay: Duration) -> (String, Seen) {
        let seen: Seen = Arc::new(Mutex::new(None));
        let recorder = seen.clone();
        let app = Router::new().route(
            "/generate",
            post(move |headers: HeaderMap, body: String| {
                let recorder = recorder.clone();
                async move {
                    let key = headers
                        .get(API_KEY_HEADER)
                        .and_then(|v| v.to_str().ok())
                        .map(String::from);
                    let json = serde_json::from_str(&body).unwrap_or_default();
                    *recorder.lock().await = Some((key, json));
                    tokio::time::sleep(delay).await;
                    (status, reply)
                }
            }),
        );

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        (format!("http://{addr}/generate"), seen)
    }

    fn client(endpoint: String, timeout: Duration) -> GeminiClient {
        GeminiClient::new("test-key".to_string(), endpoint, timeout).unwrap()
    }

    #[tokio::test]
    async fn test_invoke_sends_prompt_in_contents_parts_with_key_header() {
        let (endpoint, seen) = spawn_stub(StatusCode::OK, "{}", Duration::ZERO).await;
        let raw = client(endpoint, Duration::from_secs(5))
            .invoke(&Prompt::new("hello there"))
            .await
            .unwrap();

        assert_eq!(raw.body(), "{}");
        let (key, body) = seen.lock().await.take().unwrap();
        assert_eq!(key.as_deref(), Some("test-key"));
        assert_eq!(body["contents"][0]["parts"][0]["text"], "hello there");
    }

    #[tokio::test]
    async fn test_server_error_is_transport_with_status() {
        let (endpoint, _) = spawn_stub(
            StatusCode::INTERNAL_SERVER_ERROR,
            r#"{"error": {"code": 500, "message": "backend exploded"}}"#,
            Duration::ZERO,
        )
        .await;
        let err = client(endpoint, Duration::from_secs(5))
            .invoke(&Prompt::new("x"))
            .await
            .unwrap_err();

        match err {
            LlmError::Transport { status, message } => {
                assert_eq!(status, Some(500));
                assert!(message.contains("backend exploded"), "message was {message}");
            }
            other => panic!("expected Transport, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_unauthorized_is_auth() {
        let (endpoint, _) = spawn_stub(StatusCode::FORBIDDEN, "denied", Duration::ZERO).await;
        let err = client(endpoint, Duration::from_secs(5))
            .invoke(&Prompt::new("x"))
            .await
            .unwrap_err();
        assert!(matches!(err, LlmError::Auth { status: 403 }));
    }

    #[tokio::test]
    async fn test_bad_request_with_invalid_key_reason_is_auth() {
        let (endpoint, _) = spawn_stub(
            StatusCode::BAD_REQUEST,
            r#"{"error": {"code": 400, "message": "API key not valid.", "details": [{"reason": "API_KEY_INVALID"}]}}"#,
            Duration::ZERO,
        )
        .await;
        let err = client(endpoint, Duration::from_secs(5))
            .invoke(&Prompt::new("x"))
            .await
            .unwrap_err();
        assert!(matches!(err, LlmError::Auth { status: 400 }));
    }

    #[tokio::test]
    async fn test_plain_bad_request_is_transport() {
        let (endpoint, _) =
            spawn_stub(StatusCode::BAD_REQUEST, "bad prompt", Duration::ZERO).await;
        let err = client(endpoint, Duration::from_secs(5))
            .invoke(&Prompt::new("x"))
            .await
            .unwrap_err();
        assert!(matches!(err, LlmError::Transport { status: Some(400), .. }));
    }

    #[tokio::test]
    async fn test_timeout_is_transport_without_status() {
        let (endpoint, _) = spawn_stub(StatusCode::OK, "{}", Duration::from_secs(2)).await;
        let err = client(endpoint, Duration::from_millis(100))
            .invoke(&Prompt::new("x"))
            .await
            .unwrap_err();

        match err {
            LlmError::Transport { status, message } => {
                assert_eq!(status, None);
                assert!(message.contains("timed out"), "message was {message}");
            }
            other => panic!("expected Transport, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_transport() {
        // Bind then drop to get a port nothing listens on.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = client(format!("http://{addr}/generate"), Duration::from_secs(2))
            .invoke(&Prompt::new("x"))
            .await
            .unwrap_err();
        assert_eq!(err.stage(), "transport");
    }

    #[test]
    fn test_error_stages_are_distinct() {
        let errors = [
            LlmError::Transport {
                status: None,
                message: String::new(),
            },
            LlmError::Auth { status: 401 },
            LlmError::MalformedEnvelope(String::new()),
            LlmError::MalformedContent(String::new()),
            LlmError::SchemaViolation {
                field: "x".to_string(),
                reason: String::new(),
            },
        ];
        let stages: std::collections::HashSet<_> = errors.iter().map(|e| e.stage()).collect();
        assert_eq!(stages.len(), errors.len());
        assert_eq!(errors.iter().filter(|e| e.is_parse_failure()).count(), 3);
    }

    #[test]
    fn test_request_body_shape() {
        let prompt = Prompt::new("p");
        let json = serde_json::to_value(GenerateContentRequest::from_prompt(&prompt)).unwrap();
        assert_eq!(json, serde_json::json!({"contents": [{"parts": [{"text": "p"}]}]}));
    }
}
