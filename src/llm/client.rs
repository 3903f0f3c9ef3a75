// Ollama client - chat generation and model discovery over the local HTTP API
//
// One generation per call, no streaming, no retry. Every failure mode is
// folded into OllamaError so callers never see a raw transport error.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// How long a connectivity probe or model listing may take before the
/// backend counts as down
const PROBE_TIMEOUT: Duration = Duration::from_secs(5);

/// Errors from talking to the Ollama API
#[derive(Debug)]
pub enum OllamaError {
    /// The request never completed (connection refused, DNS failure, timeout)
    Request(reqwest::Error),
    /// The backend answered with a non-success status
    Api { status: u16, message: String },
    /// The backend answered 2xx but the payload was not usable
    MalformedResponse(String),
}

impl std::fmt::Display for OllamaError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OllamaError::Request(e) if e.is_timeout() => {
                write!(f, "timed out waiting for Ollama")
            }
            OllamaError::Request(e) => write!(f, "Ollama is not reachable: {}", e),
            OllamaError::Api { status, message } => {
                write!(f, "Ollama returned HTTP {}: {}", status, message)
            }
            OllamaError::MalformedResponse(message) => {
                write!(f, "unexpected response from Ollama: {}", message)
            }
        }
    }
}

impl std::error::Error for OllamaError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            OllamaError::Request(e) => Some(e),
            _ => None,
        }
    }
}

/// Message in a chat request
#[derive(Debug, Clone, Serialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// Request payload for /api/chat
#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    stream: bool,
}

/// Response payload from /api/chat (non-streaming)
#[derive(Debug, Deserialize)]
struct ChatResponse {
    message: Option<ResponseMessage>,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: String,
}

/// Error payload Ollama returns on failures such as an unknown model name
#[derive(Debug, Deserialize)]
struct ApiErrorResponse {
    error: String,
}

/// Response payload from /api/tags
#[derive(Debug, Deserialize)]
struct TagsResponse {
    #[serde(default)]
    models: Vec<ModelTag>,
}

#[derive(Debug, Deserialize)]
struct ModelTag {
    name: String,
}

/// Client for a local Ollama instance
pub struct OllamaClient {
    client: reqwest::Client,
    base_url: String,
    generation_timeout: Duration,
}

impl OllamaClient {
    pub fn new(base_url: String, generation_timeout: Duration) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            generation_timeout,
        }
    }

    /// Base URL this client talks to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Send a single chat request and return the assistant's reply.
    ///
    /// Waits for the full response; one attempt, fail fast.
    pub async fn chat(&self, model: &str, prompt: &str) -> Result<String, OllamaError> {
        let request = ChatRequest {
            model: model.to_string(),
            messages: vec![ChatMessage::user(prompt)],
            stream: false,
        };

        let response = self
            .client
            .post(format!("{}/api/chat", self.base_url))
            .timeout(self.generation_timeout)
            .json(&request)
            .send()
            .await
            .map_err(OllamaError::Request)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            // Ollama wraps failures in {"error": "..."}; fall back to the raw body
            let message = serde_json::from_str::<ApiErrorResponse>(&body)
                .map(|e| e.error)
                .unwrap_or(body);
            return Err(OllamaError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body: ChatResponse = response
            .json()
            .await
            .map_err(|e| OllamaError::MalformedResponse(e.to_string()))?;

        body.message
            .map(|m| m.content)
            .ok_or_else(|| OllamaError::MalformedResponse("no message in response".to_string()))
    }

    /// List the models installed on the backend
    pub async fn list_models(&self) -> Result<Vec<String>, OllamaError> {
        let response = self
            .client
            .get(format!("{}/api/tags", self.base_url))
            .timeout(PROBE_TIMEOUT)
            .send()
            .await
            .map_err(OllamaError::Request)?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(OllamaError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body: TagsResponse = response
            .json()
            .await
            .map_err(|e| OllamaError::MalformedResponse(e.to_string()))?;

        Ok(body.models.into_iter().map(|m| m.name).collect())
    }

    /// Whether the backend answers at all
    pub async fn check_connection(&self) -> bool {
        match self
            .client
            .get(format!("{}/api/tags", self.base_url))
            .timeout(PROBE_TIMEOUT)
            .send()
            .await
        {
            Ok(response) => response.status().is_success(),
            Err(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use axum::routing::{get, post};
    use axum::{Json, Router};

    async fn spawn_mock(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}", addr)
    }

    /// An address nothing is listening on
    async fn unreachable_url() -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        format!("http://{}", addr)
    }

    fn client_for(base_url: String) -> OllamaClient {
        OllamaClient::new(base_url, Duration::from_secs(5))
    }

    #[tokio::test]
    async fn test_chat_returns_message_content() {
        let router = Router::new().route(
            "/api/chat",
            post(|Json(body): Json<serde_json::Value>| async move {
                assert_eq!(body["model"], "llama3.2");
                assert_eq!(body["stream"], false);
                assert_eq!(body["messages"][0]["role"], "user");
                assert_eq!(body["messages"][0]["content"], "Hello");
                Json(serde_json::json!({
                    "model": "llama3.2",
                    "message": {"role": "assistant", "content": "Hello there"},
                    "done": true
                }))
            }),
        );
        let client = client_for(spawn_mock(router).await);

        let reply = client.chat("llama3.2", "Hello").await.unwrap();
        assert_eq!(reply, "Hello there");
    }

    #[tokio::test]
    async fn test_chat_maps_unknown_model_to_api_error() {
        let router = Router::new().route(
            "/api/chat",
            post(|| async {
                (
                    StatusCode::NOT_FOUND,
                    Json(serde_json::json!({"error": "model \"missing\" not found"})),
                )
            }),
        );
        let client = client_for(spawn_mock(router).await);

        match client.chat("missing", "Hello").await.unwrap_err() {
            OllamaError::Api { status, message } => {
                assert_eq!(status, 404);
                assert!(message.contains("not found"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_chat_unreachable_backend_is_request_error() {
        let client = client_for(unreachable_url().await);

        let err = client.chat("llama3.2", "Hello").await.unwrap_err();
        assert!(matches!(err, OllamaError::Request(_)));
        assert!(!err.to_string().is_empty());
    }

    #[tokio::test]
    async fn test_chat_payload_without_message_is_malformed() {
        let router = Router::new().route(
            "/api/chat",
            post(|| async { Json(serde_json::json!({"done": true})) }),
        );
        let client = client_for(spawn_mock(router).await);

        let err = client.chat("llama3.2", "Hello").await.unwrap_err();
        assert!(matches!(err, OllamaError::MalformedResponse(_)));
    }

    #[tokio::test]
    async fn test_list_models_returns_names() {
        let router = Router::new().route(
            "/api/tags",
            get(|| async {
                Json(serde_json::json!({
                    "models": [
                        {"name": "llama3.2", "size": 2019393189u64},
                        {"name": "mistral", "size": 4113301824u64}
                    ]
                }))
            }),
        );
        let client = client_for(spawn_mock(router).await);

        let models = client.list_models().await.unwrap();
        assert_eq!(models, vec!["llama3.2", "mistral"]);
    }

    #[tokio::test]
    async fn test_check_connection_reports_reachability() {
        let router = Router::new().route(
            "/api/tags",
            get(|| async { Json(serde_json::json!({"models": []})) }),
        );
        let client = client_for(spawn_mock(router).await);
        assert!(client.check_connection().await);

        let client = client_for(unreachable_url().await);
        assert!(!client.check_connection().await);
    }
}
