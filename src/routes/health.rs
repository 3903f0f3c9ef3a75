// Health and backend status routes

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

use crate::AppState;

/// Build the health router
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/v1/status", get(status))
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
}

/// GET /health - Process liveness
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

/// Backend connectivity as seen from this process
#[derive(Debug, Serialize)]
struct StatusResponse {
    connected: bool,
    base_url: String,
}

/// GET /v1/status - Check whether Ollama is reachable
async fn status(State(state): State<AppState>) -> Json<StatusResponse> {
    let connected = state.ollama.check_connection().await;
    if !connected {
        tracing::warn!("Ollama is not reachable at {}", state.ollama.base_url());
    }
    Json(StatusResponse {
        connected,
        base_url: state.ollama.base_url().to_string(),
    })
}
