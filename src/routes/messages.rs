// Messages routes for chat functionality
//
// Endpoints:
// - POST /v1/messages - Generate a response for a prompt
// - GET /v1/messages - Conversation history
// - DELETE /v1/messages - Clear conversation history

use std::time::Instant;

use axum::{
    extract::{Query, State},
    routing::{delete, get, post},
    Json, Router,
};
use serde::Serialize;

use crate::error::ApiError;
use crate::models::{ChatExchange, GenerateRequest, GetMessagesQuery};
use crate::AppState;

/// Build the messages router
pub fn messages_routes() -> Router<AppState> {
    Router::new()
        .route("/v1/messages", get(get_messages))
        .route("/v1/messages", post(send_message))
        .route("/v1/messages", delete(clear_messages))
}

/// POST /v1/messages - Run one generation against the backend
///
/// An empty prompt is rejected before any network call. Any backend failure
/// comes back as a readable error; the handler never panics on transport
/// problems and never retries.
async fn send_message(
    State(state): State<AppState>,
    Json(request): Json<GenerateRequest>,
) -> Result<Json<ChatExchange>, ApiError> {
    let prompt = request.prompt.trim();
    if prompt.is_empty() {
        return Err(ApiError::EmptyPrompt);
    }

    let model = request
        .model
        .as_deref()
        .unwrap_or(&state.config.default_model);

    tracing::info!(
        "Generating response with {}: {}",
        model,
        prompt.chars().take(50).collect::<String>()
    );

    let start = Instant::now();
    let raw = state.ollama.chat(model, prompt).await.map_err(|e| {
        tracing::error!("Generation failed: {}", e);
        ApiError::Backend(e.to_string())
    })?;
    let duration_ms = start.elapsed().as_millis() as u64;

    let response = format_response(&raw);
    if response.is_empty() {
        tracing::warn!("Model {} returned an empty response", model);
    }

    let exchange = ChatExchange::new(
        prompt.to_string(),
        response,
        model.to_string(),
        duration_ms,
    );
    state.history.add(exchange.clone()).await;

    tracing::info!("Response generated in {} ms", duration_ms);

    Ok(Json(exchange))
}

/// GET /v1/messages - Conversation history, newest first
async fn get_messages(
    State(state): State<AppState>,
    Query(query): Query<GetMessagesQuery>,
) -> Json<Vec<ChatExchange>> {
    Json(state.history.list(query.limit).await)
}

/// Response for clear messages endpoint
#[derive(Debug, Serialize)]
struct ClearMessagesResponse {
    deleted_count: usize,
}

/// DELETE /v1/messages - Clear conversation history
async fn clear_messages(State(state): State<AppState>) -> Json<ClearMessagesResponse> {
    let deleted_count = state.history.clear().await;
    tracing::info!("Cleared {} exchanges from history", deleted_count);
    Json(ClearMessagesResponse { deleted_count })
}

/// Strip the surrounding whitespace models tend to emit, keeping interior
/// formatting intact
fn format_response(response: &str) -> String {
    response.trim().to_string()
}
