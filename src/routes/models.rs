// Model listing routes

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

use crate::AppState;

/// Suggestions offered when the backend has no models pulled yet
const FALLBACK_MODELS: [&str; 5] = ["llama3.2", "llama3.1", "mistral", "codellama", "neural-chat"];

/// Build the models router
pub fn models_routes() -> Router<AppState> {
    Router::new().route("/v1/models", get(list_models))
}

#[derive(Debug, Serialize)]
struct ModelsResponse {
    models: Vec<String>,
    /// False when the list is fallback suggestions rather than installed models
    installed: bool,
}

/// GET /v1/models - Installed models, or fallback suggestions
async fn list_models(State(state): State<AppState>) -> Json<ModelsResponse> {
    match state.ollama.list_models().await {
        Ok(models) if !models.is_empty() => Json(ModelsResponse {
            models,
            installed: true,
        }),
        Ok(_) => {
            tracing::warn!("No models installed on the backend, returning suggestions");
            Json(ModelsResponse {
                models: fallback_models(),
                installed: false,
            })
        }
        Err(e) => {
            tracing::warn!("Failed to list models: {}", e);
            Json(ModelsResponse {
                models: fallback_models(),
                installed: false,
            })
        }
    }
}

fn fallback_models() -> Vec<String> {
    FALLBACK_MODELS.iter().map(|m| m.to_string()).collect()
}
