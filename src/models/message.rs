// Chat models for the generate endpoint and conversation history

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A completed prompt/response exchange
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatExchange {
    pub id: String,
    pub prompt: String,
    pub response: String,
    /// Model that produced the response
    pub model: String,
    pub created_at: DateTime<Utc>,
    /// Wall-clock time the generation took
    pub duration_ms: u64,
}

impl ChatExchange {
    pub fn new(prompt: String, response: String, model: String, duration_ms: u64) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            prompt,
            response,
            model,
            created_at: Utc::now(),
            duration_ms,
        }
    }
}

/// Request to generate a response
#[derive(Debug, Clone, Deserialize)]
pub struct GenerateRequest {
    pub prompt: String,
    /// Model to use; falls back to the configured default when absent
    #[serde(default)]
    pub model: Option<String>,
}

/// Query parameters for reading history
#[derive(Debug, Clone, Deserialize)]
pub struct GetMessagesQuery {
    #[serde(default = "default_limit")]
    pub limit: usize,
}

fn default_limit() -> usize {
    50
}
