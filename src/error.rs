// API error types surfaced to the chat front-end

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Errors the generate endpoint reports back to the user.
///
/// Neither variant is fatal to the process; the front-end stays usable for
/// the next attempt.
#[derive(Debug)]
pub enum ApiError {
    /// The user submitted an empty prompt. The backend is never called.
    EmptyPrompt,
    /// The generation call failed: unreachable backend, malformed response,
    /// or a backend-reported failure such as an unknown model name.
    Backend(String),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::EmptyPrompt => StatusCode::BAD_REQUEST,
            ApiError::Backend(_) => StatusCode::BAD_GATEWAY,
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            ApiError::EmptyPrompt => "empty_prompt",
            ApiError::Backend(_) => "backend_error",
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::EmptyPrompt => write!(f, "Please enter a prompt to generate a response"),
            ApiError::Backend(message) => write!(f, "Error generating response: {}", message),
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "error": {
                "message": self.to_string(),
                "type": self.kind(),
            }
        }));
        (self.status(), body).into_response()
    }
}
