use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::llm_client::LlmError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Llm(e @ LlmError::Transport { .. }) => {
                tracing::error!("LLM transport error: {e}");
                (
                    StatusCode::BAD_GATEWAY,
                    "UPSTREAM_TRANSPORT_ERROR",
                    "The AI service could not be reached. Please try again.".to_string(),
                )
            }
            AppError::Llm(e @ LlmError::Auth { .. }) => {
                tracing::error!("LLM auth error: {e}");
                (
                    StatusCode::BAD_GATEWAY,
                    "UPSTREAM_AUTH_ERROR",
                    "The AI service rejected this server's credentials.".to_string(),
                )
            }
            AppError::Llm(e) => {
                tracing::error!("LLM reply rejected: {e}");
                (
                    StatusCode::BAD_GATEWAY,
                    "UPSTREAM_PARSE_ERROR",
                    format!("The AI service returned an unusable reply ({})", e.stage()),
                )
            }
        };

        let stage = match &self {
            AppError::Llm(e) => Some(e.stage()),
            AppError::Validation(_) => None,
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message,
                "stage": stage
            }
        }));

        (status, body).into_response()
    }
}
