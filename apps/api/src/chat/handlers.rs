//! Axum route handler for the chat relay.

use axum::{extract::State, Json};
use tracing::debug;

use crate::advisory::parser::extract_text;
use crate::chat::prompts::chat_prompt;
use crate::chat::RelayMessage;
use crate::errors::AppError;
use crate::state::AppState;

/// POST /api/chat
///
/// `{ message }` in, `{ message }` out. Upstream failures surface as HTTP errors;
/// the session manager on the other end turns them into its fallback reply.
pub async fn handle_chat(
    State(state): State<AppState>,
    Json(request): Json<RelayMessage>,
) -> Result<Json<RelayMessage>, AppError> {
    if request.message.trim().is_empty() {
        return Err(AppError::Validation("message cannot be empty".to_string()));
    }

    let prompt = chat_prompt(&request.message);
    let raw = state.llm.invoke(&prompt).await?;
    let reply = extract_text(&raw)?;

    debug!(reply_chars = reply.len(), "chat reply generated");

    Ok(Json(RelayMessage {
        message: reply.trim().to_string(),
    }))
}
