//! The relay handler: forwards a caller's chat message to the upstream
//! provider and translates the result into the external contract.

use crate::error::AppError;
use crate::startup::AppState;
use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    /// Absent `message` deserializes to the empty string and is rejected
    /// together with explicit empty strings.
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub response: String,
}

/// `POST /api/chat`
///
/// One upstream call per request, no retries. Each invocation is fully
/// independent; the only shared data is the read-only state.
pub async fn relay_chat(
    State(state): State<AppState>,
    Json(payload): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, AppError> {
    if state.config.google.api_key.is_empty() {
        tracing::error!("API key is missing");
        return Err(AppError::ConfigError(anyhow::anyhow!(
            "GOOGLE_API_KEY is not configured"
        )));
    }

    if payload.message.is_empty() {
        return Err(AppError::BadRequest("Message is required".to_string()));
    }

    tracing::info!(message = %payload.message, "Relaying chat message upstream");

    let reply = state.text_provider.generate(&payload.message).await?;

    Ok(Json(ChatResponse {
        response: reply.text,
    }))
}
