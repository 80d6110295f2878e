use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::services::providers::ProviderError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Configuration error: {0}")]
    ConfigError(anyhow::Error),

    #[error("Upstream error: {0}")]
    Upstream(String),

    #[error("Upstream format error: {0}")]
    UpstreamFormat(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Internal server error: {0}")]
    InternalError(#[from] anyhow::Error),
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::ConfigError(anyhow::Error::new(err))
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::InternalError(anyhow::Error::new(err))
    }
}

impl From<ProviderError> for AppError {
    fn from(err: ProviderError) -> Self {
        match err {
            ProviderError::NotConfigured(msg) => {
                AppError::ConfigError(anyhow::anyhow!("{}", msg))
            }
            ProviderError::Api {
                status,
                status_text,
            } => AppError::Upstream(format!("Gemini API error: {} {}", status, status_text)),
            ProviderError::InvalidResponse(msg) => AppError::UpstreamFormat(msg),
            ProviderError::Network(msg) => AppError::Transport(msg),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        #[derive(Serialize)]
        struct ErrorResponse {
            error: String,
            #[serde(skip_serializing_if = "Option::is_none")]
            message: Option<String>,
            #[serde(skip_serializing_if = "Option::is_none")]
            timestamp: Option<String>,
        }

        let (status, error_message, details) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg, None),
            AppError::ConfigError(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "API key configuration error".to_string(),
                None,
            ),
            AppError::Upstream(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Upstream API error".to_string(),
                Some(msg),
            ),
            AppError::UpstreamFormat(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Invalid API response format".to_string(),
                Some(msg),
            ),
            AppError::Transport(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Server Error".to_string(),
                Some(msg),
            ),
            AppError::InternalError(err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
                Some(err.to_string()),
            ),
        };

        // Server errors carry a timestamp for correlation with server-side logs;
        // caller errors stay minimal.
        let timestamp = status
            .is_server_error()
            .then(|| chrono::Utc::now().to_rfc3339());

        (
            status,
            Json(ErrorResponse {
                error: error_message,
                message: details,
                timestamp,
            }),
        )
            .into_response()
    }
}
