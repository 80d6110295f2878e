//! Upstream text-generation provider abstraction.
//!
//! The relay handler talks to the upstream API through the `TextProvider`
//! trait, so tests can swap in a scripted mock without any network access.

pub mod gemini;
pub mod mock;

use async_trait::async_trait;
use thiserror::Error;

/// Error type for provider operations.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Provider not configured: {0}")]
    NotConfigured(String),

    #[error("API error {status} {status_text}")]
    Api { status: u16, status_text: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Network error: {0}")]
    Network(String),
}

/// Result of a successful provider call.
#[derive(Debug, Clone)]
pub struct ProviderResponse {
    /// Candidate text returned by the upstream model.
    pub text: String,
}

/// Trait for text generation providers (e.g., Gemini).
#[async_trait]
pub trait TextProvider: Send + Sync {
    /// Generate a text response for a single prompt.
    async fn generate(&self, prompt: &str) -> Result<ProviderResponse, ProviderError>;

    /// Health check.
    async fn health_check(&self) -> Result<(), ProviderError>;
}
