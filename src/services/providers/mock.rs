//! Mock provider implementation for testing.

use super::{ProviderError, ProviderResponse, TextProvider};
use async_trait::async_trait;
use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

/// Scripted outcome for the mock provider.
#[derive(Debug, Clone)]
pub enum MockBehavior {
    /// Succeed with the given candidate text.
    Reply(String),
    /// Fail as if the upstream returned a non-success HTTP status.
    ApiError { status: u16, status_text: String },
    /// Fail as if the upstream body had no candidate text.
    Malformed,
    /// Fail as if the network call never completed.
    NetworkError(String),
}

/// Mock text provider for testing. Counts calls so tests can assert that
/// validation failures never reach the upstream.
pub struct MockTextProvider {
    behavior: MockBehavior,
    calls: Arc<AtomicUsize>,
}

impl MockTextProvider {
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Handle to the call counter, valid after the provider moves into state.
    pub fn call_counter(&self) -> Arc<AtomicUsize> {
        self.calls.clone()
    }
}

#[async_trait]
impl TextProvider for MockTextProvider {
    async fn generate(&self, _prompt: &str) -> Result<ProviderResponse, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        match &self.behavior {
            MockBehavior::Reply(text) => Ok(ProviderResponse { text: text.clone() }),
            MockBehavior::ApiError {
                status,
                status_text,
            } => Err(ProviderError::Api {
                status: *status,
                status_text: status_text.clone(),
            }),
            MockBehavior::Malformed => Err(ProviderError::InvalidResponse(
                "response contains no candidate text".to_string(),
            )),
            MockBehavior::NetworkError(msg) => Err(ProviderError::Network(msg.clone())),
        }
    }

    async fn health_check(&self) -> Result<(), ProviderError> {
        Ok(())
    }
}
