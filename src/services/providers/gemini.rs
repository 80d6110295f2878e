//! Gemini AI provider implementation.
//!
//! Implements text generation using Google's Gemini API.

use super::{ProviderError, ProviderResponse, TextProvider};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

/// Gemini API base URL.
const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Gemini provider configuration.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: String,
    pub model: String,
}

/// Gemini text provider.
pub struct GeminiTextProvider {
    config: GeminiConfig,
    client: Client,
}

impl GeminiTextProvider {
    pub fn new(config: GeminiConfig) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(120))
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }

    /// Build the API URL for the given method.
    fn api_url(&self, method: &str) -> String {
        format!(
            "{}/models/{}:{}?key={}",
            GEMINI_API_BASE, self.config.model, method, self.config.api_key
        )
    }
}

#[async_trait]
impl TextProvider for GeminiTextProvider {
    async fn generate(&self, prompt: &str) -> Result<ProviderResponse, ProviderError> {
        if self.config.api_key.is_empty() {
            return Err(ProviderError::NotConfigured(
                "Gemini API key not configured".to_string(),
            ));
        }

        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![ContentPart {
                    text: prompt.to_string(),
                }],
            }],
        };

        let url = self.api_url("generateContent");

        tracing::debug!(
            model = %self.config.model,
            prompt_len = prompt.len(),
            "Sending request to Gemini API"
        );

        // reqwest errors are stripped of the URL so the key in the query
        // string never reaches logs or callers.
        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| ProviderError::Network(e.without_url().to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();

            tracing::error!(
                status = %status,
                body = %error_text,
                "Gemini API returned an error"
            );

            return Err(ProviderError::Api {
                status: status.as_u16(),
                status_text: status.canonical_reason().unwrap_or("unknown").to_string(),
            });
        }

        let api_response: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| {
                ProviderError::InvalidResponse(format!(
                    "Failed to parse response: {}",
                    e.without_url()
                ))
            })?;

        tracing::debug!(
            candidates = api_response.candidates.len(),
            "Received Gemini API response"
        );

        let text = extract_text(&api_response).ok_or_else(|| {
            ProviderError::InvalidResponse("response contains no candidate text".to_string())
        })?;

        Ok(ProviderResponse { text })
    }

    async fn health_check(&self) -> Result<(), ProviderError> {
        if self.config.api_key.is_empty() {
            return Err(ProviderError::NotConfigured(
                "Gemini API key not configured".to_string(),
            ));
        }

        // Try to list models to verify the API key works.
        let url = format!("{}/models?key={}", GEMINI_API_BASE, self.config.api_key);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| ProviderError::Network(e.without_url().to_string()))?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(ProviderError::Api {
                status: response.status().as_u16(),
                status_text: response
                    .status()
                    .canonical_reason()
                    .unwrap_or("unknown")
                    .to_string(),
            })
        }
    }
}

/// Extract the first candidate's first text part, if present.
fn extract_text(response: &GenerateContentResponse) -> Option<String> {
    response
        .candidates
        .first()
        .and_then(|c| c.content.parts.first())
        .map(|p| p.text.clone())
}

// ============================================================================
// Gemini API Request/Response Types
// ============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Content {
    parts: Vec<ContentPart>,
}

#[derive(Debug, Serialize, Deserialize)]
struct ContentPart {
    text: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Content,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extract_text_from_full_response() {
        let body = serde_json::json!({
            "candidates": [
                { "content": { "parts": [ { "text": "hello there" } ] } }
            ]
        });
        let response: GenerateContentResponse = serde_json::from_value(body).unwrap();

        assert_eq!(extract_text(&response).as_deref(), Some("hello there"));
    }

    #[test]
    fn empty_body_has_no_candidates() {
        let response: GenerateContentResponse = serde_json::from_str("{}").unwrap();

        assert!(response.candidates.is_empty());
        assert_eq!(extract_text(&response), None);
    }

    #[test]
    fn candidate_without_parts_yields_no_text() {
        let body = serde_json::json!({
            "candidates": [ { "content": { "parts": [] } } ]
        });
        let response: GenerateContentResponse = serde_json::from_value(body).unwrap();

        assert_eq!(extract_text(&response), None);
    }

    #[test]
    fn request_body_matches_wire_shape() {
        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![ContentPart {
                    text: "hi".to_string(),
                }],
            }],
        };

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value,
            serde_json::json!({ "contents": [ { "parts": [ { "text": "hi" } ] } ] })
        );
    }

    #[test]
    fn api_url_targets_generate_content() {
        let provider = GeminiTextProvider::new(GeminiConfig {
            api_key: "test-key".to_string(),
            model: "gemini-pro".to_string(),
        });

        let url = provider.api_url("generateContent");
        assert!(url.starts_with("https://generativelanguage.googleapis.com/v1beta"));
        assert!(url.contains("/models/gemini-pro:generateContent?key=test-key"));
    }
}
