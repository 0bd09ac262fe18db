//! Answer generation provider.
//!
//! Calls the Gemini `generateContent` endpoint with a fully assembled prompt
//! and returns the raw text response.

use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use crate::error::{ProviderError, Result};

/// Per-request timeout for generation calls.
const GENERATE_TIMEOUT: Duration = Duration::from_secs(60);

/// Trait for text generation providers.
#[async_trait]
pub trait Generator: Send + Sync {
    /// Get the name of this provider.
    fn name(&self) -> &str;

    /// Complete the prompt, producing at most `max_tokens` output tokens.
    async fn complete(&self, prompt: &str, max_tokens: u32) -> Result<String>;

    /// Check if the provider is available (URL and key set, etc.).
    fn is_available(&self) -> bool;
}

/// Gemini generation provider.
pub struct GeminiGenerator {
    /// Full endpoint URL for `generateContent`.
    api_url: Option<String>,

    /// API key.
    api_key: Option<String>,

    /// HTTP client.
    client: reqwest::Client,
}

impl GeminiGenerator {
    /// Create a new Gemini provider from `GEMINI_API_URL` and
    /// `GEMINI_API_KEY`.
    pub fn new() -> Self {
        Self {
            api_url: std::env::var("GEMINI_API_URL").ok(),
            api_key: std::env::var("GEMINI_API_KEY").ok(),
            client: reqwest::Client::new(),
        }
    }

    /// Set the endpoint URL.
    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = Some(url.into());
        self
    }

    /// Set the API key.
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }
}

impl Default for GeminiGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Generator for GeminiGenerator {
    fn name(&self) -> &str {
        "gemini"
    }

    async fn complete(&self, prompt: &str, max_tokens: u32) -> Result<String> {
        let (api_url, api_key) = match (&self.api_url, &self.api_key) {
            (Some(url), Some(key)) => (url, key),
            _ => return Err(ProviderError::NotConfigured("generation")),
        };

        debug!("Generating answer ({max_tokens} max tokens)");

        let body = serde_json::json!({
            "contents": [
                { "parts": [{ "text": prompt }] }
            ],
            "generationConfig": {
                "maxOutputTokens": max_tokens,
            },
        });

        let response = self
            .client
            .post(api_url)
            .timeout(GENERATE_TIMEOUT)
            .header("Content-Type", "application/json")
            .header("x-goog-api-key", api_key)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(ProviderError::ApiRequest(format!(
                "generation API error: {error_text}"
            )));
        }

        let result: serde_json::Value = response.json().await?;

        // Fall back to the raw response body when the expected candidate
        // structure is absent.
        let text = result["candidates"][0]["content"]["parts"][0]["text"]
            .as_str()
            .map(ToString::to_string)
            .unwrap_or_else(|| result.to_string());

        Ok(text)
    }

    fn is_available(&self) -> bool {
        self.api_url.is_some() && self.api_key.is_some()
    }
}
