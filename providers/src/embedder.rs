//! Embedding provider.
//!
//! Turns query text into a fixed-length vector via the Jina embeddings API.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use crate::Embedding;
use crate::error::{ProviderError, Result};

/// Per-request timeout for embedding calls.
const EMBED_TIMEOUT: Duration = Duration::from_secs(30);

/// Trait for embedding providers.
#[async_trait]
pub trait Embedder: Send + Sync {
    /// Get the name of this provider.
    fn name(&self) -> &str;

    /// Generate an embedding for a single text.
    async fn embed(&self, text: &str) -> Result<Embedding> {
        let mut embeddings = self.embed_batch(&[text.to_string()]).await?;
        embeddings
            .pop()
            .ok_or_else(|| ProviderError::InvalidResponse("no embedding in response".to_string()))
    }

    /// Generate embeddings for multiple texts in one call.
    ///
    /// The output length must match the input length; a mismatch is an
    /// error, not a partial result.
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Embedding>>;

    /// Check if the provider is available (API key set, etc.).
    fn is_available(&self) -> bool;
}

/// Jina embeddings provider.
pub struct JinaEmbedder {
    /// API key.
    api_key: Option<String>,

    /// API base URL.
    base_url: String,

    /// Embedding model.
    model: String,

    /// HTTP client.
    client: reqwest::Client,
}

impl JinaEmbedder {
    /// Create a new Jina provider, reading the key from `JINA_API_KEY`.
    pub fn new() -> Self {
        Self {
            api_key: std::env::var("JINA_API_KEY").ok(),
            base_url: "https://api.jina.ai/v1".to_string(),
            model: "jina-embeddings-v2-base-en".to_string(),
            client: reqwest::Client::new(),
        }
    }

    /// Set the API key.
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Set the base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the model.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }
}

impl Default for JinaEmbedder {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Embedder for JinaEmbedder {
    fn name(&self) -> &str {
        "jina"
    }

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Embedding>> {
        let api_key = self
            .api_key
            .as_ref()
            .ok_or(ProviderError::NotConfigured("embedding"))?;

        debug!(
            "Generating embeddings for {} texts with model: {}",
            texts.len(),
            self.model
        );

        let body = serde_json::json!({
            "model": self.model,
            "input": texts,
        });

        let response = self
            .client
            .post(format!("{}/embeddings", self.base_url))
            .timeout(EMBED_TIMEOUT)
            .header("Authorization", format!("Bearer {api_key}"))
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(ProviderError::ApiRequest(format!(
                "embedding API error: {error_text}"
            )));
        }

        let result: JinaEmbeddingResponse = response.json().await?;
        let embeddings: Vec<Embedding> = result.data.into_iter().map(|d| d.embedding).collect();

        if embeddings.len() != texts.len() {
            return Err(ProviderError::BatchMismatch {
                sent: texts.len(),
                received: embeddings.len(),
            });
        }

        Ok(embeddings)
    }

    fn is_available(&self) -> bool {
        self.api_key.is_some()
    }
}

/// Jina API response format (OpenAI-compatible shape).
#[derive(Debug, Deserialize)]
struct JinaEmbeddingResponse {
    data: Vec<JinaEmbeddingData>,
}

#[derive(Debug, Deserialize)]
struct JinaEmbeddingData {
    embedding: Embedding,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn embedding_body(embeddings: &[Vec<f32>]) -> serde_json::Value {
        let data: Vec<_> = embeddings
            .iter()
            .map(|e| serde_json::json!({ "embedding": e }))
            .collect();
        serde_json::json!({ "data": data })
    }

    #[tokio::test]
    async fn test_embed_single_text() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/embeddings"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(embedding_body(&[vec![0.1, 0.2, 0.3]])),
            )
            .mount(&server)
            .await;

        let embedder = JinaEmbedder::new()
            .with_api_key("test-key")
            .with_base_url(server.uri());

        let embedding = embedder.embed("hello").await.unwrap();
        assert_eq!(embedding, vec![0.1, 0.2, 0.3]);
    }

    #[tokio::test]
    async fn test_embed_batch_preserves_order() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/embeddings"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(embedding_body(&[vec![1.0], vec![2.0], vec![3.0]])),
            )
            .mount(&server)
            .await;

        let embedder = JinaEmbedder::new()
            .with_api_key("test-key")
            .with_base_url(server.uri());

        let texts = vec!["a".to_string(), "b".to_string(), "c".to_string()];
        let embeddings = embedder.embed_batch(&texts).await.unwrap();
        assert_eq!(embeddings, vec![vec![1.0], vec![2.0], vec![3.0]]);
    }

    #[tokio::test]
    async fn test_batch_mismatch_is_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/embeddings"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(embedding_body(&[vec![1.0]])),
            )
            .mount(&server)
            .await;

        let embedder = JinaEmbedder::new()
            .with_api_key("test-key")
            .with_base_url(server.uri());

        let texts = vec!["a".to_string(), "b".to_string()];
        let err = embedder.embed_batch(&texts).await.unwrap_err();
        assert!(matches!(
            err,
            ProviderError::BatchMismatch {
                sent: 2,
                received: 1
            }
        ));
    }

    #[tokio::test]
    async fn test_missing_api_key_is_not_configured() {
        let embedder = JinaEmbedder {
            api_key: None,
            base_url: "http://localhost:1".to_string(),
            model: "jina-embeddings-v2-base-en".to_string(),
            client: reqwest::Client::new(),
        };

        assert!(!embedder.is_available());
        let err = embedder.embed("hello").await.unwrap_err();
        assert!(matches!(err, ProviderError::NotConfigured(_)));
    }

    #[tokio::test]
    async fn test_api_error_surfaces() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/embeddings"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let embedder = JinaEmbedder::new()
            .with_api_key("test-key")
            .with_base_url(server.uri());

        let err = embedder.embed("hello").await.unwrap_err();
        assert!(matches!(err, ProviderError::ApiRequest(_)));
    }
}
