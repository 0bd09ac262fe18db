//! Vector search provider.
//!
//! Similarity search against a Qdrant collection over its HTTP API. The
//! searcher also exposes a one-shot `ensure_collection` readiness call used
//! at process start (create-if-absent with cosine distance).

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ProviderError, Result};

/// Per-request timeout for search calls.
const SEARCH_TIMEOUT: Duration = Duration::from_secs(20);

/// Per-request timeout for collection setup.
const ENSURE_TIMEOUT: Duration = Duration::from_secs(10);

/// A single search hit: similarity score plus the stored payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredPoint {
    /// Point id (Qdrant allows integer or string ids).
    pub id: serde_json::Value,

    /// Cosine similarity score in `[0, 1]`.
    pub score: f32,

    /// Opaque payload stored alongside the vector.
    pub payload: serde_json::Value,
}

/// Trait for vector search providers.
#[async_trait]
pub trait VectorSearch: Send + Sync {
    /// Get the name of this provider.
    fn name(&self) -> &str;

    /// Search for the `k` nearest points, highest similarity first.
    async fn search(&self, vector: &[f32], k: usize) -> Result<Vec<ScoredPoint>>;

    /// Create the backing collection if it does not exist yet.
    async fn ensure_collection(&self, dimension: usize) -> Result<()>;

    /// Check if the provider is available (URL set, etc.).
    fn is_available(&self) -> bool;
}

/// Qdrant vector search provider.
pub struct QdrantSearcher {
    /// Qdrant base URL.
    base_url: Option<String>,

    /// Optional API key.
    api_key: Option<String>,

    /// Collection to search.
    collection: String,

    /// HTTP client.
    client: reqwest::Client,
}

impl QdrantSearcher {
    /// Create a new searcher from `QDRANT_URL`, `QDRANT_API_KEY` and
    /// `QDRANT_COLLECTION`.
    pub fn new() -> Self {
        Self {
            base_url: std::env::var("QDRANT_URL").ok(),
            api_key: std::env::var("QDRANT_API_KEY").ok(),
            collection: std::env::var("QDRANT_COLLECTION")
                .unwrap_or_else(|_| "news_articles".to_string()),
            client: reqwest::Client::new(),
        }
    }

    /// Set the base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the API key.
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Set the collection name.
    pub fn with_collection(mut self, collection: impl Into<String>) -> Self {
        self.collection = collection.into();
        self
    }

    fn base_url(&self) -> Result<&str> {
        self.base_url
            .as_deref()
            .ok_or(ProviderError::NotConfigured("vector search"))
    }

    fn request(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.api_key {
            Some(key) => builder.header("api-key", key),
            None => builder,
        }
    }
}

impl Default for QdrantSearcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl VectorSearch for QdrantSearcher {
    fn name(&self) -> &str {
        "qdrant"
    }

    async fn search(&self, vector: &[f32], k: usize) -> Result<Vec<ScoredPoint>> {
        let base_url = self.base_url()?;
        let url = format!(
            "{base_url}/collections/{collection}/points/search",
            collection = self.collection
        );

        debug!("Searching {k} nearest points in collection: {}", self.collection);

        let body = serde_json::json!({
            "vector": vector,
            "limit": k,
            "with_payload": true,
        });

        let response = self
            .request(self.client.post(url))
            .timeout(SEARCH_TIMEOUT)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(ProviderError::ApiRequest(format!(
                "search API error: {error_text}"
            )));
        }

        let result: QdrantSearchResponse = response.json().await?;
        Ok(result.result)
    }

    async fn ensure_collection(&self, dimension: usize) -> Result<()> {
        let base_url = self.base_url()?;
        let url = format!(
            "{base_url}/collections/{collection}",
            collection = self.collection
        );

        let body = serde_json::json!({
            "vectors": {
                "size": dimension,
                "distance": "Cosine",
            },
        });

        let response = self
            .request(self.client.put(url))
            .timeout(ENSURE_TIMEOUT)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(ProviderError::ApiRequest(format!(
                "collection setup error: {error_text}"
            )));
        }

        debug!("Collection ready: {}", self.collection);
        Ok(())
    }

    fn is_available(&self) -> bool {
        self.base_url.is_some()
    }
}

/// Qdrant search response envelope.
#[derive(Debug, Deserialize)]
struct QdrantSearchResponse {
    #[serde(default)]
    result: Vec<ScoredPoint>,
}
