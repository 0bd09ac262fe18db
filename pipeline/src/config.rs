//! Configuration for the retrieval pipeline and chat service.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Configuration for the retrieval pipeline and chat service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// How many passages to retrieve per question.
    pub top_k: usize,

    /// Minimum similarity score for a passage to enter the context.
    pub score_threshold: f32,

    /// Lower-cased phrases that mark a request for live or breaking news.
    pub live_news_triggers: Vec<String>,

    /// Canned answer for live-news requests.
    pub short_circuit_answer: String,

    /// Canned answer when no passage clears the relevance gate.
    pub out_of_corpus_answer: String,

    /// Maximum output tokens per generated answer.
    pub max_tokens: u32,

    /// Vector dimension of the backing collection.
    pub embedding_dimension: usize,

    /// Sliding session TTL in seconds.
    pub session_ttl_secs: u64,

    /// Answer cache TTL in seconds.
    pub cache_ttl_secs: u64,
}

impl PipelineConfig {
    /// Set the number of passages to retrieve.
    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    /// Set the relevance threshold.
    pub fn with_score_threshold(mut self, threshold: f32) -> Self {
        self.score_threshold = threshold;
        self
    }

    /// Set the vector dimension of the backing collection.
    pub fn with_embedding_dimension(mut self, dimension: usize) -> Self {
        self.embedding_dimension = dimension;
        self
    }

    /// Set the sliding session TTL.
    pub fn with_session_ttl(mut self, ttl: Duration) -> Self {
        self.session_ttl_secs = ttl.as_secs();
        self
    }

    /// Set the answer cache TTL.
    pub fn with_cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl_secs = ttl.as_secs();
        self
    }

    /// Sliding session TTL.
    pub fn session_ttl(&self) -> Duration {
        Duration::from_secs(self.session_ttl_secs)
    }

    /// Answer cache TTL.
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            top_k: 2,
            score_threshold: 0.75,
            live_news_triggers: vec![
                "breaking".to_string(),
                "latest".to_string(),
                "current news".to_string(),
            ],
            short_circuit_answer: "I don't have access to live or breaking news. I can only \
                answer questions about articles already in my corpus."
                .to_string(),
            out_of_corpus_answer: "I couldn't find anything in the indexed news corpus related \
                to that question."
                .to_string(),
            max_tokens: 512,
            embedding_dimension: 768, // jina-embeddings-v2-base-en
            session_ttl_secs: 3600,
            cache_ttl_secs: 1800,
        }
    }
}
