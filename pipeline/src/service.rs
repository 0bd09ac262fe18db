//! Chat service.
//!
//! The boundary a transport layer talks to. Wraps the retrieval pipeline
//! with per-session history and the shared answer cache. The write ordering
//! inside [`ChatService::answer`] is deliberate: the user turn is appended
//! before any provider call, so a failed request still leaves a correct,
//! inspectable history.

use std::sync::Arc;

use tracing::{debug, info, warn};

use newsrag_providers::{Embedder, Generator, VectorSearch};
use newsrag_session::{AnswerCache, Role, SessionStore, SessionSummary, Turn};

use crate::config::PipelineConfig;
use crate::engine::RagPipeline;
use crate::error::{PipelineError, Result};

/// Session-aware conversational RAG service.
pub struct ChatService {
    store: Arc<SessionStore>,
    cache: Arc<AnswerCache>,
    search: Arc<dyn VectorSearch>,
    pipeline: RagPipeline,
    config: PipelineConfig,
}

impl ChatService {
    /// Create a service over the given providers.
    pub fn new(
        embedder: Arc<dyn Embedder>,
        search: Arc<dyn VectorSearch>,
        generator: Arc<dyn Generator>,
        config: PipelineConfig,
    ) -> Self {
        let store = Arc::new(SessionStore::new(config.session_ttl()));
        let cache = Arc::new(AnswerCache::new());
        let pipeline = RagPipeline::new(embedder, search.clone(), generator, config.clone());

        Self {
            store,
            cache,
            search,
            pipeline,
            config,
        }
    }

    /// One-time startup readiness check: make sure the vector collection
    /// exists. Failures are logged and tolerated; search outages degrade
    /// at request time instead.
    pub async fn init(&self) {
        match self
            .search
            .ensure_collection(self.config.embedding_dimension)
            .await
        {
            Ok(()) => info!("Vector collection ready"),
            Err(err) => warn!("Vector collection setup failed: {err}"),
        }
    }

    /// Create a new session and return its id.
    pub async fn create_session(&self) -> String {
        self.store.create().await
    }

    /// Get a session's turns in append order. Expired or unknown sessions
    /// read as empty.
    pub async fn history(&self, session_id: &str) -> Vec<Turn> {
        self.store.history(session_id).await
    }

    /// List sessions that have at least one turn and were not cleared.
    pub async fn list_sessions(&self) -> Vec<SessionSummary> {
        self.store.list().await
    }

    /// Delete a session entirely.
    pub async fn clear_session(&self, session_id: &str) {
        self.store.clear(session_id).await;
    }

    /// Drop a session's conversation but keep it listed.
    pub async fn reset_history(&self, session_id: &str) {
        self.store.reset(session_id).await;
    }

    /// Answer a message in the context of a session.
    ///
    /// Appends the user turn, consults the answer cache, runs the pipeline
    /// on a miss, stores the result, appends the bot turn, and returns the
    /// answer text. Cache hits bypass every provider but still land in the
    /// session's own history.
    pub async fn answer(&self, session_id: &str, message: &str) -> Result<String> {
        if message.trim().is_empty() {
            return Err(PipelineError::EmptyMessage);
        }

        self.store.append(session_id, Role::User, message).await;

        if let Some(answer) = self.cache.lookup(message).await {
            debug!("Cache hit, skipping retrieval pipeline");
            self.store.append(session_id, Role::Bot, answer.clone()).await;
            return Ok(answer);
        }

        debug!("Cache miss, running retrieval pipeline");
        let result = self.pipeline.answer(message).await?;

        self.cache
            .store(message, &result.text, self.config.cache_ttl())
            .await;
        self.store
            .append(session_id, Role::Bot, result.text.clone())
            .await;

        Ok(result.text)
    }
}
