//! Retrieval orchestrator.
//!
//! Runs one question through the RAG sequence: short-circuit check, embed,
//! search, relevance gate, context construction, generation. The pipeline
//! is stateless per call; history and caching belong to the service layer.

use std::sync::Arc;

use tracing::{debug, warn};

use newsrag_providers::{Embedder, Generator, ScoredPoint, VectorSearch};

use crate::config::PipelineConfig;
use crate::context::{build_context, build_prompt};
use crate::error::{PipelineError, Result};

/// How an answer was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerSource {
    /// Canned response to a live-news request; no provider was called.
    ShortCircuit,

    /// Canned response because no passage cleared the relevance gate.
    OutOfCorpus,

    /// Generated from retrieved passages.
    Generated,
}

/// Outcome of one pipeline run.
#[derive(Debug, Clone)]
pub struct PipelineAnswer {
    /// Answer text returned to the caller.
    pub text: String,

    /// How the answer was produced.
    pub source: AnswerSource,

    /// True when vector search failed and the run fell back to an empty
    /// result set. The user-visible answer is unchanged; this flag exists
    /// so callers and tests can tell an outage apart from a genuinely
    /// empty corpus.
    pub degraded: bool,
}

impl PipelineAnswer {
    fn canned(text: &str, source: AnswerSource, degraded: bool) -> Self {
        Self {
            text: text.to_string(),
            source,
            degraded,
        }
    }
}

/// The retrieval-augmented answer pipeline.
pub struct RagPipeline {
    embedder: Arc<dyn Embedder>,
    search: Arc<dyn VectorSearch>,
    generator: Arc<dyn Generator>,
    config: PipelineConfig,
}

impl RagPipeline {
    /// Create a pipeline over the given providers.
    pub fn new(
        embedder: Arc<dyn Embedder>,
        search: Arc<dyn VectorSearch>,
        generator: Arc<dyn Generator>,
        config: PipelineConfig,
    ) -> Self {
        Self {
            embedder,
            search,
            generator,
            config,
        }
    }

    /// Get the pipeline configuration.
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// True when the query asks for live or breaking news, which the
    /// corpus cannot answer. Checked before any provider call so these
    /// requests consume no quota.
    fn is_live_news_query(&self, query: &str) -> bool {
        let lowered = query.to_lowercase();
        self.config
            .live_news_triggers
            .iter()
            .any(|trigger| lowered.contains(trigger.as_str()))
    }

    /// Answer one question.
    ///
    /// Embedding and generation failures are fatal for the request;
    /// search failures degrade to "no relevant passages found".
    pub async fn answer(&self, query: &str) -> Result<PipelineAnswer> {
        if self.is_live_news_query(query) {
            debug!("Live-news query short-circuited");
            return Ok(PipelineAnswer::canned(
                &self.config.short_circuit_answer,
                AnswerSource::ShortCircuit,
                false,
            ));
        }

        let embedding = self
            .embedder
            .embed(query)
            .await
            .map_err(PipelineError::EmbeddingUnavailable)?;

        let (points, degraded) = match self.search.search(&embedding, self.config.top_k).await {
            Ok(points) => (points, false),
            Err(err) => {
                warn!("Vector search failed, degrading to empty result set: {err}");
                (Vec::new(), true)
            }
        };

        let relevant: Vec<ScoredPoint> = points
            .into_iter()
            .filter(|point| point.score >= self.config.score_threshold)
            .collect();

        if relevant.is_empty() {
            debug!("No passage cleared the relevance gate (degraded: {degraded})");
            return Ok(PipelineAnswer::canned(
                &self.config.out_of_corpus_answer,
                AnswerSource::OutOfCorpus,
                degraded,
            ));
        }

        debug!("{} passages entered the context", relevant.len());
        let context = build_context(&relevant);
        let prompt = build_prompt(query, &context);

        let text = self
            .generator
            .complete(&prompt, self.config.max_tokens)
            .await
            .map_err(PipelineError::GenerationUnavailable)?;

        Ok(PipelineAnswer {
            text,
            source: AnswerSource::Generated,
            degraded,
        })
    }
}
