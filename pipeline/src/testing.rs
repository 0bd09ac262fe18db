//! In-process provider fakes for pipeline and service tests.

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use newsrag_providers::{
    Embedder, Embedding, Generator, ProviderError, Result, ScoredPoint, VectorSearch,
};

/// Build a search hit with the given score and passage text.
pub(crate) fn point(score: f32, text: &str) -> ScoredPoint {
    ScoredPoint {
        id: serde_json::json!(1),
        score,
        payload: serde_json::json!({ "text": text }),
    }
}

/// Embedder fake that returns a constant vector and counts calls.
pub(crate) struct FakeEmbedder {
    calls: AtomicUsize,
    fail: bool,
}

impl FakeEmbedder {
    pub(crate) fn new() -> Self {
        Self {
            calls: AtomicUsize::new(0),
            fail: false,
        }
    }

    pub(crate) fn failing() -> Self {
        Self {
            calls: AtomicUsize::new(0),
            fail: true,
        }
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Embedder for FakeEmbedder {
    fn name(&self) -> &str {
        "fake-embedder"
    }

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Embedding>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(ProviderError::ApiRequest("embedder down".to_string()));
        }
        Ok(vec![vec![0.1, 0.2, 0.3]; texts.len()])
    }

    fn is_available(&self) -> bool {
        true
    }
}

/// Search fake that replays fixed hits or fails.
pub(crate) struct FakeSearch {
    hits: Vec<ScoredPoint>,
    fail: bool,
}

impl FakeSearch {
    pub(crate) fn with_hits(hits: Vec<ScoredPoint>) -> Self {
        Self { hits, fail: false }
    }

    pub(crate) fn failing() -> Self {
        Self {
            hits: Vec::new(),
            fail: true,
        }
    }
}

#[async_trait]
impl VectorSearch for FakeSearch {
    fn name(&self) -> &str {
        "fake-search"
    }

    async fn search(&self, _vector: &[f32], k: usize) -> Result<Vec<ScoredPoint>> {
        if self.fail {
            return Err(ProviderError::ApiRequest("search down".to_string()));
        }
        Ok(self.hits.iter().take(k).cloned().collect())
    }

    async fn ensure_collection(&self, _dimension: usize) -> Result<()> {
        if self.fail {
            return Err(ProviderError::ApiRequest("search down".to_string()));
        }
        Ok(())
    }

    fn is_available(&self) -> bool {
        !self.fail
    }
}

/// Generator fake that records the last prompt and counts calls.
pub(crate) struct FakeGenerator {
    reply: String,
    fail: bool,
    calls: AtomicUsize,
    last_prompt: Mutex<Option<String>>,
}

impl FakeGenerator {
    pub(crate) fn new(reply: &str) -> Self {
        Self {
            reply: reply.to_string(),
            fail: false,
            calls: AtomicUsize::new(0),
            last_prompt: Mutex::new(None),
        }
    }

    pub(crate) fn failing() -> Self {
        let mut generator = Self::new("");
        generator.fail = true;
        generator
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub(crate) fn last_prompt(&self) -> Option<String> {
        self.last_prompt.lock().unwrap().clone()
    }
}

#[async_trait]
impl Generator for FakeGenerator {
    fn name(&self) -> &str {
        "fake-generator"
    }

    async fn complete(&self, prompt: &str, _max_tokens: u32) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(ProviderError::ApiRequest("generator down".to_string()));
        }
        *self.last_prompt.lock().unwrap() = Some(prompt.to_string());
        Ok(self.reply.clone())
    }

    fn is_available(&self) -> bool {
        !self.fail
    }
}
