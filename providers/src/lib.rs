//! # Providers
//!
//! Thin clients for the external services the newsrag pipeline depends on:
//!
//! - **Embedder**: text to dense vector (Jina embeddings API)
//! - **VectorSearch**: vector similarity search (Qdrant HTTP API)
//! - **Generator**: prompt to natural-language answer (Gemini API)
//!
//! Each collaborator is a trait so the pipeline can be exercised against
//! fakes; the concrete implementations are plain `reqwest` clients with
//! bounded per-request timeouts. A provider that is missing its credentials
//! reports `NotConfigured` on first use rather than at construction time.

pub mod embedder;
pub mod error;
pub mod generator;
pub mod search;

pub use embedder::{Embedder, JinaEmbedder};
pub use error::{ProviderError, Result};
pub use generator::{GeminiGenerator, Generator};
pub use search::{QdrantSearcher, ScoredPoint, VectorSearch};

/// A dense vector embedding.
pub type Embedding = Vec<f32>;
