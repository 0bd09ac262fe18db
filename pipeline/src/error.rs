//! Error types for the pipeline.

use thiserror::Error;

use newsrag_providers::ProviderError;

/// Result type alias for pipeline operations.
pub type Result<T> = std::result::Result<T, PipelineError>;

/// Errors that can occur while answering a question.
///
/// Retrieval failures are deliberately absent: a vector-search outage
/// degrades to an empty result set inside the pipeline and is surfaced via
/// [`crate::PipelineAnswer::degraded`] instead of an error.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// The embedding provider failed or is misconfigured. Fatal for the
    /// request: no retrieval is possible without a vector.
    #[error("embedding provider unavailable: {0}")]
    EmbeddingUnavailable(#[source] ProviderError),

    /// The generation provider failed or is misconfigured.
    #[error("generation provider unavailable: {0}")]
    GenerationUnavailable(#[source] ProviderError),

    /// The request carried no message text. Rejected before any side
    /// effects.
    #[error("message must not be empty")]
    EmptyMessage,
}
