//! Error types for the provider clients.

use thiserror::Error;

/// Result type alias for provider operations.
pub type Result<T> = std::result::Result<T, ProviderError>;

/// Errors that can occur when calling an external provider.
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Provider credentials or endpoint are missing.
    #[error("{0} provider not configured")]
    NotConfigured(&'static str),

    /// API request failed.
    #[error("API request failed: {0}")]
    ApiRequest(String),

    /// Invalid response from provider.
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// Batch input and output lengths differ.
    #[error("batch size mismatch: sent {sent}, received {received}")]
    BatchMismatch { sent: usize, received: usize },

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// HTTP error (connection failure or timeout included).
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
}
