//! # Pipeline
//!
//! The orchestration core of the newsrag backend. Each question runs
//! through a fixed sequence:
//!
//! ```text
//! question ──► short-circuit check ──► embed ──► search ──► relevance gate
//!                    │                                            │
//!                    ▼                                            ▼
//!              canned live-news             out-of-corpus ◄── no passage
//!                  answer                       answer        survives
//!                                                  │
//!                                     passages ──► prompt ──► generate
//! ```
//!
//! [`RagPipeline`] implements that sequence over the provider traits;
//! [`ChatService`] wraps it with per-session history and the shared answer
//! cache, and is the surface a transport layer talks to.

pub mod config;
mod context;
pub mod engine;
pub mod error;
pub mod service;

#[cfg(test)]
pub(crate) mod testing;

pub use config::PipelineConfig;
pub use engine::{AnswerSource, PipelineAnswer, RagPipeline};
pub use error::{PipelineError, Result};
pub use service::ChatService;
