//! # Session
//!
//! Conversation state for the newsrag backend:
//!
//! - **SessionStore**: per-session ordered turn history with a sliding TTL,
//!   a first-question scalar, and a directory of live session ids
//! - **AnswerCache**: content-addressed answer cache keyed by a SHA-256
//!   fingerprint of the raw query text, with a fixed expiry
//!
//! Both stores are in-process, guarded by `tokio::sync::RwLock`, and enforce
//! TTLs lazily: an expired record reads as absent, never as an error.

pub mod cache;
pub mod store;
pub mod turn;

pub use cache::AnswerCache;
pub use store::{SessionStore, SessionSummary};
pub use turn::{Role, Turn};
