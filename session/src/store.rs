//! Session store.
//!
//! Holds per-session conversation history with a sliding TTL, the first user
//! question of each session, and a directory of live session ids used for
//! listing. Mirrors the key layout of the original Redis-backed store
//! (history list, first-question scalar, directory set) behind one API.
//!
//! TTLs use `tokio::time::Instant` and are enforced lazily: readers treat an
//! expired record as absent. Directory membership is added exactly when a
//! session's first turn is appended and removed only by `clear`, so a
//! TTL-expired session can linger in the directory with no first question
//! until it is cleared. That staleness window is deliberate.

use std::collections::{HashMap, HashSet};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tokio::time::Instant;
use tracing::debug;
use uuid::Uuid;

use crate::turn::{Role, Turn};

/// Directory listing entry: a live session id and its first user question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSummary {
    /// Session id.
    pub session_id: String,

    /// First user question, or `None` if the session expired or has no
    /// user turn yet.
    pub first_question: Option<String>,
}

struct SessionRecord {
    turns: Vec<Turn>,
    first_question: Option<String>,
    expires_at: Instant,
}

impl SessionRecord {
    fn fresh(ttl: Duration) -> Self {
        Self {
            turns: Vec::new(),
            first_question: None,
            expires_at: Instant::now() + ttl,
        }
    }

    fn is_expired(&self) -> bool {
        self.expires_at <= Instant::now()
    }
}

/// In-process session store with sliding TTL semantics.
pub struct SessionStore {
    sessions: RwLock<HashMap<String, SessionRecord>>,
    directory: RwLock<HashSet<String>>,
    ttl: Duration,
}

impl SessionStore {
    /// Create a store whose sessions expire `ttl` after their last append.
    pub fn new(ttl: Duration) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            directory: RwLock::new(HashSet::new()),
            ttl,
        }
    }

    /// Create a new empty session and return its id.
    ///
    /// The id is not added to the directory until the first turn is
    /// appended.
    pub async fn create(&self) -> String {
        let session_id = Uuid::new_v4().to_string();
        self.sessions
            .write()
            .await
            .insert(session_id.clone(), SessionRecord::fresh(self.ttl));
        debug!("Created session {session_id}");
        session_id
    }

    /// Append a turn to a session's history.
    ///
    /// An unknown or expired session id is auto-created, matching the
    /// behavior of pushing onto an absent list in the original store. The
    /// first user turn is recorded as the session's first question, the
    /// session joins the directory once its history becomes non-empty, and
    /// the sliding TTL is refreshed.
    pub async fn append(&self, session_id: &str, role: Role, text: impl Into<String>) {
        let first_append = {
            let mut sessions = self.sessions.write().await;
            let record = sessions
                .entry(session_id.to_string())
                .or_insert_with(|| SessionRecord::fresh(self.ttl));
            if record.is_expired() {
                *record = SessionRecord::fresh(self.ttl);
            }

            let mut turn = Turn::now(role, text);
            if let Some(last) = record.turns.last() {
                turn.ts = turn.ts.max(last.ts);
            }

            if role == Role::User && record.first_question.is_none() {
                record.first_question = Some(turn.text.clone());
            }

            record.turns.push(turn);
            record.expires_at = Instant::now() + self.ttl;
            record.turns.len() == 1
        };

        if first_append {
            self.directory
                .write()
                .await
                .insert(session_id.to_string());
            debug!("Session {session_id} added to directory");
        }
    }

    /// Return a session's turns in append order.
    ///
    /// An expired or unknown session reads as an empty history, not an
    /// error.
    pub async fn history(&self, session_id: &str) -> Vec<Turn> {
        let sessions = self.sessions.read().await;
        match sessions.get(session_id) {
            Some(record) if !record.is_expired() => record.turns.clone(),
            _ => Vec::new(),
        }
    }

    /// Return a session's first user question, if still live.
    pub async fn first_question(&self, session_id: &str) -> Option<String> {
        let sessions = self.sessions.read().await;
        sessions
            .get(session_id)
            .filter(|record| !record.is_expired())
            .and_then(|record| record.first_question.clone())
    }

    /// Enumerate the session directory.
    ///
    /// Expired sessions that have not been cleared still appear, with
    /// `first_question: None`.
    pub async fn list(&self) -> Vec<SessionSummary> {
        let ids: Vec<String> = self.directory.read().await.iter().cloned().collect();

        let mut summaries = Vec::with_capacity(ids.len());
        for session_id in ids {
            let first_question = self.first_question(&session_id).await;
            summaries.push(SessionSummary {
                session_id,
                first_question,
            });
        }
        summaries
    }

    /// Delete a session entirely: history, first question, and directory
    /// membership. Clearing an unknown session is a no-op.
    pub async fn clear(&self, session_id: &str) {
        self.sessions.write().await.remove(session_id);
        self.directory.write().await.remove(session_id);
        debug!("Cleared session {session_id}");
    }

    /// Reset a session's conversation: history and first question are
    /// dropped and the TTL restarts, but the id stays in the directory so
    /// the session remains listed. Resetting an unknown session is a no-op.
    pub async fn reset(&self, session_id: &str) {
        let mut sessions = self.sessions.write().await;
        if let Some(record) = sessions.get_mut(session_id) {
            *record = SessionRecord::fresh(self.ttl);
            debug!("Reset session {session_id}");
        }
    }
}
