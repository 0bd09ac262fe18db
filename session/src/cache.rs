//! Answer cache.
//!
//! Maps a query fingerprint to a previously computed answer. The fingerprint
//! is a SHA-256 of the exact raw query bytes: no whitespace or case
//! normalization is applied, so textually different phrasings of the same
//! question are distinct entries. Entries are shared across sessions and
//! expire after a fixed TTL, enforced lazily on lookup.

use std::collections::HashMap;
use std::time::Duration;

use chrono::{DateTime, Utc};
use sha2::{Digest, Sha256};
use tokio::sync::RwLock;
use tokio::time::Instant;
use tracing::debug;

/// Compute the cache key for a query: SHA-256 hex of the raw text.
pub fn fingerprint(query: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(query.as_bytes());
    hex::encode(hasher.finalize())
}

#[derive(Debug, Clone)]
struct CachedAnswer {
    answer: String,
    #[allow(dead_code)]
    cached_at: DateTime<Utc>,
    expires_at: Instant,
}

/// Content-addressed cache of generated answers.
#[derive(Default)]
pub struct AnswerCache {
    entries: RwLock<HashMap<String, CachedAnswer>>,
}

impl AnswerCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached answer for a query, if present and unexpired.
    pub async fn lookup(&self, query: &str) -> Option<String> {
        let key = fingerprint(query);

        {
            let entries = self.entries.read().await;
            match entries.get(&key) {
                Some(entry) if entry.expires_at > Instant::now() => {
                    return Some(entry.answer.clone());
                }
                Some(_) => {}
                None => return None,
            }
        }

        // Expired entry: evict it so the map does not accumulate dead keys.
        self.entries.write().await.remove(&key);
        None
    }

    /// Store an answer for a query, overwriting any previous entry and
    /// resetting its expiry to `ttl` from now. Last write wins.
    pub async fn store(&self, query: &str, answer: &str, ttl: Duration) {
        let key = fingerprint(query);
        let entry = CachedAnswer {
            answer: answer.to_string(),
            cached_at: Utc::now(),
            expires_at: Instant::now() + ttl,
        };
        self.entries.write().await.insert(key, entry);
        debug!("Cached answer for query fingerprint");
    }
}
