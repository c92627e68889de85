//! Session store: lazily created per-user sessions behind a moka cache.
//!
//! The cache handles concurrent map access and eviction (capacity plus
//! idle TTL); a per-session `tokio::sync::Mutex` serializes one user's
//! turns while leaving different users fully concurrent. A single user's
//! replies are therefore observably processed in arrival order.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use tokio::sync::Mutex;

use crate::models::UserSession;

/// Handle to one user's locked session.
pub type SessionHandle = Arc<Mutex<UserSession>>;

pub struct SessionStore {
    cache: Cache<String, SessionHandle>,
    history_cap: usize,
}

impl SessionStore {
    /// `capacity` bounds the number of live sessions; `idle` evicts
    /// sessions untouched for that long. `history_cap` bounds each
    /// session's message log.
    pub fn new(capacity: u64, idle: Duration, history_cap: usize) -> Self {
        let cache = Cache::builder()
            .max_capacity(capacity)
            .time_to_idle(idle)
            .build();
        Self { cache, history_cap }
    }

    /// Get the user's session, creating it on first contact.
    pub async fn get_or_create(&self, user_id: &str) -> SessionHandle {
        let history_cap = self.history_cap;
        let owned = user_id.to_string();
        self.cache
            .get_with(owned.clone(), async move {
                Arc::new(Mutex::new(UserSession::new(owned, history_cap)))
            })
            .await
    }

    /// Drop a user's session outright.
    pub async fn evict(&self, user_id: &str) {
        self.cache.invalidate(user_id).await;
    }

    /// Number of live sessions (approximate, per moka semantics).
    pub fn len(&self) -> u64 {
        self.cache.entry_count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
