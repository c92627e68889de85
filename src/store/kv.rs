//! Key-value collaborator interface.
//!
//! Used for the per-user first-seen flag and the same-day attendance
//! marker. Treated as eventually-consistent and best-effort: callers
//! degrade to defaults on error and never fail the conversational turn.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::LedgerbotError;

/// Narrow key-value interface over whatever the host platform provides.
#[async_trait]
pub trait KvStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, LedgerbotError>;
    async fn set(&self, key: &str, value: &[u8]) -> Result<(), LedgerbotError>;
}

/// In-process implementation backing the CLI modes and tests.
#[derive(Default)]
pub struct MemoryKv {
    inner: RwLock<HashMap<String, Vec<u8>>>,
}

impl MemoryKv {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KvStore for MemoryKv {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, LedgerbotError> {
        Ok(self.inner.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &[u8]) -> Result<(), LedgerbotError> {
        self.inner.write().await.insert(key.to_string(), value.to_vec());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn set_then_get_round_trips() {
        let kv = MemoryKv::new();
        assert_eq!(kv.get("missing").await.unwrap(), None);
        kv.set("first_seen:u1", b"1").await.unwrap();
        assert_eq!(kv.get("first_seen:u1").await.unwrap(), Some(b"1".to_vec()));
    }
}
