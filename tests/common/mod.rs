//! Shared test fixtures.

use std::sync::Arc;
use std::time::Duration;

use ledgerbot::services::{ChatEngine, Extractor, ReplyGenerator, SpellCorrector};
use ledgerbot::store::{KvStore, MemoryKv, SessionStore};

/// Engine with in-memory collaborators, a seeded reply generator, and no
/// backend. Returns the key-value handle for assertions on persisted flags.
pub fn test_engine() -> (ChatEngine, Arc<MemoryKv>) {
    let kv = Arc::new(MemoryKv::new());
    let engine = ChatEngine::new(
        SpellCorrector::with_defaults(),
        Extractor::new(),
        ReplyGenerator::seeded(42),
        SessionStore::new(64, Duration::from_secs(300), 100),
        kv.clone() as Arc<dyn KvStore>,
        None,
        10,
    );
    (engine, kv)
}
