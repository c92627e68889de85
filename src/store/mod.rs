//! Shared state: the per-user session store and the external key-value
//! collaborator.

pub mod kv;
pub mod sessions;

pub use kv::{KvStore, MemoryKv};
pub use sessions::{SessionHandle, SessionStore};
