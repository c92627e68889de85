//! Shared initialization for the CLI modes and the platform connector.

use std::sync::Arc;
use std::time::Duration;

use crate::config::Config;
use crate::connector::{BackendClient, HttpPlatform};
use crate::services::{ChatEngine, Extractor, FuzzyIndex, ReplyGenerator, SpellCorrector};
use crate::services::vocabulary::ERP_VOCABULARY;
use crate::store::{KvStore, MemoryKv, SessionStore};
use crate::LedgerbotError;

/// Application context holding the engine and the optional platform.
///
/// Shared between the chat REPL, one-shot sends, and the connector.
pub struct AppContext {
    pub config: Config,
    pub engine: ChatEngine,
    pub platform: Option<Arc<HttpPlatform>>,
}

impl AppContext {
    /// Build everything from configuration.
    ///
    /// `seed`, when given, makes reply selection deterministic.
    pub fn new(config: Config, seed: Option<u64>) -> Result<Self, LedgerbotError> {
        let index = FuzzyIndex::train(
            ERP_VOCABULARY.iter().copied(),
            config.edit_threshold,
            config.search_depth,
        );
        tracing::info!(terms = index.len(), "vocabulary trained");
        let corrector = SpellCorrector::new(index);

        let replies = match seed {
            Some(s) => ReplyGenerator::seeded(s),
            None => ReplyGenerator::new(),
        };

        let sessions = SessionStore::new(
            config.session_capacity,
            Duration::from_secs(config.session_idle_secs),
            config.history_cap,
        );

        let kv: Arc<dyn KvStore> = Arc::new(MemoryKv::new());

        let backend = match &config.backend_url {
            Some(url) => {
                tracing::info!(%url, "backend configured");
                Some(BackendClient::new(url.clone())?)
            }
            None => None,
        };

        let platform = match (&config.platform_url, &config.platform_token) {
            (Some(url), Some(token)) => {
                tracing::info!(%url, "platform configured");
                Some(Arc::new(HttpPlatform::new(
                    url.clone(),
                    token.clone(),
                    config.bot_username.clone(),
                )?))
            }
            (Some(_), None) => {
                return Err(LedgerbotError::Config(
                    "platform_url set without platform_token".into(),
                ))
            }
            _ => None,
        };

        let engine = ChatEngine::new(
            corrector,
            Extractor::new(),
            replies,
            sessions,
            kv,
            backend,
            config.context_turns,
        );

        Ok(Self {
            config,
            engine,
            platform,
        })
    }
}
