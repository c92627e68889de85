//! Bridges chat-platform post events to the engine.
//!
//! The connector decides whether the bot was addressed, strips the
//! mention, runs the engine, and posts the reply threaded under the
//! triggering post. Posting failures are logged, not retried; the turn's
//! history has already been recorded by then.

use std::sync::Arc;

use tracing::{debug, error, info, warn};

use crate::connector::platform::{BotIdentity, ChatPlatform};
use crate::services::ChatEngine;
use crate::LedgerbotError;

/// Where a post happened, as far as addressing is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelKind {
    /// One-on-one with the bot; every post is addressed to it.
    Direct,
    /// Shared channel; the bot only reacts when mentioned.
    Group,
}

/// One post event as delivered by the platform.
#[derive(Debug, Clone)]
pub struct InboundMessage {
    pub author_id: String,
    pub channel_id: String,
    pub post_id: String,
    /// Thread root, if the post is already inside a thread.
    pub root_id: Option<String>,
    pub text: String,
    pub channel_kind: ChannelKind,
}

pub struct Connector {
    engine: ChatEngine,
    platform: Arc<dyn ChatPlatform>,
    bot: BotIdentity,
}

impl Connector {
    /// Ensure the bot identity exists on the platform and build the
    /// connector around it. Identity failure is fatal.
    pub async fn activate(
        engine: ChatEngine,
        platform: Arc<dyn ChatPlatform>,
    ) -> Result<Self, LedgerbotError> {
        let bot = platform.ensure_bot().await?;
        info!(bot_id = %bot.user_id, username = %bot.username, "connector active");
        Ok(Self {
            engine,
            platform,
            bot,
        })
    }

    pub fn bot(&self) -> &BotIdentity {
        &self.bot
    }

    pub fn engine(&self) -> &ChatEngine {
        &self.engine
    }

    /// Handle one post event end to end.
    pub async fn on_message_posted(&self, msg: &InboundMessage) {
        if msg.author_id == self.bot.user_id {
            return;
        }
        if !self.is_addressed(msg) {
            debug!(channel = %msg.channel_id, "post not addressed to bot, ignoring");
            return;
        }

        let text = self.strip_mention(&msg.text);
        let reply = match self.engine.handle_message(&msg.author_id, &text).await {
            Ok(Some(reply)) => reply,
            Ok(None) => return,
            Err(e) => {
                error!(error = %e, user = %msg.author_id, "turn failed");
                return;
            }
        };

        // Thread the reply under the triggering post (or its thread root).
        let root = msg.root_id.as_deref().unwrap_or(&msg.post_id);
        if let Err(e) = self
            .platform
            .create_post(&msg.channel_id, Some(root), &reply)
            .await
        {
            warn!(error = %e, channel = %msg.channel_id, "reply not delivered");
        }
    }

    /// Direct channels are always addressed; group channels need a mention
    /// of the bot's username.
    fn is_addressed(&self, msg: &InboundMessage) -> bool {
        match msg.channel_kind {
            ChannelKind::Direct => true,
            ChannelKind::Group => {
                let lower = msg.text.to_lowercase();
                let name = self.bot.username.to_lowercase();
                lower.contains(&format!("@{}", name)) || lower.contains(&name)
            }
        }
    }

    /// Remove `@username` / `username` tokens so the engine never sees the
    /// mention itself.
    fn strip_mention(&self, text: &str) -> String {
        let name = self.bot.username.to_lowercase();
        let cleaned: Vec<&str> = text
            .split_whitespace()
            .filter(|token| {
                let t = token
                    .trim_matches(|c: char| !c.is_alphanumeric())
                    .to_lowercase();
                t != name
            })
            .collect();
        cleaned.join(" ")
    }
}
