//! Chat-platform interface: bot identity and posting.
//!
//! The platform is an external collaborator behind a narrow trait so the
//! engine and connector stay testable without a live server.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::LedgerbotError;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// The identity the bot posts as.
#[derive(Debug, Clone)]
pub struct BotIdentity {
    pub user_id: String,
    pub username: String,
}

/// Narrow platform surface used by the connector.
#[async_trait]
pub trait ChatPlatform: Send + Sync {
    /// Create or look up the bot account. Failure here is fatal to
    /// activation; without an identity there is nothing to post as.
    async fn ensure_bot(&self) -> Result<BotIdentity, LedgerbotError>;

    /// Post a reply into a channel, threaded under `root_id` when given.
    async fn create_post(
        &self,
        channel_id: &str,
        root_id: Option<&str>,
        message: &str,
    ) -> Result<(), LedgerbotError>;
}

#[derive(Serialize)]
struct CreateBotRequest<'a> {
    username: &'a str,
    display_name: &'a str,
    description: &'a str,
}

#[derive(Deserialize)]
struct UserResponse {
    id: String,
    username: String,
}

#[derive(Serialize)]
struct CreatePostRequest<'a> {
    channel_id: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    root_id: Option<&'a str>,
    message: &'a str,
}

/// Mattermost-style REST implementation.
pub struct HttpPlatform {
    http: reqwest::Client,
    base_url: String,
    token: String,
    bot_username: String,
}

impl HttpPlatform {
    pub fn new(
        base_url: impl Into<String>,
        token: impl Into<String>,
        bot_username: impl Into<String>,
    ) -> Result<Self, LedgerbotError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| LedgerbotError::Config(format!("platform client: {}", e)))?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: token.into(),
            bot_username: bot_username.into(),
        })
    }

    async fn lookup_bot(&self) -> Result<BotIdentity, LedgerbotError> {
        let url = format!(
            "{}/api/v4/users/username/{}",
            self.base_url, self.bot_username
        );
        let user: UserResponse = self
            .http
            .get(&url)
            .bearer_auth(&self.token)
            .send()
            .await
            .map_err(|e| LedgerbotError::Platform(format!("bot lookup failed: {}", e)))?
            .error_for_status()
            .map_err(|e| LedgerbotError::Platform(format!("bot lookup rejected: {}", e)))?
            .json()
            .await
            .map_err(|e| LedgerbotError::Platform(format!("bot lookup decode: {}", e)))?;

        Ok(BotIdentity {
            user_id: user.id,
            username: user.username,
        })
    }
}

#[async_trait]
impl ChatPlatform for HttpPlatform {
    async fn ensure_bot(&self) -> Result<BotIdentity, LedgerbotError> {
        let url = format!("{}/api/v4/bots", self.base_url);
        let body = CreateBotRequest {
            username: &self.bot_username,
            display_name: "ERP Assistant",
            description: "Your friendly ERP helper — I understand typos and speak human!",
        };

        let created = self
            .http
            .post(&url)
            .bearer_auth(&self.token)
            .json(&body)
            .send()
            .await
            .map_err(|e| LedgerbotError::Platform(format!("bot create failed: {}", e)))?;

        if created.status().is_success() {
            #[derive(Deserialize)]
            struct BotResponse {
                user_id: String,
            }
            let bot: BotResponse = created
                .json()
                .await
                .map_err(|e| LedgerbotError::Platform(format!("bot create decode: {}", e)))?;
            tracing::info!(bot_id = %bot.user_id, "bot account created");
            return Ok(BotIdentity {
                user_id: bot.user_id,
                username: self.bot_username.clone(),
            });
        }

        // The bot probably exists already; fall back to a lookup.
        tracing::debug!(status = %created.status(), "bot create rejected, trying lookup");
        self.lookup_bot().await
    }

    async fn create_post(
        &self,
        channel_id: &str,
        root_id: Option<&str>,
        message: &str,
    ) -> Result<(), LedgerbotError> {
        let url = format!("{}/api/v4/posts", self.base_url);
        let body = CreatePostRequest {
            channel_id,
            root_id,
            message,
        };

        self.http
            .post(&url)
            .bearer_auth(&self.token)
            .json(&body)
            .send()
            .await
            .map_err(|e| LedgerbotError::Platform(format!("post failed: {}", e)))?
            .error_for_status()
            .map_err(|e| LedgerbotError::Platform(format!("post rejected: {}", e)))?;

        Ok(())
    }
}
