//! Optional ERP backend collaborator.
//!
//! For classified (non-general) intents the engine may ask the backend for
//! live data before falling back to the local templated reply. All
//! failures here are soft: transport errors, bad status, undecodable
//! bodies, and missing fields all surface as `LedgerbotError::Backend`
//! and the caller degrades locally.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::models::Intent;
use crate::LedgerbotError;

/// Fixed request timeout; the backend must never stall a turn for long.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Serialize)]
struct QueryRequest<'a> {
    intent: &'a str,
    user_id: &'a str,
}

#[derive(Debug, Deserialize)]
struct QueryResponse {
    response: Option<String>,
}

/// HTTP client for the assistant query endpoint.
pub struct BackendClient {
    http: reqwest::Client,
    base_url: String,
}

impl BackendClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, LedgerbotError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| LedgerbotError::Config(format!("backend client: {}", e)))?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Ask the backend for a reply to a classified intent.
    pub async fn query(&self, intent: Intent, user_id: &str) -> Result<String, LedgerbotError> {
        let url = format!("{}/api/assistant/query", self.base_url);
        let body = QueryRequest {
            intent: intent.as_str(),
            user_id,
        };

        let response = self
            .http
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| LedgerbotError::Backend(format!("request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(LedgerbotError::Backend(format!(
                "unexpected status {}",
                response.status()
            )));
        }

        let raw = response
            .text()
            .await
            .map_err(|e| LedgerbotError::Backend(format!("bad response body: {}", e)))?;
        let decoded: QueryResponse = serde_json::from_str(&raw)?;

        decoded
            .response
            .ok_or_else(|| LedgerbotError::Backend("missing response field".into()))
    }
}
