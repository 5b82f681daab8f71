//! Slack Web API transport
//!
//! [`SlackApi`] is the delivery contract the notifier is built against;
//! [`SlackClient`] is the production reqwest implementation. Tests inject a
//! double implementing the same trait.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;

use crate::config::SlackConfig;
use crate::error::{Error, Result};
use crate::models::MessageReceipt;

/// Channel-addressed message delivery contract
#[async_trait]
pub trait SlackApi: Send + Sync {
    /// Post a message to a channel
    async fn post_message(
        &self,
        channel: &str,
        text: &str,
        blocks: Option<&Value>,
    ) -> Result<MessageReceipt>;

    /// Post a message threaded under an existing anchor timestamp
    async fn post_threaded(
        &self,
        channel: &str,
        thread_ts: &str,
        text: &str,
    ) -> Result<MessageReceipt>;
}

/// Slack Web API client (`chat.postMessage`)
pub struct SlackClient {
    client: Client,
    token: String,
    api_base: String,
}

impl SlackClient {
    /// Create a client with a bounded request timeout from configuration
    pub fn new(config: &SlackConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            token: config.token.clone(),
            api_base: "https://slack.com/api".to_string(),
        }
    }

    #[cfg(test)]
    fn with_api_base(config: &SlackConfig, api_base: impl Into<String>) -> Self {
        let mut client = Self::new(config);
        client.api_base = api_base.into();
        client
    }

    async fn call(&self, payload: &ChatPostMessage<'_>) -> Result<MessageReceipt> {
        let response = self
            .client
            .post(format!("{}/chat.postMessage", self.api_base))
            .bearer_auth(&self.token)
            .json(payload)
            .send()
            .await
            .map_err(|e| Error::delivery(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Error::delivery(format!(
                "Slack returned HTTP {}",
                response.status()
            )));
        }

        let body: ChatPostMessageResponse = response
            .json()
            .await
            .map_err(|e| Error::delivery(e.to_string()))?;

        if !body.ok {
            return Err(Error::delivery(
                body.error.unwrap_or_else(|| "unknown_error".to_string()),
            ));
        }

        match (body.channel, body.ts) {
            (Some(channel), Some(ts)) => Ok(MessageReceipt { channel, ts }),
            _ => Err(Error::delivery("response missing channel or ts")),
        }
    }
}

#[async_trait]
impl SlackApi for SlackClient {
    async fn post_message(
        &self,
        channel: &str,
        text: &str,
        blocks: Option<&Value>,
    ) -> Result<MessageReceipt> {
        self.call(&ChatPostMessage {
            channel,
            text,
            blocks,
            thread_ts: None,
        })
        .await
    }

    async fn post_threaded(
        &self,
        channel: &str,
        thread_ts: &str,
        text: &str,
    ) -> Result<MessageReceipt> {
        self.call(&ChatPostMessage {
            channel,
            text,
            blocks: None,
            thread_ts: Some(thread_ts),
        })
        .await
    }
}

#[derive(Debug, Serialize)]
struct ChatPostMessage<'a> {
    channel: &'a str,
    text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    blocks: Option<&'a Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    thread_ts: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
struct ChatPostMessageResponse {
    ok: bool,
    #[serde(default)]
    channel: Option<String>,
    #[serde(default)]
    ts: Option<String>,
    #[serde(default)]
    error: Option<String>,
}
