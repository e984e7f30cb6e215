//! Slack Web API client used for outbound replies.

use async_trait::async_trait;
use log::debug;
use serde::Deserialize;
use serde_json::json;
use url::Url;

use crate::error::{BotError, Result};

/// A file to upload into a thread.
#[derive(Debug, Clone, Copy)]
pub struct Snippet<'a> {
    pub content: &'a str,
    pub filename: &'a str,
    pub initial_comment: Option<&'a str>,
}

/// Outbound side of the chat platform.
#[async_trait]
pub trait Messenger: Send + Sync {
    /// Post `text` as a threaded reply under `thread_ts`.
    async fn send_message(&self, text: &str, channel: &str, thread_ts: &str) -> Result<()>;

    /// Upload `snippet` as a named file threaded under `thread_ts`.
    async fn send_snippet(&self, snippet: Snippet<'_>, channel: &str, thread_ts: &str)
    -> Result<()>;
}

#[derive(Debug, Deserialize)]
struct SlackResponse {
    ok: bool,
    error: Option<String>,
}

pub struct SlackClient {
    client: reqwest::Client,
    api_base: Url,
    bot_token: String,
}

impl SlackClient {
    pub fn new(api_base: Url, bot_token: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_base,
            bot_token,
        }
    }

    fn endpoint(&self, method: &str) -> Result<Url> {
        Ok(self.api_base.join(method)?)
    }

    async fn check(method: &'static str, response: reqwest::Response) -> Result<()> {
        if !response.status().is_success() {
            let status = response.status();
            return Err(BotError::SlackApi {
                method,
                message: format!("HTTP {status}"),
            });
        }

        let body: SlackResponse = response.json().await?;
        if !body.ok {
            return Err(BotError::SlackApi {
                method,
                message: body.error.unwrap_or_else(|| "unknown error".to_string()),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl Messenger for SlackClient {
    async fn send_message(&self, text: &str, channel: &str, thread_ts: &str) -> Result<()> {
        debug!("Posting message to {channel} (thread {thread_ts})");

        let response = self
            .client
            .post(self.endpoint("chat.postMessage")?)
            .bearer_auth(&self.bot_token)
            .json(&json!({
                "channel": channel,
                "text": text,
                "thread_ts": thread_ts,
            }))
            .send()
            .await?;

        Self::check("chat.postMessage", response).await
    }

    async fn send_snippet(
        &self,
        snippet: Snippet<'_>,
        channel: &str,
        thread_ts: &str,
    ) -> Result<()> {
        debug!(
            "Uploading snippet '{}' ({} bytes) to {channel} (thread {thread_ts})",
            snippet.filename,
            snippet.content.len()
        );

        let mut form = vec![
            ("channels", channel),
            ("content", snippet.content),
            ("filename", snippet.filename),
            ("title", snippet.filename),
            ("thread_ts", thread_ts),
        ];
        if let Some(comment) = snippet.initial_comment {
            form.push(("initial_comment", comment));
        }

        let response = self
            .client
            .post(self.endpoint("files.upload")?)
            .bearer_auth(&self.bot_token)
            .form(&form)
            .send()
            .await?;

        Self::check("files.upload", response).await
    }
}
