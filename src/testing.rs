//! In-memory collaborators for unit tests.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::error::{BotError, Result};
use crate::openai::{CompletionBackend, UsageSummary};
use crate::slack::{Messenger, Snippet};

/// One outbound call observed by [`RecordingMessenger`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sent {
    Message {
        text: String,
        channel: String,
        thread_ts: String,
    },
    Snippet {
        content: String,
        filename: String,
        channel: String,
        thread_ts: String,
    },
}

impl Sent {
    pub fn message(text: &str, channel: &str, thread_ts: &str) -> Self {
        Sent::Message {
            text: text.to_string(),
            channel: channel.to_string(),
            thread_ts: thread_ts.to_string(),
        }
    }

    pub fn snippet(content: &str, filename: &str, channel: &str, thread_ts: &str) -> Self {
        Sent::Snippet {
            content: content.to_string(),
            filename: filename.to_string(),
            channel: channel.to_string(),
            thread_ts: thread_ts.to_string(),
        }
    }
}

#[derive(Debug, Default)]
pub struct RecordingMessenger {
    sent: Mutex<Vec<Sent>>,
    fail: bool,
}

impl RecordingMessenger {
    /// A messenger whose sends are recorded and then reported as failed.
    pub fn failing() -> Self {
        Self {
            sent: Mutex::default(),
            fail: true,
        }
    }

    pub fn sent(&self) -> Vec<Sent> {
        self.sent.lock().unwrap().clone()
    }

    fn record(&self, sent: Sent) -> Result<()> {
        self.sent.lock().unwrap().push(sent);
        if self.fail {
            return Err(BotError::SlackApi {
                method: "test",
                message: "send failed".to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl Messenger for RecordingMessenger {
    async fn send_message(&self, text: &str, channel: &str, thread_ts: &str) -> Result<()> {
        self.record(Sent::message(text, channel, thread_ts))
    }

    async fn send_snippet(
        &self,
        snippet: Snippet<'_>,
        channel: &str,
        thread_ts: &str,
    ) -> Result<()> {
        self.record(Sent::snippet(
            snippet.content,
            snippet.filename,
            channel,
            thread_ts,
        ))
    }
}

/// Completion backend returning a fixed reply, or failing when none is set.
#[derive(Debug, Default)]
pub struct ScriptedBackend {
    reply: Option<String>,
    usage_usd: f64,
    prompts: Mutex<Vec<String>>,
    usage_queries: Mutex<Vec<(NaiveDate, NaiveDate)>>,
}

impl ScriptedBackend {
    pub fn replying(reply: &str) -> Self {
        Self {
            reply: Some(reply.to_string()),
            ..Self::default()
        }
    }

    pub fn failing() -> Self {
        Self::default()
    }

    pub fn with_usage(mut self, usage_usd: f64) -> Self {
        self.usage_usd = usage_usd;
        self
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    pub fn usage_queries(&self) -> Vec<(NaiveDate, NaiveDate)> {
        self.usage_queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl CompletionBackend for ScriptedBackend {
    async fn complete(&self, prompt: &str) -> Result<String> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.reply
            .clone()
            .ok_or_else(|| BotError::OpenAiResponse("scripted failure".to_string()))
    }

    async fn usage(&self, start: NaiveDate, end: NaiveDate) -> Result<UsageSummary> {
        self.usage_queries.lock().unwrap().push((start, end));
        Ok(UsageSummary {
            current_usage_usd: self.usage_usd,
        })
    }
}
