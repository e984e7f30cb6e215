//! Common types used throughout the slackgpt relay.

use serde::Deserialize;
use strum::AsRefStr;

/// Speaker of a conversation turn.
///
/// The string form is the prefix stored in the conversation log and rendered into prompts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr)]
pub enum TurnRole {
    /// Message from the human user
    #[strum(serialize = "Human:")]
    Human,
    /// Raw completion text from the model
    #[strum(serialize = "AI:")]
    Ai,
}

impl TurnRole {
    /// Tags `text` with this role, e.g. `Human:hello`.
    #[must_use]
    pub fn tag(self, text: &str) -> String {
        format!("{}{text}", self.as_ref())
    }
}

/// Outer envelope of a Slack Events API request.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SlackEnvelope {
    /// Handshake sent when the request URL is configured.
    UrlVerification { challenge: String },
    /// Wrapper around an actual workspace event.
    EventCallback { event: SlackEvent },
    /// Any other envelope type (rate-limit notices, app revocation, ...).
    #[serde(other)]
    Other,
}

/// Event payload nested in an `event_callback` envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct SlackEvent {
    #[serde(rename = "type")]
    pub event_type: String,
    #[serde(default)]
    pub text: String,
    pub channel: String,
    pub ts: String,
    #[serde(default)]
    pub thread_ts: Option<String>,
}

/// Event type delivered when the bot user is mentioned.
pub const APP_MENTION: &str = "app_mention";

impl SlackEvent {
    /// Timestamp replies should be threaded under: the thread root if the mention was
    /// already inside a thread, otherwise the mention itself.
    #[must_use]
    pub fn reply_anchor(&self) -> &str {
        self.thread_ts.as_deref().unwrap_or(&self.ts)
    }

    #[must_use]
    pub fn is_mention(&self) -> bool {
        self.event_type == APP_MENTION
    }
}
