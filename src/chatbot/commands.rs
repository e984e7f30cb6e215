//! Built-in admin commands recognised in a mention before the model is involved.

use chrono::{Datelike, NaiveDate, Utc};
use strum::EnumString;

/// Commands handled locally, written as the first word after the mention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString)]
pub enum AdminCommand {
    /// Report API spend.
    #[strum(serialize = "/usage")]
    Usage,
    /// Forget this channel's conversation.
    #[strum(serialize = "/clear")]
    Clear,
    /// Upload the current prompt as a file.
    #[strum(serialize = "/store")]
    Store,
}

/// What a mention asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MentionRequest {
    Command(AdminCommand),
    /// Free text for the model, without the leading mention.
    Prompt(String),
    /// The mention carried no text.
    Empty,
}

impl MentionRequest {
    /// Parses mention text of the form `<@BOT> word word ...`.
    ///
    /// Token 0 is the mention itself. Tokens are split on single spaces, so the
    /// prompt keeps the user's spacing.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        let tokens: Vec<&str> = text.split(' ').collect();
        let Some(command) = tokens.get(1) else {
            return MentionRequest::Empty;
        };

        if let Ok(command) = command.parse::<AdminCommand>() {
            return MentionRequest::Command(command);
        }

        let prompt = tokens[1..].join(" ");
        if prompt.trim().is_empty() {
            MentionRequest::Empty
        } else {
            MentionRequest::Prompt(prompt)
        }
    }
}

/// Date range reported by `/usage`: from `start` (or the first of the month) to `today`.
#[must_use]
pub fn usage_range(start: Option<NaiveDate>, today: NaiveDate) -> (NaiveDate, NaiveDate) {
    let start = start.or_else(|| today.with_day(1)).unwrap_or(today);
    (start, today)
}

/// Today's date in UTC.
#[must_use]
pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}
