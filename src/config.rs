use std::env;

use chrono::NaiveDate;
use log::{debug, error, info};
use url::Url;

use crate::error::{BotError, Result};

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
const DEFAULT_OPENAI_MODEL: &str = "gpt-3.5-turbo-instruct";
const DEFAULT_SLACK_API_BASE: &str = "https://slack.com/api/";
const DEFAULT_OPENAI_API_BASE: &str = "https://api.openai.com/v1/";

#[derive(Debug, Clone)]
pub struct Config {
    pub slack_bot_token: String,
    pub openai_api_key: String,
    pub openai_model: String,
    pub bind_addr: String,
    pub slack_api_base: Url,
    pub openai_api_base: Url,
    /// First day counted by `/usage`. `None` means the start of the current month.
    pub usage_start_date: Option<NaiveDate>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        debug!("Loading configuration from environment");
        dotenvy::dotenv().ok();

        let slack_bot_token = env::var("SLACK_BOT_TOKEN").map_err(|e| {
            error!("Failed to load SLACK_BOT_TOKEN from environment: {e}");
            e
        })?;

        let openai_api_key = env::var("OPENAI_API_KEY").map_err(|e| {
            error!("Failed to load OPENAI_API_KEY from environment: {e}");
            e
        })?;

        let openai_model = env_or("OPENAI_MODEL", DEFAULT_OPENAI_MODEL);
        let bind_addr = env_or("BIND_ADDR", DEFAULT_BIND_ADDR);
        let slack_api_base = parse_base_url(&env_or("SLACK_API_BASE", DEFAULT_SLACK_API_BASE))?;
        let openai_api_base =
            parse_base_url(&env_or("OPENAI_API_BASE", DEFAULT_OPENAI_API_BASE))?;

        let usage_start_date = match env::var("USAGE_START_DATE") {
            Ok(raw) => Some(parse_date(&raw)?),
            Err(_) => None,
        };

        info!("Configuration loaded successfully");
        debug!("Slack bot token length: {} characters", slack_bot_token.len());
        debug!("OpenAI API key length: {} characters", openai_api_key.len());
        debug!("OpenAI model: {openai_model}");
        debug!("Bind address: {bind_addr}");

        Ok(Self {
            slack_bot_token,
            openai_api_key,
            openai_model,
            bind_addr,
            slack_api_base,
            openai_api_base,
            usage_start_date,
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Parses an API base URL, forcing a trailing slash so that `Url::join` appends
/// method names instead of replacing the last path segment.
pub fn parse_base_url(raw: &str) -> Result<Url> {
    let trimmed = raw.trim();
    let normalized = if trimmed.ends_with('/') {
        trimmed.to_string()
    } else {
        format!("{trimmed}/")
    };
    Ok(Url::parse(&normalized)?)
}

fn parse_date(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|e| {
        error!("Invalid USAGE_START_DATE '{raw}': {e}");
        BotError::Config(format!("USAGE_START_DATE must be YYYY-MM-DD, got '{raw}'"))
    })
}
