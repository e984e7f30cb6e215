use thiserror::Error;

#[derive(Error, Debug)]
pub enum BotError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),

    #[error("OpenAI API error ({status}): {message}")]
    OpenAiApi {
        status: reqwest::StatusCode,
        message: String,
    },

    #[error("OpenAI response error: {0}")]
    OpenAiResponse(String),

    #[error("Slack API error ({method}): {message}")]
    SlackApi { method: &'static str, message: String },

    #[error("HTTP request error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, BotError>;
