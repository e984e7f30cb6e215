use async_trait::async_trait;
use chrono::NaiveDate;
use log::debug;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{BotError, Result};

// 1000 tokens cost about $0.02 on the completion models, keep replies short
const MAX_TOKENS: u32 = 500;

const TEMPERATURE: f64 = 0.1;

/// Stop sequences that keep the model from writing the next turn itself.
pub const STOP_SEQUENCES: [&str; 3] = ["\nAI:", "\nHuman:", "\nTool:"];

/// Usage summary returned by the billing endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct UsageSummary {
    /// Spend in the queried range, in US dollars.
    pub current_usage_usd: f64,
}

/// Text-completion provider.
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    /// Complete `prompt` and return the raw generated text.
    async fn complete(&self, prompt: &str) -> Result<String>;

    /// Report API usage between `start` and `end` (inclusive).
    async fn usage(&self, start: NaiveDate, end: NaiveDate) -> Result<UsageSummary>;
}

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    max_tokens: u32,
    temperature: f64,
    stop: [&'static str; 3],
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    text: String,
}

pub struct OpenAiClient {
    api_key: String,
    client: reqwest::Client,
    api_base: Url,
    model: String,
}

impl OpenAiClient {
    pub fn new(api_base: Url, api_key: String, model: String) -> Self {
        Self {
            api_key,
            client: reqwest::Client::new(),
            api_base,
            model,
        }
    }

    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response> {
        if response.status().is_success() {
            return Ok(response);
        }
        let status = response.status();
        let message = response
            .text()
            .await
            .unwrap_or_else(|e| format!("Failed to read error response: {e}"));
        Err(BotError::OpenAiApi { status, message })
    }
}

#[async_trait]
impl CompletionBackend for OpenAiClient {
    async fn complete(&self, prompt: &str) -> Result<String> {
        debug!(
            "Sending completion request ({} prompt characters)",
            prompt.len()
        );

        let request = CompletionRequest {
            model: &self.model,
            prompt,
            max_tokens: MAX_TOKENS,
            temperature: TEMPERATURE,
            stop: STOP_SEQUENCES,
        };

        let response = self
            .client
            .post(self.api_base.join("completions")?)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;
        let response = Self::ensure_success(response).await?;

        let body: CompletionResponse = response.json().await?;
        let text = body
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| BotError::OpenAiResponse("No choices in response".to_string()))?
            .text;

        debug!("Received completion ({} characters)", text.len());
        Ok(text)
    }

    async fn usage(&self, start: NaiveDate, end: NaiveDate) -> Result<UsageSummary> {
        debug!("Querying usage from {start} to {end}");

        let response = self
            .client
            .get(self.api_base.join("usage")?)
            .bearer_auth(&self.api_key)
            .query(&[
                ("start_date", start.format("%Y-%m-%d").to_string()),
                ("end_date", end.format("%Y-%m-%d").to_string()),
            ])
            .send()
            .await?;
        let response = Self::ensure_success(response).await?;

        Ok(response.json().await?)
    }
}
