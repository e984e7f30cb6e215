//! Webhook server wiring and startup.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use log::{debug, error, info};
use tokio::net::TcpListener;

use crate::chatbot::Relay;
use crate::config::Config;
use crate::error::Result;
use crate::openai::OpenAiClient;
use crate::slack::SlackClient;
use crate::store::MemoryCache;
use crate::types::SlackEnvelope;

/// Run the webhook server until Ctrl-C.
pub async fn run() -> Result<()> {
    info!("Initializing relay");
    let config = Config::from_env()?;

    debug!("Initializing Slack and OpenAI clients");
    let messenger = Arc::new(SlackClient::new(
        config.slack_api_base.clone(),
        config.slack_bot_token.clone(),
    ));
    let backend = Arc::new(OpenAiClient::new(
        config.openai_api_base.clone(),
        config.openai_api_key.clone(),
        config.openai_model.clone(),
    ));
    let relay = Arc::new(Relay::new(
        messenger,
        backend,
        Arc::new(MemoryCache::new()),
        config.usage_start_date,
    ));

    let listener = TcpListener::bind(&config.bind_addr).await?;
    info!("Listening for Slack events on {}", listener.local_addr()?);

    axum::serve(listener, router(relay))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Routes for the Slack Events API request URL.
pub fn router(relay: Arc<Relay>) -> Router {
    Router::new()
        .route("/", post(slack_events))
        .route("/slack/events", post(slack_events))
        .with_state(relay)
}

/// Bodies that fail to deserialize are rejected by the `Json` extractor before any
/// handling happens.
async fn slack_events(
    State(relay): State<Arc<Relay>>,
    Json(envelope): Json<SlackEnvelope>,
) -> Response {
    match envelope {
        SlackEnvelope::UrlVerification { challenge } => {
            info!("Answering URL verification challenge");
            challenge.into_response()
        }
        SlackEnvelope::EventCallback { event } => {
            relay.handle_event(&event).await;
            StatusCode::OK.into_response()
        }
        SlackEnvelope::Other => {
            debug!("Ignoring unsupported envelope type");
            StatusCode::OK.into_response()
        }
    }
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received, shutting down..."),
        Err(e) => error!("Failed to listen for shutdown signal: {e}"),
    }
}
