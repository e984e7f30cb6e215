//! Main handler for inbound Slack events.

use std::sync::Arc;

use chrono::NaiveDate;
use log::{debug, error, info};

use crate::error::Result;
use crate::openai::CompletionBackend;
use crate::slack::{Messenger, Snippet};
use crate::store::{ConversationStore, Deduplicator, TtlCache};
use crate::tools::{ToolContext, ToolRegistry};
use crate::types::{SlackEvent, TurnRole};

use super::commands::{AdminCommand, MentionRequest, today, usage_range};
use super::dispatch::{Dispatch, dispatch};
use super::prompt::build_prompt;

const NOT_UNDERSTOOD: &str = "Sorry, I didn't quite get that.";
const HISTORY_CLEARED: &str = "My memory of this conversation has been wiped.";
const PROMPT_FILENAME: &str = "prompt.txt";

/// Everything a handling pass needs, shared across requests.
pub struct Relay {
    messenger: Arc<dyn Messenger>,
    backend: Arc<dyn CompletionBackend>,
    dedupe: Deduplicator,
    conversations: ConversationStore,
    tools: ToolRegistry,
    usage_start_date: Option<NaiveDate>,
}

impl Relay {
    /// Deduplication markers and conversation logs share `cache`; their keys never collide
    /// because marker keys always contain a `:`.
    pub fn new(
        messenger: Arc<dyn Messenger>,
        backend: Arc<dyn CompletionBackend>,
        cache: Arc<dyn TtlCache>,
        usage_start_date: Option<NaiveDate>,
    ) -> Self {
        Self {
            messenger,
            backend,
            dedupe: Deduplicator::new(cache.clone()),
            conversations: ConversationStore::new(cache),
            tools: ToolRegistry::default(),
            usage_start_date,
        }
    }

    /// Handle one event. Failures are logged and never reported back to the channel.
    pub async fn handle_event(&self, event: &SlackEvent) {
        if self.dedupe.is_duplicate(&event.channel, &event.ts).await {
            return;
        }

        if !event.is_mention() {
            debug!("Ignoring '{}' event in {}", event.event_type, event.channel);
            return;
        }

        info!("Received mention in {}: {}", event.channel, event.text);

        let ctx = ToolContext {
            messenger: self.messenger.as_ref(),
            channel: &event.channel,
            thread_ts: event.reply_anchor(),
        };

        let result = match MentionRequest::parse(&event.text) {
            MentionRequest::Command(command) => self.run_command(command, &ctx).await,
            MentionRequest::Prompt(text) => self.converse(&text, &ctx).await,
            MentionRequest::Empty => {
                self.messenger
                    .send_message(NOT_UNDERSTOOD, ctx.channel, ctx.thread_ts)
                    .await
            }
        };

        if let Err(e) = result {
            error!("Error handling mention in {}: {e}", event.channel);
        }
    }

    async fn run_command(&self, command: AdminCommand, ctx: &ToolContext<'_>) -> Result<()> {
        info!("Running {command:?} command in {}", ctx.channel);

        match command {
            AdminCommand::Usage => {
                let (start, end) = usage_range(self.usage_start_date, today());
                let usage = self.backend.usage(start, end).await?;
                let text = format!(
                    "Usage since {start}: ${:.2}.",
                    usage.current_usage_usd
                );
                self.messenger
                    .send_message(&text, ctx.channel, ctx.thread_ts)
                    .await
            }
            AdminCommand::Clear => {
                self.conversations.clear(ctx.channel).await;
                self.messenger
                    .send_message(HISTORY_CLEARED, ctx.channel, ctx.thread_ts)
                    .await
            }
            AdminCommand::Store => {
                let turns = self.conversations.read(ctx.channel).await;
                let prompt = build_prompt(&turns, &self.tools, "");
                let snippet = Snippet {
                    content: &prompt,
                    filename: PROMPT_FILENAME,
                    initial_comment: None,
                };
                self.messenger
                    .send_snippet(snippet, ctx.channel, ctx.thread_ts)
                    .await
            }
        }
    }

    async fn converse(&self, text: &str, ctx: &ToolContext<'_>) -> Result<()> {
        let turns = self
            .conversations
            .append(ctx.channel, TurnRole::Human.tag(text))
            .await;
        let prompt = build_prompt(&turns, &self.tools, TurnRole::Ai.as_ref());
        debug!(
            "Prompt for {} has {} turns, {} characters",
            ctx.channel,
            turns.len(),
            prompt.len()
        );

        let completion = self.backend.complete(&prompt).await?;
        self.conversations
            .append(ctx.channel, TurnRole::Ai.tag(&completion))
            .await;

        match dispatch(&self.tools, &completion, ctx).await? {
            Dispatch::Tool { tool, output } => {
                debug!("{} produced {} characters", tool.name(), output.len());
            }
            Dispatch::Fallback(_) => {
                debug!("Reply in {} went through the fallback path", ctx.channel);
            }
        }
        Ok(())
    }
}
