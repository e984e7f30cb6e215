//! Plain text reply to the human.

use log::warn;

use crate::error::Result;

use super::executor::ToolContext;
use super::instruction::Instruction;

/// Text sent for a reply: arguments on the instruction line, then the body.
pub fn render(instruction: &Instruction<'_>) -> String {
    let head = instruction.args.join(" ");
    let body = instruction.body();
    match (head.is_empty(), body.is_empty()) {
        (true, _) => body,
        (false, true) => head,
        (false, false) => format!("{head}\n{body}"),
    }
}

/// Sends the rendered reply. Slack rejects empty text, so an empty reply is logged and
/// nothing is sent.
pub async fn run(instruction: &Instruction<'_>, ctx: &ToolContext<'_>) -> Result<String> {
    let text = render(instruction);
    if text.trim().is_empty() {
        warn!("Empty reply for {}, nothing sent", ctx.channel);
        return Ok(text);
    }
    ctx.messenger
        .send_message(&text, ctx.channel, ctx.thread_ts)
        .await?;
    Ok(text)
}
