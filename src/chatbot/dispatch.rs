//! Routing of a model reply to the tool named on its first line.

use log::{info, warn};

use crate::error::Result;
use crate::tools::{Instruction, Tool, ToolContext, ToolRegistry};

/// Appended to replies whose first line is not a valid tool invocation.
pub const UNRECOGNIZED_NOTE: &str = "\n(unrecognized instruction from the AI)";

/// What the dispatcher did with a reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatch {
    /// A registered tool handled the reply and produced `output`.
    Tool { tool: Tool, output: String },
    /// No tool matched; the annotated raw reply was sent instead.
    Fallback(String),
}

/// Run the first registered tool that matches `message` by name and shape.
///
/// Unknown names and malformed invocations are not errors: the raw text is forwarded to
/// the human with [`UNRECOGNIZED_NOTE`] so the failure stays visible.
pub async fn dispatch(
    tools: &ToolRegistry,
    message: &str,
    ctx: &ToolContext<'_>,
) -> Result<Dispatch> {
    if let Some(tool) = tools.select(message) {
        let output = tool.execute(message, ctx).await?;
        info!("Tool '{}' handled reply in {}", tool.name(), ctx.channel);
        return Ok(Dispatch::Tool { tool, output });
    }

    let instruction = Instruction::parse(message);
    warn!(
        "Unrecognized instruction '{}' in {}; message: {message:?}",
        instruction.first_line(),
        ctx.channel
    );

    let text = format!("{message}{UNRECOGNIZED_NOTE}");
    ctx.messenger
        .send_message(&text, ctx.channel, ctx.thread_ts)
        .await?;
    Ok(Dispatch::Fallback(text))
}
