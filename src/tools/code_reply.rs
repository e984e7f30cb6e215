//! Code snippet upload.

use log::debug;

use crate::error::Result;
use crate::slack::Snippet;

use super::executor::ToolContext;
use super::instruction::Instruction;

pub fn accepts(instruction: &Instruction<'_>) -> bool {
    !instruction.args.is_empty() && instruction.has_body()
}

pub async fn run(instruction: &Instruction<'_>, ctx: &ToolContext<'_>) -> Result<String> {
    let filename = instruction.args.first().copied().unwrap_or("snippet.txt");
    let code = instruction.body();
    debug!("Sending {} bytes of code as {filename}", code.len());

    let snippet = Snippet {
        content: &code,
        filename,
        initial_comment: None,
    };
    ctx.messenger
        .send_snippet(snippet, ctx.channel, ctx.thread_ts)
        .await?;
    Ok(code)
}
