//! Tool input validation and execution.

use log::debug;

use crate::error::Result;
use crate::slack::Messenger;

use super::definitions::Tool;
use super::instruction::Instruction;
use super::{calc, code_reply, reply};

/// Where a tool delivers its output.
pub struct ToolContext<'a> {
    pub messenger: &'a dyn Messenger,
    pub channel: &'a str,
    pub thread_ts: &'a str,
}

impl Tool {
    /// Whether this tool can handle the full reply `message`.
    ///
    /// Only the shape is checked here; matching token 0 against [`Tool::name`] is the
    /// registry's job.
    #[must_use]
    pub fn check_input(self, message: &str) -> bool {
        let instruction = Instruction::parse(message);
        match self {
            Tool::CodeReply => code_reply::accepts(&instruction),
            Tool::Calc => calc::accepts(&instruction),
            Tool::Reply => true,
        }
    }

    /// Run the tool against `message` and return the text it produced.
    pub async fn execute(self, message: &str, ctx: &ToolContext<'_>) -> Result<String> {
        debug!("Executing tool '{}' in {}", self.name(), ctx.channel);

        let instruction = Instruction::parse(message);
        match self {
            Tool::CodeReply => code_reply::run(&instruction, ctx).await,
            Tool::Calc => calc::run(&instruction, ctx).await,
            Tool::Reply => reply::run(&instruction, ctx).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn reply_accepts_everything() {
        for message in ["", "/reply", "/reply\nhi", "random text", "/calc 1", "\n\n\n"] {
            assert!(Tool::Reply.check_input(message), "{message:?}");
        }
    }

    #[test]
    fn calc_needs_three_arguments() {
        assert!(Tool::Calc.check_input("/calc 4 * 5"));
        assert!(Tool::Calc.check_input("/calc 4 * 5 extra"));
        assert!(!Tool::Calc.check_input("/calc 4 *"));
        assert!(!Tool::Calc.check_input("/calc"));
    }

    #[test]
    fn code_reply_needs_filename_and_body() {
        assert!(Tool::CodeReply.check_input("/code_reply foo.py\nprint(1)"));
        assert!(!Tool::CodeReply.check_input("/code_reply foo.py"));
        assert!(!Tool::CodeReply.check_input("/code_reply\nprint(1)"));
    }

    #[test]
    fn every_tool_accepts_its_own_canonical_form() {
        let canonical = |tool: Tool| match tool {
            Tool::CodeReply => "/code_reply main.rs\nfn main() {}",
            Tool::Calc => "/calc 1 + 1",
            Tool::Reply => "/reply\nhello",
        };
        for tool in Tool::iter() {
            assert!(tool.check_input(canonical(tool)), "{tool:?}");
        }
    }
}
