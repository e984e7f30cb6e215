//! Prompt rendering for the completion model.

use std::fmt::Write;

use crate::tools::ToolRegistry;

// The length limit is advisory; nothing downstream enforces it.
const PREAMBLE: &str = "The following is a conversation between a Human and an AI. \
The AI is clever, does what the Human asks, and answers by using the tools below. \
The AI always follows these rules:\n\
- The first line of a reply is always `/xxx arg1 arg2 ...`: the tool to use and its arguments \
(xxx is the tool name, args are the arguments it needs).\n\
- When writing program code, explanations go in code comments so that everything from the \
second line onward can be run as is.\n\
- Apart from program code, a reply stays within 140 characters. To go beyond that, the AI asks \
the Human for permission first.\n";

/// Renders the preamble, the registered tools and the conversation, ending with `cue`.
#[must_use]
pub fn build_prompt(turns: &[String], tools: &ToolRegistry, cue: &str) -> String {
    let mut prompt = String::from(PREAMBLE);

    prompt.push_str("---\nThe available tools are:\n");
    for tool in tools.iter() {
        let _ = writeln!(prompt, "- {}: {}", tool.name(), tool.description());
    }
    prompt.push_str("---\n\n");

    for turn in turns {
        prompt.push_str(turn);
        prompt.push('\n');
    }
    prompt.push_str(cue);

    prompt
}
