//! Segmentation of a model reply into tool name, arguments and body.
//!
//! ```text
//! TOOLNAME ARG1 ARG2
//! BODY LINE 1
//! BODY LINE 2
//! ```
//!
//! Every tool and the dispatcher go through [`Instruction::parse`] so they agree on arity.

/// A model reply split into its instruction line and body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instruction<'a> {
    /// All lines of the trimmed message; line 0 is the instruction line.
    pub lines: Vec<&'a str>,
    /// Token 0 of the instruction line, `None` if the line is empty.
    pub tool: Option<&'a str>,
    /// Tokens 1.. of the instruction line, split on single spaces.
    pub args: Vec<&'a str>,
}

impl<'a> Instruction<'a> {
    #[must_use]
    pub fn parse(message: &'a str) -> Self {
        let lines: Vec<&str> = message.trim().split('\n').collect();
        let first_line = lines.first().copied().map_or("", str::trim);

        let mut tokens = first_line.split(' ');
        let tool = tokens.next().filter(|token| !token.is_empty());
        let args = tokens.collect();

        Self { lines, tool, args }
    }

    /// The trimmed instruction line.
    #[must_use]
    pub fn first_line(&self) -> &'a str {
        self.lines.first().copied().map_or("", str::trim)
    }

    /// Whether anything follows the instruction line.
    #[must_use]
    pub fn has_body(&self) -> bool {
        self.lines.len() > 1
    }

    /// Lines after the instruction line, joined by `\n`.
    #[must_use]
    pub fn body(&self) -> String {
        self.lines.get(1..).unwrap_or_default().join("\n")
    }
}
