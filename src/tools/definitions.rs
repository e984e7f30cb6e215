//! Tool definitions advertised to the model.

use strum::{EnumIter, IntoStaticStr};

/// The tools the model may invoke.
///
/// The string form is the name the model writes as token 0 of its reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, IntoStaticStr)]
pub enum Tool {
    /// Send the body to the human as a file snippet.
    #[strum(serialize = "/code_reply")]
    CodeReply,
    /// Evaluate `X OP Y` and reply with the result.
    #[strum(serialize = "/calc")]
    Calc,
    /// Send the text to the human as a message.
    #[strum(serialize = "/reply")]
    Reply,
}

impl Tool {
    #[must_use]
    pub fn name(self) -> &'static str {
        self.into()
    }

    /// Description rendered into the prompt. Must not repeat the tool name.
    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            Tool::CodeReply => {
                "Takes one argument, FILENAME. Sends the program code written from the second \
                line onward to the Human as a syntax-highlighted file. FILENAME must carry the \
                extension that matches the language."
            }
            Tool::Calc => {
                "Takes three arguments, X OP Y, where OP is one of + - * /. Computes the \
                result and sends it to the Human. Nothing may be written after the first line."
            }
            Tool::Reply => {
                "Sends the text written from the second line onward to the Human. \
                Prefer another tool whenever one applies."
            }
        }
    }
}
