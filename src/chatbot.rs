//! Mention handling: admin commands, conversation with the model and tool dispatch.

mod commands;
mod dispatch;
mod handler;
mod prompt;

pub use dispatch::{Dispatch, UNRECOGNIZED_NOTE, dispatch};
pub use handler::Relay;
pub use prompt::build_prompt;
