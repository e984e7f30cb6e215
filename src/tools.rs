//! Slash-command tools the model can invoke from the first line of its reply.

mod calc;
mod code_reply;
mod definitions;
mod executor;
mod instruction;
mod registry;
mod reply;

pub use definitions::Tool;
pub use executor::ToolContext;
pub use instruction::Instruction;
pub use registry::ToolRegistry;
