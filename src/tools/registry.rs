//! Ordered set of tools available to the model.

use super::definitions::Tool;
use super::instruction::Instruction;

/// Tools in dispatch priority order.
///
/// The same registry feeds the prompt and the dispatcher, so the model is only told about
/// tools that can actually run.
#[derive(Debug, Clone)]
pub struct ToolRegistry {
    tools: Vec<Tool>,
}

impl Default for ToolRegistry {
    /// Strict tools first, the catch-all reply last.
    fn default() -> Self {
        Self::new(vec![Tool::CodeReply, Tool::Calc, Tool::Reply])
    }
}

impl ToolRegistry {
    #[must_use]
    pub fn new(tools: Vec<Tool>) -> Self {
        Self { tools }
    }

    pub fn iter(&self) -> impl Iterator<Item = Tool> + '_ {
        self.tools.iter().copied()
    }

    /// First tool whose name matches token 0 of `message` and which accepts its shape.
    #[must_use]
    pub fn select(&self, message: &str) -> Option<Tool> {
        let requested = Instruction::parse(message).tool?;
        self.iter()
            .find(|tool| tool.name() == requested && tool.check_input(message))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arbitration_picks_the_named_tool() {
        let registry = ToolRegistry::default();
        assert_eq!(registry.select("/calc 4 * 5"), Some(Tool::Calc));
        assert_eq!(
            registry.select("/code_reply foo.py\nprint(1)"),
            Some(Tool::CodeReply)
        );
        assert_eq!(registry.select("/reply\nhello"), Some(Tool::Reply));
    }

    #[test]
    fn malformed_invocation_is_not_selected() {
        let registry = ToolRegistry::default();
        assert_eq!(registry.select("/calc 4 *"), None);
        assert_eq!(registry.select("/code_reply foo.py"), None);
    }

    #[test]
    fn unknown_name_is_not_selected() {
        let registry = ToolRegistry::default();
        assert_eq!(registry.select("/search cats"), None);
        assert_eq!(registry.select("Hello there"), None);
        assert_eq!(registry.select(""), None);
    }

    #[test]
    fn reply_is_last() {
        assert_eq!(ToolRegistry::default().iter().last(), Some(Tool::Reply));
    }

    #[test]
    fn unregistered_tool_is_not_selected() {
        let registry = ToolRegistry::new(vec![Tool::Reply]);
        assert_eq!(registry.select("/calc 1 + 1"), None);
    }
}
