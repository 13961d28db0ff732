//! Agent definition: instructions bound to a capability set.

use std::sync::Arc;

use crate::tools::Tool;

/// An agent: a named instruction string plus the tools it may invoke and
/// the agents it may hand a turn off to.
///
/// Immutable after construction; build with the `with_*` methods and share
/// via `Arc`. The capability set is declarative — resolution happens in
/// the runner, which only honors tools and hand-off targets declared here.
pub struct Agent {
    name: String,
    instructions: String,
    tools: Vec<Arc<dyn Tool>>,
    handoffs: Vec<Arc<Agent>>,
}

impl Agent {
    /// Create a new agent with the given name and instruction text.
    pub fn new(name: impl Into<String>, instructions: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            instructions: instructions.into(),
            tools: Vec::new(),
            handoffs: Vec::new(),
        }
    }

    /// Add a tool.
    pub fn with_tool(mut self, tool: Arc<dyn Tool>) -> Self {
        self.tools.push(tool);
        self
    }

    /// Add several tools.
    pub fn with_tools(mut self, tools: impl IntoIterator<Item = Arc<dyn Tool>>) -> Self {
        self.tools.extend(tools);
        self
    }

    /// Declare a hand-off target.
    pub fn with_handoff(mut self, target: Arc<Agent>) -> Self {
        self.handoffs.push(target);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn instructions(&self) -> &str {
        &self.instructions
    }

    pub fn tools(&self) -> &[Arc<dyn Tool>] {
        &self.tools
    }

    pub fn handoffs(&self) -> &[Arc<Agent>] {
        &self.handoffs
    }

    /// Whether this agent can call tools or delegate.
    pub fn has_capabilities(&self) -> bool {
        !self.tools.is_empty() || !self.handoffs.is_empty()
    }

    /// Find a declared tool by name.
    pub fn find_tool(&self, name: &str) -> Option<&Arc<dyn Tool>> {
        self.tools.iter().find(|t| t.name() == name)
    }
}

impl std::fmt::Debug for Agent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Agent")
            .field("name", &self.name)
            .field("tools", &self.tools.iter().map(|t| t.name()).collect::<Vec<_>>())
            .field(
                "handoffs",
                &self.handoffs.iter().map(|a| a.name()).collect::<Vec<_>>(),
            )
            .finish()
    }
}
