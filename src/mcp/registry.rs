use std::{collections::HashMap, future::Future, pin::Pin};

use rmcp::ErrorData as McpError;
use rmcp::model::{
    CallToolRequestParam, CallToolResult, ReadResourceRequestParam, ReadResourceResult,
};

use super::server::TextSummaryMcpServer;

pub type ResourceFuture =
    Pin<Box<dyn Future<Output = Result<ReadResourceResult, McpError>> + Send>>;
pub type ToolFuture = Pin<Box<dyn Future<Output = Result<CallToolResult, McpError>> + Send>>;

pub type ResourceHandler = fn(&TextSummaryMcpServer, ReadResourceRequestParam) -> ResourceFuture;
pub type ToolHandler = fn(&TextSummaryMcpServer, CallToolRequestParam) -> ToolFuture;

/// Dispatch table for the summarization server's tools and resources.
///
/// Names are fixed at startup; registering the same name twice is a wiring bug.
#[derive(Default)]
pub struct Registry {
    resources: HashMap<&'static str, ResourceHandler>,
    tools: HashMap<&'static str, ToolHandler>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_resource(&mut self, uri: &'static str, handler: ResourceHandler) {
        let previous = self.resources.insert(uri, handler);
        debug_assert!(previous.is_none(), "resource {uri} registered twice");
    }

    pub fn register_tool(&mut self, name: &'static str, handler: ToolHandler) {
        let previous = self.tools.insert(name, handler);
        debug_assert!(previous.is_none(), "tool {name} registered twice");
    }

    pub fn resource(&self, uri: &str) -> Option<ResourceHandler> {
        self.resources.get(uri).copied()
    }

    pub fn tool(&self, name: &str) -> Option<ToolHandler> {
        self.tools.get(name).copied()
    }

    /// Registered tool names in sorted order.
    pub fn tool_names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.tools.keys().copied().collect();
        names.sort_unstable();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noop_tool(_server: &TextSummaryMcpServer, _request: CallToolRequestParam) -> ToolFuture {
        Box::pin(async { Ok(CallToolResult::success(Vec::new())) })
    }

    #[test]
    fn lookups_only_return_registered_handlers() {
        let mut registry = Registry::new();
        registry.register_tool("b-tool", noop_tool);
        registry.register_tool("a-tool", noop_tool);

        assert!(registry.tool("a-tool").is_some());
        assert!(registry.tool("missing").is_none());
        assert!(registry.resource("mcp://models").is_none());
        assert_eq!(registry.tool_names(), vec!["a-tool", "b-tool"]);
    }
}
