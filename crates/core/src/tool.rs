//! Tool trait — the abstraction over agent capabilities.
//!
//! Tools are what give the agent the ability to act in the world: search the
//! web, persist a fact, fetch a page. Each tool performs one
//! externally-visible side effect and returns a human-readable text result.
//!
//! Tools are constructed once per request (closing over the request's
//! [`ToolContext`] and shared stores) and discarded after it.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::warn;
use crate::error::ToolError;

/// Per-request context a tool closes over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToolContext {
    /// The user the request belongs to (facts are keyed by this).
    pub user_id: i64,
    /// The conversation the request belongs to (history is keyed by this).
    pub chat_id: i64,
}

/// A tool call detected in model output, before argument resolution.
///
/// Created during output parsing, consumed immediately by dispatch,
/// never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolInvocation {
    /// Name of the tool to execute
    pub name: String,

    /// The raw argument text between the parentheses
    pub raw_args: String,
}

/// The result of a tool execution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolResult {
    /// Whether the tool executed successfully
    pub success: bool,

    /// The human-readable output text fed back to the model
    pub output: String,
}

impl ToolResult {
    pub fn ok(output: impl Into<String>) -> Self {
        Self { success: true, output: output.into() }
    }

    pub fn failure(output: impl Into<String>) -> Self {
        Self { success: false, output: output.into() }
    }
}

/// A tool's declared shape, rendered into the system prompt so the model
/// knows what it can call and how.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolSpec {
    /// The tool name
    pub name: String,

    /// Description of what the tool does
    pub description: String,

    /// JSON Schema describing the tool's parameters
    pub parameters: serde_json::Value,
}

/// The core Tool trait.
///
/// Each tool (search, save_fact, browse, etc.) implements this trait. Tools
/// are registered in the ToolRegistry and dispatched by the turn loop.
#[async_trait]
pub trait Tool: Send + Sync {
    /// The unique name of this tool (e.g., "search", "save_fact").
    fn name(&self) -> &str;

    /// A description of what this tool does (rendered into the prompt).
    fn description(&self) -> &str;

    /// JSON Schema describing this tool's parameters.
    fn parameters_schema(&self) -> serde_json::Value;

    /// Execute the tool with the given resolved arguments.
    async fn execute(&self, arguments: serde_json::Value) -> std::result::Result<ToolResult, ToolError>;

    /// Convert this tool into a ToolSpec for prompt rendering.
    fn to_spec(&self) -> ToolSpec {
        ToolSpec {
            name: self.name().to_string(),
            description: self.description().to_string(),
            parameters: self.parameters_schema(),
        }
    }
}

/// A registry of available tools.
///
/// The turn loop uses this to:
/// 1. Get tool specs to render into the system prompt
/// 2. Look up and dispatch tools when the model requests them
pub struct ToolRegistry {
    tools: HashMap<String, Box<dyn Tool>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self {
            tools: HashMap::new(),
        }
    }

    /// Register a tool. Replaces any existing tool with the same name.
    pub fn register(&mut self, tool: Box<dyn Tool>) {
        let name = tool.name().to_string();
        self.tools.insert(name, tool);
    }

    /// Get a tool by name.
    pub fn get(&self, name: &str) -> Option<&dyn Tool> {
        self.tools.get(name).map(|t| t.as_ref())
    }

    /// Get all tool specs (for prompt rendering).
    pub fn specs(&self) -> Vec<ToolSpec> {
        self.tools.values().map(|t| t.to_spec()).collect()
    }

    /// List all registered tool names.
    pub fn names(&self) -> Vec<&str> {
        self.tools.keys().map(|s| s.as_str()).collect()
    }

    /// Dispatch a tool call, always producing a text result.
    ///
    /// The loop must always have a result turn to append, so failures never
    /// propagate from here: unregistered names yield a fixed not-implemented
    /// message and executor errors are converted to descriptive text.
    pub async fn dispatch(&self, name: &str, arguments: serde_json::Value) -> ToolResult {
        let Some(tool) = self.tools.get(name) else {
            return ToolResult::failure(format!("Tool '{name}' is not implemented."));
        };

        match tool.execute(arguments).await {
            Ok(result) => result,
            Err(e) => {
                warn!(tool = name, error = %e, "Tool execution failed");
                ToolResult::failure(format!("Error: {e}"))
            }
        }
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A simple test tool for unit tests.
    struct EchoTool;

    #[async_trait]
    impl Tool for EchoTool {
        fn name(&self) -> &str { "echo" }
        fn description(&self) -> &str { "Echoes back the input" }
        fn parameters_schema(&self) -> serde_json::Value {
            serde_json::json!({
                "type": "object",
                "properties": {
                    "text": { "type": "string" }
                },
                "required": ["text"]
            })
        }
        async fn execute(&self, arguments: serde_json::Value) -> std::result::Result<ToolResult, ToolError> {
            let text = arguments["text"].as_str().unwrap_or("").to_string();
            Ok(ToolResult::ok(text))
        }
    }

    /// A tool that always fails, to exercise error conversion.
    struct FailingTool;

    #[async_trait]
    impl Tool for FailingTool {
        fn name(&self) -> &str { "failing" }
        fn description(&self) -> &str { "Always fails" }
        fn parameters_schema(&self) -> serde_json::Value {
            serde_json::json!({"type": "object", "properties": {}})
        }
        async fn execute(&self, _arguments: serde_json::Value) -> std::result::Result<ToolResult, ToolError> {
            Err(ToolError::ExecutionFailed {
                tool_name: "failing".into(),
                reason: "boom".into(),
            })
        }
    }

    #[test]
    fn registry_register_and_lookup() {
        let mut registry = ToolRegistry::new();
        registry.register(Box::new(EchoTool));
        assert!(registry.get("echo").is_some());
        assert!(registry.get("nonexistent").is_none());
    }

    #[test]
    fn registry_specs() {
        let mut registry = ToolRegistry::new();
        registry.register(Box::new(EchoTool));
        let specs = registry.specs();
        assert_eq!(specs.len(), 1);
        assert_eq!(specs[0].name, "echo");
    }

    #[tokio::test]
    async fn dispatch_executes_tool() {
        let mut registry = ToolRegistry::new();
        registry.register(Box::new(EchoTool));

        let result = registry
            .dispatch("echo", serde_json::json!({"text": "hello world"}))
            .await;
        assert!(result.success);
        assert_eq!(result.output, "hello world");
    }

    #[tokio::test]
    async fn dispatch_unknown_tool_returns_text() {
        let registry = ToolRegistry::new();
        let result = registry.dispatch("nonexistent", serde_json::json!({})).await;
        assert!(!result.success);
        assert_eq!(result.output, "Tool 'nonexistent' is not implemented.");
    }

    #[tokio::test]
    async fn dispatch_converts_errors_to_text() {
        let mut registry = ToolRegistry::new();
        registry.register(Box::new(FailingTool));

        let result = registry.dispatch("failing", serde_json::json!({})).await;
        assert!(!result.success);
        assert!(result.output.starts_with("Error:"));
        assert!(result.output.contains("boom"));
    }
}
