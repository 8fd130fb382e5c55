//! Raw fact dump for operator diagnostics.
//!
//! Unlike `get_facts`, this shows every stored set untouched — no legacy
//! merge, no dedup, no filtering — so an operator can see exactly what the
//! store holds for the invoking user.

use async_trait::async_trait;
use liteclaw_core::error::ToolError;
use liteclaw_core::tool::{Tool, ToolContext, ToolResult};
use liteclaw_store::FactStore;
use std::sync::Arc;

pub struct DebugFactsTool {
    ctx: ToolContext,
    facts: Arc<FactStore>,
}

impl DebugFactsTool {
    pub fn new(ctx: ToolContext, facts: Arc<FactStore>) -> Self {
        Self { ctx, facts }
    }
}

#[async_trait]
impl Tool for DebugFactsTool {
    fn name(&self) -> &str {
        "debug_facts"
    }

    fn description(&self) -> &str {
        "Dump all raw stored facts for the current user. For diagnostics only."
    }

    fn parameters_schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {}
        })
    }

    async fn execute(&self, _arguments: serde_json::Value) -> Result<ToolResult, ToolError> {
        let dump = self
            .facts
            .raw_facts(self.ctx.user_id)
            .await
            .map_err(|e| ToolError::ExecutionFailed {
                tool_name: "debug_facts".into(),
                reason: e.to_string(),
            })?;

        if dump.is_empty() {
            return Ok(ToolResult::ok("No facts stored."));
        }

        let mut out = String::new();
        for (label, set) in [
            ("core", &dump.core),
            ("general", &dump.general),
            ("legacy", &dump.legacy),
        ] {
            if set.is_empty() {
                continue;
            }
            out.push_str(&format!("{label} ({}):\n", set.len()));
            for fact in set {
                out.push_str(&format!("  - {fact}\n"));
            }
        }

        Ok(ToolResult::ok(out.trim_end().to_string()))
    }
}
