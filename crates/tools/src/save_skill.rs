//! Skill-saving tool.
//!
//! Skills share the fact namespace: a skill is persisted as a fact formatted
//! `Skill: <name> - <instructions>`, so it surfaces in the prompt's known
//! facts the same way everything else does. No separate storage.

use async_trait::async_trait;
use liteclaw_core::error::ToolError;
use liteclaw_core::tool::{Tool, ToolContext, ToolResult};
use liteclaw_store::{FactCategory, FactStore};
use std::sync::Arc;

pub struct SaveSkillTool {
    ctx: ToolContext,
    facts: Arc<FactStore>,
}

impl SaveSkillTool {
    pub fn new(ctx: ToolContext, facts: Arc<FactStore>) -> Self {
        Self { ctx, facts }
    }
}

#[async_trait]
impl Tool for SaveSkillTool {
    fn name(&self) -> &str {
        "save_skill"
    }

    fn description(&self) -> &str {
        "Save a new skill or procedure for future use. Use this when the user teaches you how to do something new."
    }

    fn parameters_schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "name": {
                    "type": "string",
                    "description": "The name of the skill (e.g. \"morning_routine\", \"check_flights\")"
                },
                "instructions": {
                    "type": "string",
                    "description": "Step-by-step instructions on how to perform the task"
                }
            },
            "required": ["name", "instructions"]
        })
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<ToolResult, ToolError> {
        let name = arguments["name"]
            .as_str()
            .ok_or_else(|| ToolError::InvalidArguments("Missing 'name' argument".into()))?;
        let instructions = arguments["instructions"]
            .as_str()
            .ok_or_else(|| ToolError::InvalidArguments("Missing 'instructions' argument".into()))?;

        if name.trim().is_empty() || instructions.trim().is_empty() {
            return Ok(ToolResult::failure(
                "Error: skill name and instructions must not be empty.",
            ));
        }

        let fact = format!("Skill: {name} - {instructions}");
        self.facts
            .save_fact(self.ctx.user_id, &fact, FactCategory::General)
            .await
            .map_err(|e| ToolError::ExecutionFailed {
                tool_name: "save_skill".into(),
                reason: e.to_string(),
            })?;

        Ok(ToolResult::ok(format!("Skill \"{name}\" saved.")))
    }
}
