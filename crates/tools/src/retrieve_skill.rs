//! Skill-retrieval tool — an intentional stub.
//!
//! Skills live in the fact namespace and are already injected into the
//! system prompt on every request, so there is no keyed lookup here. The
//! tool exists so the model has somewhere to land when it asks for a skill,
//! and the response redirects it to the context it already has.

use async_trait::async_trait;
use liteclaw_core::error::ToolError;
use liteclaw_core::tool::{Tool, ToolResult};

pub struct RetrieveSkillTool;

#[async_trait]
impl Tool for RetrieveSkillTool {
    fn name(&self) -> &str {
        "retrieve_skill"
    }

    fn description(&self) -> &str {
        "Retrieve instructions for a specific skill."
    }

    fn parameters_schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "name": {
                    "type": "string",
                    "description": "The name of the skill to retrieve"
                }
            },
            "required": ["name"]
        })
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<ToolResult, ToolError> {
        let name = arguments["name"].as_str().unwrap_or("unknown");
        Ok(ToolResult::ok(format!(
            "(Skill retrieval is implicit via memory context. If you need specific details, \
             ask the user or look for \"Skill: {name}\" in your known facts.)"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn returns_guidance_text() {
        let tool = RetrieveSkillTool;
        let result = tool
            .execute(serde_json::json!({"name": "morning_routine"}))
            .await
            .unwrap();

        assert!(result.success);
        assert!(result.output.contains("Skill: morning_routine"));
        assert!(result.output.contains("implicit"));
    }

    #[tokio::test]
    async fn tolerates_missing_name() {
        let tool = RetrieveSkillTool;
        let result = tool.execute(serde_json::json!({})).await.unwrap();
        assert!(result.success);
    }
}
