//! Fact-saving tool with robust argument extraction.
//!
//! The model is not guaranteed to send well-formed arguments, so extraction
//! tolerates several shapes: a raw string, an object carrying the text under
//! `fact`, `content`, or `text`, or — as a last resort — the whole non-empty
//! object serialized as the fact. Empty and degenerate input (`{}`, `[]`,
//! blank) is rejected with an error message, never an exception.

use async_trait::async_trait;
use liteclaw_core::error::ToolError;
use liteclaw_core::tool::{Tool, ToolContext, ToolResult};
use liteclaw_store::{FactCategory, FactStore};
use std::sync::Arc;
use tracing::debug;

pub struct SaveFactTool {
    ctx: ToolContext,
    facts: Arc<FactStore>,
}

impl SaveFactTool {
    pub fn new(ctx: ToolContext, facts: Arc<FactStore>) -> Self {
        Self { ctx, facts }
    }

    /// Pull the fact text out of whatever shape the model sent.
    fn extract_fact(arguments: &serde_json::Value) -> Option<String> {
        if let Some(s) = arguments.as_str() {
            return Some(s.to_string());
        }

        if let Some(obj) = arguments.as_object() {
            for field in ["fact", "content", "text"] {
                if let Some(s) = obj.get(field).and_then(|v| v.as_str()) {
                    return Some(s.to_string());
                }
            }
            if !obj.is_empty() {
                // No recognized field, but the model sent *something* — keep it.
                return serde_json::to_string(arguments).ok();
            }
        }

        None
    }
}

fn is_degenerate(text: &str) -> bool {
    let trimmed = text.trim();
    trimmed.is_empty() || trimmed == "{}" || trimmed == "[]"
}

#[async_trait]
impl Tool for SaveFactTool {
    fn name(&self) -> &str {
        "save_fact"
    }

    fn description(&self) -> &str {
        "Save a permanent fact about the user or their preferences."
    }

    fn parameters_schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "fact": {
                    "type": "string",
                    "description": "The fact to remember (e.g. \"User prefers dark mode\")"
                },
                "category": {
                    "type": "string",
                    "description": "Optional category: 'core' or 'general' (default)",
                    "enum": ["core", "general"]
                }
            },
            "required": ["fact"]
        })
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<ToolResult, ToolError> {
        let Some(fact) = Self::extract_fact(&arguments) else {
            return Ok(ToolResult::failure("Error: no fact content provided."));
        };

        if is_degenerate(&fact) {
            return Ok(ToolResult::failure("Error: no fact content provided."));
        }

        let category = arguments
            .get("category")
            .and_then(|v| v.as_str())
            .map(FactCategory::parse)
            .unwrap_or_default();

        self.facts
            .save_fact(self.ctx.user_id, &fact, category)
            .await
            .map_err(|e| ToolError::ExecutionFailed {
                tool_name: "save_fact".into(),
                reason: e.to_string(),
            })?;

        debug!(user_id = self.ctx.user_id, "Fact saved");
        Ok(ToolResult::ok(format!("Saved fact: \"{fact}\"")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use liteclaw_store::MemoryKv;

    fn tool() -> (SaveFactTool, Arc<FactStore>) {
        let facts = Arc::new(FactStore::new(Arc::new(MemoryKv::new())));
        let ctx = ToolContext { user_id: 42, chat_id: 42 };
        (SaveFactTool::new(ctx, facts.clone()), facts)
    }

    #[tokio::test]
    async fn saves_from_fact_field() {
        let (tool, facts) = tool();
        let result = tool
            .execute(serde_json::json!({"fact": "My name is Beka"}))
            .await
            .unwrap();

        assert!(result.success);
        assert_eq!(result.output, "Saved fact: \"My name is Beka\"");

        let all = facts.get_facts(42).await.unwrap();
        assert_eq!(all, vec!["[GENERAL] My name is Beka"]);
    }

    #[tokio::test]
    async fn saves_from_raw_string() {
        let (tool, facts) = tool();
        let result = tool
            .execute(serde_json::json!("likes rust"))
            .await
            .unwrap();

        assert!(result.success);
        assert_eq!(facts.get_facts(42).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn falls_back_to_content_and_text_fields() {
        let (tool, _) = tool();
        let from_content = tool
            .execute(serde_json::json!({"content": "from content"}))
            .await
            .unwrap();
        let from_text = tool
            .execute(serde_json::json!({"text": "from text"}))
            .await
            .unwrap();

        assert!(from_content.output.contains("from content"));
        assert!(from_text.output.contains("from text"));
    }

    #[tokio::test]
    async fn serializes_unrecognized_object() {
        let (tool, facts) = tool();
        let result = tool
            .execute(serde_json::json!({"note": "remember this"}))
            .await
            .unwrap();

        assert!(result.success);
        let all = facts.get_facts(42).await.unwrap();
        assert!(all[0].contains("remember this"));
    }

    #[tokio::test]
    async fn rejects_empty_input() {
        let (tool, facts) = tool();
        for input in [
            serde_json::json!({}),
            serde_json::json!(""),
            serde_json::json!("   "),
            serde_json::json!("{}"),
            serde_json::json!("[]"),
        ] {
            let result = tool.execute(input).await.unwrap();
            assert!(!result.success);
            assert_eq!(result.output, "Error: no fact content provided.");
        }
        assert!(facts.get_facts(42).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn honors_category_argument() {
        let (tool, facts) = tool();
        tool.execute(serde_json::json!({"fact": "name is Beka", "category": "core"}))
            .await
            .unwrap();

        let all = facts.get_facts(42).await.unwrap();
        assert_eq!(all, vec!["[CORE] name is Beka"]);
    }
}
