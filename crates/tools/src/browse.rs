//! Page-fetching tool.
//!
//! Fetches a URL and returns the first 2000 characters of the body with a
//! truncation marker. Any network or decoding failure yields a fixed
//! failure string rather than an error.

use async_trait::async_trait;
use liteclaw_core::error::ToolError;
use liteclaw_core::tool::{Tool, ToolResult};
use tracing::warn;

const BODY_LIMIT: usize = 2000;

pub struct BrowseTool {
    client: reqwest::Client,
}

impl BrowseTool {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Tool for BrowseTool {
    fn name(&self) -> &str {
        "browse"
    }

    fn description(&self) -> &str {
        "Visit a webpage and return its content. Use this when search is not enough."
    }

    fn parameters_schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "url": {
                    "type": "string",
                    "description": "The URL to fetch"
                }
            },
            "required": ["url"]
        })
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<ToolResult, ToolError> {
        let url = arguments["url"]
            .as_str()
            .ok_or_else(|| ToolError::InvalidArguments("Missing 'url' argument".into()))?;

        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Ok(ToolResult::failure("Failed to browse page."));
        }

        let body = match self.client.get(url).send().await {
            Ok(resp) => match resp.text().await {
                Ok(text) => text,
                Err(e) => {
                    warn!(url, error = %e, "Browse body read failed");
                    return Ok(ToolResult::failure("Failed to browse page."));
                }
            },
            Err(e) => {
                warn!(url, error = %e, "Browse request failed");
                return Ok(ToolResult::failure("Failed to browse page."));
            }
        };

        // Truncate on a char boundary, not a byte offset.
        let truncated: String = body.chars().take(BODY_LIMIT).collect();
        let output = if body.chars().count() > BODY_LIMIT {
            format!("{truncated}... (truncated)")
        } else {
            truncated
        };

        Ok(ToolResult::ok(output))
    }
}
