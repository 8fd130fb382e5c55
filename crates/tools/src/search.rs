//! Web search tool backed by the Tavily search API.
//!
//! Returns the top 3 results as a JSON list of {title, url, content}.
//! Every failure mode produces a fixed human-readable message — a missing
//! API key, an empty result set, and network errors all come back as text
//! the model can read and route around.

use async_trait::async_trait;
use liteclaw_core::error::ToolError;
use liteclaw_core::tool::{Tool, ToolResult};
use serde::{Deserialize, Serialize};
use tracing::warn;

const TAVILY_ENDPOINT: &str = "https://api.tavily.com/search";
const MAX_RESULTS: usize = 3;

pub struct SearchTool {
    api_key: Option<String>,
    client: reqwest::Client,
}

impl SearchTool {
    pub fn new(api_key: Option<String>, client: reqwest::Client) -> Self {
        Self { api_key, client }
    }
}

#[derive(Serialize)]
struct SearchResult {
    title: String,
    url: String,
    content: String,
}

#[derive(Deserialize)]
struct TavilyResponse {
    #[serde(default)]
    results: Vec<TavilyResult>,
}

#[derive(Deserialize)]
struct TavilyResult {
    #[serde(default)]
    title: String,
    #[serde(default)]
    url: String,
    #[serde(default)]
    content: String,
}

#[async_trait]
impl Tool for SearchTool {
    fn name(&self) -> &str {
        "search"
    }

    fn description(&self) -> &str {
        "Search the web for real-time information. Use this for news, facts, or technical documentation."
    }

    fn parameters_schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "query": {
                    "type": "string",
                    "description": "The search query to execute"
                }
            },
            "required": ["query"]
        })
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<ToolResult, ToolError> {
        let query = arguments["query"]
            .as_str()
            .ok_or_else(|| ToolError::InvalidArguments("Missing 'query' argument".into()))?;

        let Some(api_key) = &self.api_key else {
            return Ok(ToolResult::failure(
                "Error: TAVILY_API_KEY is not configured.",
            ));
        };

        let body = serde_json::json!({
            "query": query,
            "search_depth": "basic",
            "max_results": MAX_RESULTS,
        });

        let response = self
            .client
            .post(TAVILY_ENDPOINT)
            .header("Authorization", format!("Bearer {api_key}"))
            .json(&body)
            .send()
            .await;

        let parsed: TavilyResponse = match response {
            Ok(resp) if resp.status().is_success() => match resp.json().await {
                Ok(parsed) => parsed,
                Err(e) => {
                    warn!(error = %e, "Search response parse failed");
                    return Ok(ToolResult::failure("Search failed due to an API error."));
                }
            },
            Ok(resp) => {
                warn!(status = resp.status().as_u16(), "Search API returned error");
                return Ok(ToolResult::failure("Search failed due to an API error."));
            }
            Err(e) => {
                warn!(error = %e, "Search request failed");
                return Ok(ToolResult::failure("Search failed due to an API error."));
            }
        };

        if parsed.results.is_empty() {
            return Ok(ToolResult::ok("No results found."));
        }

        let results: Vec<SearchResult> = parsed
            .results
            .into_iter()
            .take(MAX_RESULTS)
            .map(|r| SearchResult {
                title: r.title,
                url: r.url,
                content: r.content,
            })
            .collect();

        let output = serde_json::to_string_pretty(&results).unwrap_or_default();
        Ok(ToolResult::ok(output))
    }
}
