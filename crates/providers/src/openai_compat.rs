//! OpenAI-compatible provider implementation.
//!
//! Works with any endpoint exposing `/v1/chat/completions`: Groq, OpenAI,
//! OpenRouter, Ollama, vLLM, and so on. The request is deliberately
//! text-only: no `tools` field, no function-calling protocol. Tool use rides
//! inside the message text, which keeps the runtime portable across
//! providers that lack structured tool calling.

use async_trait::async_trait;
use liteclaw_core::error::ProviderError;
use liteclaw_core::provider::CompletionProvider;
use liteclaw_core::turn::Turn;
use serde::Deserialize;
use tracing::{debug, warn};

/// An OpenAI-compatible completion provider.
pub struct OpenAiCompatProvider {
    name: String,
    base_url: String,
    api_key: String,
    model: String,
    temperature: f32,
    client: reqwest::Client,
}

impl OpenAiCompatProvider {
    /// Create a provider against an arbitrary OpenAI-compatible base URL.
    pub fn new(
        name: impl Into<String>,
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
    ) -> Result<Self, ProviderError> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(120))
            .build()
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        Ok(Self {
            name: name.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            model: model.into(),
            temperature: 0.7,
            client,
        })
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Create a Groq provider (convenience constructor).
    pub fn groq(api_key: impl Into<String>, model: impl Into<String>) -> Result<Self, ProviderError> {
        Self::new("groq", "https://api.groq.com/openai/v1", api_key, model)
    }

    /// Create an OpenAI provider (convenience constructor).
    pub fn openai(api_key: impl Into<String>, model: impl Into<String>) -> Result<Self, ProviderError> {
        Self::new("openai", "https://api.openai.com/v1", api_key, model)
    }

    fn to_api_messages(system_prompt: &str, turns: &[Turn]) -> Vec<serde_json::Value> {
        let mut messages = Vec::with_capacity(turns.len() + 1);
        messages.push(serde_json::json!({
            "role": "system",
            "content": system_prompt,
        }));
        for turn in turns {
            messages.push(serde_json::json!({
                "role": turn.role.as_str(),
                "content": turn.content,
            }));
        }
        messages
    }
}

#[derive(Deserialize)]
struct ApiResponse {
    choices: Vec<ApiChoice>,
}

#[derive(Deserialize)]
struct ApiChoice {
    message: ApiMessage,
}

#[derive(Deserialize)]
struct ApiMessage {
    content: Option<String>,
}

#[async_trait]
impl CompletionProvider for OpenAiCompatProvider {
    fn name(&self) -> &str {
        &self.name
    }

    async fn generate(
        &self,
        system_prompt: &str,
        turns: &[Turn],
    ) -> Result<String, ProviderError> {
        let url = format!("{}/chat/completions", self.base_url);

        let body = serde_json::json!({
            "model": self.model,
            "messages": Self::to_api_messages(system_prompt, turns),
            "temperature": self.temperature,
            "stream": false,
        });

        debug!(provider = %self.name, model = %self.model, turns = turns.len(), "Sending completion request");

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ProviderError::Timeout(e.to_string())
                } else {
                    ProviderError::Network(e.to_string())
                }
            })?;

        let status = response.status().as_u16();

        if status == 429 {
            return Err(ProviderError::RateLimited {
                retry_after_secs: 5,
            });
        }

        if status == 401 || status == 403 {
            return Err(ProviderError::AuthenticationFailed(
                "Invalid API key or insufficient permissions".into(),
            ));
        }

        if status != 200 {
            let error_body = response.text().await.unwrap_or_default();
            warn!(status, body = %error_body, "Provider returned error");
            return Err(ProviderError::ApiError {
                status_code: status,
                message: error_body,
            });
        }

        let api_response: ApiResponse =
            response.json().await.map_err(|e| ProviderError::ApiError {
                status_code: 200,
                message: format!("Failed to parse response: {e}"),
            })?;

        let choice = api_response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| ProviderError::ApiError {
                status_code: 200,
                message: "No choices in response".into(),
            })?;

        Ok(choice.message.content.unwrap_or_default())
    }

    async fn health_check(&self) -> Result<bool, ProviderError> {
        let url = format!("{}/models", self.base_url);
        let response = self
            .client
            .get(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .send()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        Ok(response.status().is_success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use liteclaw_core::turn::Role;

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let provider =
            OpenAiCompatProvider::new("test", "http://localhost:8080/v1/", "key", "model").unwrap();
        assert_eq!(provider.base_url, "http://localhost:8080/v1");
    }

    #[test]
    fn groq_constructor_sets_endpoint() {
        let provider = OpenAiCompatProvider::groq("key", "llama-3.3-70b-versatile").unwrap();
        assert_eq!(provider.name(), "groq");
        assert_eq!(provider.base_url, "https://api.groq.com/openai/v1");
    }

    #[test]
    fn messages_lead_with_system_prompt() {
        let turns = vec![Turn::user("hi"), Turn::assistant("hello")];
        let messages = OpenAiCompatProvider::to_api_messages("be nice", &turns);

        assert_eq!(messages.len(), 3);
        assert_eq!(messages[0]["role"], "system");
        assert_eq!(messages[0]["content"], "be nice");
        assert_eq!(messages[1]["role"], "user");
        assert_eq!(messages[2]["role"], "assistant");
    }

    #[test]
    fn tool_output_turns_use_the_user_role() {
        let turns = vec![Turn::new(Role::User, "TOOL_OUTPUT (search): nothing")];
        let messages = OpenAiCompatProvider::to_api_messages("sys", &turns);
        assert_eq!(messages[1]["role"], "user");
    }
}
