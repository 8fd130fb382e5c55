//! CompletionProvider trait — the abstraction over text-completion backends.
//!
//! The turn loop deliberately treats the model as an opaque
//! prompt-plus-history → text function. No structured tool schema crosses
//! this boundary; tool syntax is conveyed purely through the system prompt's
//! instructional text, which keeps the loop portable across providers that
//! lack native function calling.

use async_trait::async_trait;
use crate::error::ProviderError;
use crate::turn::Turn;

/// The core CompletionProvider trait.
///
/// Every LLM backend (OpenAI, Groq, any OpenAI-compatible endpoint)
/// implements this trait. The turn loop calls `generate()` without knowing
/// which provider is being used.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// A human-readable name for this provider (e.g., "openai", "groq").
    fn name(&self) -> &str;

    /// Generate a completion for the given system prompt and message buffer.
    async fn generate(
        &self,
        system_prompt: &str,
        turns: &[Turn],
    ) -> std::result::Result<String, ProviderError>;

    /// Health check — can we reach the provider?
    async fn health_check(&self) -> std::result::Result<bool, ProviderError> {
        Ok(true)
    }
}
