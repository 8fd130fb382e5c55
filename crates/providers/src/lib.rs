//! Completion provider implementations for LiteClaw.
//!
//! All providers implement the `liteclaw_core::CompletionProvider` trait.
//! Selection is driven by configuration, with environment keys taking
//! priority at config-load time.

pub mod openai_compat;

pub use openai_compat::OpenAiCompatProvider;

use liteclaw_config::AppConfig;
use liteclaw_core::error::ProviderError;
use liteclaw_core::provider::CompletionProvider;
use std::sync::Arc;

/// Build the configured provider.
///
/// Fails with `NotConfigured` when no API key is available for the selected
/// provider; a custom `base_url` overrides the provider's default endpoint.
pub fn from_config(config: &AppConfig) -> Result<Arc<dyn CompletionProvider>, ProviderError> {
    let api_key = config
        .provider
        .api_key
        .clone()
        .ok_or_else(|| {
            ProviderError::NotConfigured(format!(
                "no API key for provider '{}' (set GROQ_API_KEY or OPENAI_API_KEY, or add it to config.toml)",
                config.provider.name
            ))
        })?;

    let model = config.provider.model.clone();

    let provider = match (&config.provider.base_url, config.provider.name.as_str()) {
        (Some(base_url), name) => OpenAiCompatProvider::new(name, base_url, api_key, model)?,
        (None, "openai") => OpenAiCompatProvider::openai(api_key, model)?,
        (None, _) => OpenAiCompatProvider::groq(api_key, model)?,
    };

    Ok(Arc::new(provider.with_temperature(config.provider.temperature)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use liteclaw_config::ProviderConfig;

    #[test]
    fn missing_api_key_is_not_configured() {
        let config = AppConfig::default();
        let Err(err) = from_config(&config) else {
            panic!("expected NotConfigured for a key-less config");
        };
        assert!(matches!(err, ProviderError::NotConfigured(_)));
    }

    #[test]
    fn groq_is_selected_by_default() {
        let config = AppConfig {
            provider: ProviderConfig {
                api_key: Some("key".into()),
                ..ProviderConfig::default()
            },
            ..AppConfig::default()
        };
        let provider = from_config(&config).unwrap();
        assert_eq!(provider.name(), "groq");
    }

    #[test]
    fn openai_is_selected_by_name() {
        let config = AppConfig {
            provider: ProviderConfig {
                name: "openai".into(),
                api_key: Some("key".into()),
                ..ProviderConfig::default()
            },
            ..AppConfig::default()
        };
        let provider = from_config(&config).unwrap();
        assert_eq!(provider.name(), "openai");
    }
}
