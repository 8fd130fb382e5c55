//! Configuration loading, validation, and management for LiteClaw.
//!
//! Loads configuration from `~/.liteclaw/config.toml` with environment
//! variable overrides. Validates all settings at startup. API keys never
//! appear in Debug output.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// The root configuration structure.
///
/// Maps directly to `~/.liteclaw/config.toml`.
#[derive(Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Completion provider configuration
    #[serde(default)]
    pub provider: ProviderConfig,

    /// Storage configuration
    #[serde(default)]
    pub store: StoreConfig,

    /// Turn-loop configuration
    #[serde(default)]
    pub agent: AgentConfig,

    /// Web search configuration
    #[serde(default)]
    pub search: SearchConfig,
}

/// Which completion API to talk to and with what credentials.
#[derive(Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Provider name: "groq" or "openai"
    #[serde(default = "default_provider_name")]
    pub name: String,

    /// API key for the selected provider
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Model identifier passed to the completion API
    #[serde(default = "default_model")]
    pub model: String,

    /// Sampling temperature
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Override the provider's base URL (self-hosted gateways)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

fn default_provider_name() -> String {
    "groq".into()
}
fn default_model() -> String {
    "llama-3.3-70b-versatile".into()
}
fn default_temperature() -> f32 {
    0.7
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            name: default_provider_name(),
            api_key: None,
            model: default_model(),
            temperature: default_temperature(),
            base_url: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Storage backend: "sqlite" or "memory"
    #[serde(default = "default_store_backend")]
    pub backend: String,

    /// Path to the SQLite database file
    #[serde(default = "default_db_path")]
    pub db_path: String,
}

fn default_store_backend() -> String {
    "sqlite".into()
}
fn default_db_path() -> String {
    "~/.liteclaw/liteclaw.db".into()
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: default_store_backend(),
            db_path: default_db_path(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentConfig {
    /// Ceiling on provider generations per user message
    #[serde(default = "default_max_turns")]
    pub max_turns: u32,

    /// How many turns one conversation retains
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,

    /// Path to a persona file overriding the built-in persona
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub persona_path: Option<String>,
}

fn default_max_turns() -> u32 {
    5
}
fn default_history_limit() -> usize {
    20
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            max_turns: default_max_turns(),
            history_limit: default_history_limit(),
            persona_path: None,
        }
    }
}

#[derive(Clone, Serialize, Deserialize, Default)]
pub struct SearchConfig {
    /// Tavily API key; search returns a configuration error without one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tavily_api_key: Option<String>,
}

fn redact(s: &Option<String>) -> &'static str {
    match s {
        Some(_) => "[REDACTED]",
        None => "None",
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("provider", &self.provider)
            .field("store", &self.store)
            .field("agent", &self.agent)
            .field("search", &self.search)
            .finish()
    }
}

impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("name", &self.name)
            .field("api_key", &redact(&self.api_key))
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl std::fmt::Debug for SearchConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchConfig")
            .field("tavily_api_key", &redact(&self.tavily_api_key))
            .finish()
    }
}

impl AppConfig {
    /// Load configuration from the default path (~/.liteclaw/config.toml).
    ///
    /// Environment variables take priority over the file:
    /// - `GROQ_API_KEY` selects the Groq provider and sets its key
    /// - `OPENAI_API_KEY` sets the OpenAI key
    /// - `TAVILY_API_KEY` sets the search key
    /// - `LITECLAW_MODEL` overrides the model
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_dir().join("config.toml");
        let mut config = Self::load_from(&config_path)?;

        if let Ok(key) = std::env::var("GROQ_API_KEY") {
            if !key.is_empty() {
                config.provider.name = "groq".into();
                config.provider.api_key = Some(key);
            }
        } else if let Ok(key) = std::env::var("OPENAI_API_KEY") {
            if !key.is_empty() {
                config.provider.name = "openai".into();
                config.provider.api_key = Some(key);
            }
        }

        if let Ok(key) = std::env::var("TAVILY_API_KEY") {
            if !key.is_empty() {
                config.search.tavily_api_key = Some(key);
            }
        }

        if let Ok(model) = std::env::var("LITECLAW_MODEL") {
            if !model.is_empty() {
                config.provider.model = model;
            }
        }

        Ok(config)
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::info!("No config file found at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Get the configuration directory path.
    pub fn config_dir() -> PathBuf {
        dirs_home().join(".liteclaw")
    }

    /// Resolve the database path, expanding a leading `~`.
    pub fn resolved_db_path(&self) -> PathBuf {
        match self.store.db_path.strip_prefix("~/") {
            Some(rest) => dirs_home().join(rest),
            None => PathBuf::from(&self.store.db_path),
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        match self.provider.name.as_str() {
            "groq" | "openai" => {}
            other => {
                return Err(ConfigError::ValidationError(format!(
                    "unknown provider '{other}' (expected \"groq\" or \"openai\")"
                )))
            }
        }

        match self.store.backend.as_str() {
            "sqlite" | "memory" => {}
            other => {
                return Err(ConfigError::ValidationError(format!(
                    "unknown store backend '{other}' (expected \"sqlite\" or \"memory\")"
                )))
            }
        }

        if self.provider.temperature < 0.0 || self.provider.temperature > 2.0 {
            return Err(ConfigError::ValidationError(
                "provider.temperature must be between 0.0 and 2.0".into(),
            ));
        }

        if self.agent.max_turns == 0 {
            return Err(ConfigError::ValidationError(
                "agent.max_turns must be at least 1".into(),
            ));
        }

        if self.agent.history_limit == 0 {
            return Err(ConfigError::ValidationError(
                "agent.history_limit must be at least 1".into(),
            ));
        }

        Ok(())
    }

    /// Generate a default config TOML string (for `onboard`).
    pub fn default_toml() -> String {
        let config = Self::default();
        toml::to_string_pretty(&config).unwrap_or_default()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            provider: ProviderConfig::default(),
            store: StoreConfig::default(),
            agent: AgentConfig::default(),
            search: SearchConfig::default(),
        }
    }
}

/// Get the user's home directory.
fn dirs_home() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        std::env::var("USERPROFILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("C:\\Users\\Default"))
    }
    #[cfg(not(target_os = "windows"))]
    {
        std::env::var("HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("/tmp"))
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError { path: PathBuf, reason: String },

    #[error("Failed to parse config file at {path}: {reason}")]
    ParseError { path: PathBuf, reason: String },

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn default_config_is_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.provider.name, "groq");
        assert_eq!(config.agent.max_turns, 5);
        assert_eq!(config.agent.history_limit, 20);
    }

    #[test]
    fn config_roundtrip_toml() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed: AppConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.provider.name, config.provider.name);
        assert_eq!(parsed.agent.max_turns, config.agent.max_turns);
    }

    #[test]
    fn missing_config_file_returns_defaults() {
        let config = AppConfig::load_from(Path::new("/nonexistent/config.toml")).unwrap();
        assert_eq!(config.provider.name, "groq");
    }

    #[test]
    fn partial_config_fills_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[provider]\nname = \"openai\"\nmodel = \"gpt-4o-mini\"").unwrap();

        let config = AppConfig::load_from(file.path()).unwrap();
        assert_eq!(config.provider.name, "openai");
        assert_eq!(config.provider.model, "gpt-4o-mini");
        assert_eq!(config.agent.max_turns, 5);
        assert_eq!(config.store.backend, "sqlite");
    }

    #[test]
    fn unknown_provider_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[provider]\nname = \"mystery\"").unwrap();

        let err = AppConfig::load_from(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn out_of_range_temperature_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[provider]\ntemperature = 5.0").unwrap();

        assert!(AppConfig::load_from(file.path()).is_err());
    }

    #[test]
    fn zero_max_turns_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[agent]\nmax_turns = 0").unwrap();

        assert!(AppConfig::load_from(file.path()).is_err());
    }

    #[test]
    fn debug_output_redacts_keys() {
        let config = AppConfig {
            provider: ProviderConfig {
                api_key: Some("sk-secret-value".into()),
                ..ProviderConfig::default()
            },
            search: SearchConfig {
                tavily_api_key: Some("tvly-secret".into()),
            },
            ..AppConfig::default()
        };

        let debug = format!("{config:?}");
        assert!(!debug.contains("sk-secret-value"));
        assert!(!debug.contains("tvly-secret"));
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn default_toml_generation() {
        let toml_str = AppConfig::default_toml();
        assert!(toml_str.contains("groq"));
        assert!(toml_str.contains("max_turns"));
    }

    #[test]
    fn tilde_db_path_is_expanded() {
        let config = AppConfig::default();
        let path = config.resolved_db_path();
        assert!(path.to_string_lossy().ends_with(".liteclaw/liteclaw.db"));
        assert!(!path.to_string_lossy().starts_with('~'));
    }
}
