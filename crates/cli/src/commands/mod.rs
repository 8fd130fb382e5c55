//! Command implementations for the LiteClaw CLI.

pub mod chat;
pub mod facts;
pub mod onboard;
pub mod reset;

use liteclaw_agent::{AgentService, PromptAssembler};
use liteclaw_config::AppConfig;
use liteclaw_core::kv::KvStore;
use liteclaw_core::EventBus;
use liteclaw_store::{FactStore, HistoryStore, MemoryKv, SqliteKv};
use std::path::Path;
use std::sync::Arc;

/// Open the configured storage backend.
///
/// Shared by every command that touches storage; commands that never call
/// the provider (facts, reset) stop here and work on the stores directly.
pub(crate) async fn build_stores(
    config: &AppConfig,
) -> Result<(Arc<FactStore>, Arc<HistoryStore>), Box<dyn std::error::Error>> {
    let kv: Arc<dyn KvStore> = match config.store.backend.as_str() {
        "memory" => Arc::new(MemoryKv::new()),
        _ => {
            let db_path = config.resolved_db_path();
            if let Some(parent) = db_path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            let path = db_path
                .to_str()
                .ok_or("Database path is not valid UTF-8")?;
            Arc::new(SqliteKv::new(path).await?)
        }
    };

    let facts = Arc::new(FactStore::new(kv.clone()));
    let history = Arc::new(HistoryStore::new(kv).with_limit(config.agent.history_limit));
    Ok((facts, history))
}

/// Build the full agent service from configuration.
pub(crate) async fn build_service(
    config: &AppConfig,
) -> Result<AgentService, Box<dyn std::error::Error>> {
    let (facts, history) = build_stores(config).await?;
    let provider = liteclaw_providers::from_config(config)?;
    let event_bus = Arc::new(EventBus::default());

    let assembler = match &config.agent.persona_path {
        Some(path) => PromptAssembler::from_file(Path::new(path)),
        None => PromptAssembler::new(),
    };

    Ok(AgentService::new(provider, facts, history, event_bus)
        .with_assembler(assembler)
        .with_tavily_api_key(config.search.tavily_api_key.clone())
        .with_max_turns(config.agent.max_turns))
}
