//! AgentService — the request-level orchestrator.
//!
//! One `handle_message` call is the full pipeline for one incoming message:
//! load context, persist the user turn, run the turn loop, persist the
//! answer. The transport layer (CLI, or any future frontend) only ever talks
//! to this type.

use crate::prompt::PromptAssembler;
use crate::turn_loop::TurnLoop;
use chrono::Utc;
use liteclaw_core::tool::ToolContext;
use liteclaw_core::{CompletionProvider, DomainEvent, Error, EventBus, Role, Turn};
use liteclaw_store::{FactStore, HistoryStore, RawFactDump};
use liteclaw_tools::default_registry;
use std::sync::Arc;
use tracing::{info, instrument};

/// Orchestrates context assembly, the turn loop, and persistence.
pub struct AgentService {
    provider: Arc<dyn CompletionProvider>,
    facts: Arc<FactStore>,
    history: Arc<HistoryStore>,
    assembler: PromptAssembler,
    event_bus: Arc<EventBus>,
    tavily_api_key: Option<String>,
    http: reqwest::Client,
    max_turns: u32,
}

impl AgentService {
    pub fn new(
        provider: Arc<dyn CompletionProvider>,
        facts: Arc<FactStore>,
        history: Arc<HistoryStore>,
        event_bus: Arc<EventBus>,
    ) -> Self {
        Self {
            provider,
            facts,
            history,
            assembler: PromptAssembler::new(),
            event_bus,
            tavily_api_key: None,
            http: reqwest::Client::new(),
            max_turns: 5,
        }
    }

    pub fn with_assembler(mut self, assembler: PromptAssembler) -> Self {
        self.assembler = assembler;
        self
    }

    pub fn with_tavily_api_key(mut self, key: Option<String>) -> Self {
        self.tavily_api_key = key;
        self
    }

    pub fn with_max_turns(mut self, max_turns: u32) -> Self {
        self.max_turns = max_turns;
        self
    }

    /// Handle one user message end to end and return the assistant's reply.
    ///
    /// Tool failures surface as text inside the loop; only provider and
    /// storage failures propagate as errors.
    #[instrument(skip(self, text))]
    pub async fn handle_message(
        &self,
        user_id: i64,
        chat_id: i64,
        text: &str,
    ) -> Result<String, Error> {
        self.event_bus.publish(DomainEvent::MessageReceived {
            chat_id,
            user_id,
            content_preview: text.chars().take(80).collect(),
            timestamp: Utc::now(),
        });

        let prior = self.history.get_history(chat_id).await?;
        let facts = self.facts.get_facts(user_id).await?;

        self.history.add_message(chat_id, Role::User, text).await?;

        let ctx = ToolContext { user_id, chat_id };
        let registry = default_registry(
            ctx,
            self.facts.clone(),
            self.tavily_api_key.clone(),
            self.http.clone(),
        );

        let system_prompt = self.assembler.build(user_id, &facts, &registry.specs());

        let mut buffer = prior;
        buffer.push(Turn::user(text));

        let looper = TurnLoop::new(self.provider.clone(), self.event_bus.clone())
            .with_max_turns(self.max_turns);
        let outcome = match looper.run(chat_id, &system_prompt, &registry, buffer).await {
            Ok(outcome) => outcome,
            Err(e) => {
                self.event_bus.publish(DomainEvent::ErrorOccurred {
                    context: format!("chat {chat_id}"),
                    error_message: e.to_string(),
                    timestamp: Utc::now(),
                });
                return Err(e);
            }
        };

        info!(
            chat_id,
            generations = outcome.generations,
            tool_calls = outcome.tool_calls_made,
            "Message handled"
        );

        self.history
            .add_message(chat_id, Role::Assistant, &outcome.final_text)
            .await?;

        Ok(outcome.final_text)
    }

    /// Wipe a conversation's stored history.
    pub async fn reset(&self, chat_id: i64) -> Result<(), Error> {
        self.history.clear_history(chat_id).await?;
        Ok(())
    }

    /// Rendered facts for a user, as shown to the model.
    pub async fn facts_for(&self, user_id: i64) -> Result<Vec<String>, Error> {
        Ok(self.facts.get_facts(user_id).await?)
    }

    /// Raw per-set fact dump for diagnostics.
    pub async fn dump_facts(&self, user_id: i64) -> Result<RawFactDump, Error> {
        Ok(self.facts.raw_facts(user_id).await?)
    }
}
