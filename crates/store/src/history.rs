//! HistoryStore — bounded, time-ordered per-conversation message logs.
//!
//! Turns are stored newest-first as JSON and capped at a fixed window:
//! every append trims the list, so the oldest turn is evicted once the cap
//! is reached. Reads reverse into chronological order. Entries that fail to
//! deserialize are dropped silently rather than failing the request.

use liteclaw_core::error::StoreError;
use liteclaw_core::kv::KvStore;
use liteclaw_core::turn::{Role, Turn};
use std::sync::Arc;
use tracing::debug;

/// How many turns one conversation retains.
const HISTORY_LIMIT: usize = 20;

/// Bounded per-conversation message log backed by a [`KvStore`].
pub struct HistoryStore {
    kv: Arc<dyn KvStore>,
    limit: usize,
}

impl HistoryStore {
    pub fn new(kv: Arc<dyn KvStore>) -> Self {
        Self { kv, limit: HISTORY_LIMIT }
    }

    /// Override the retention cap (tests, non-default deployments).
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    fn key(chat_id: i64) -> String {
        format!("history:{chat_id}")
    }

    /// Read the conversation's turns, oldest first.
    pub async fn get_history(&self, chat_id: i64) -> Result<Vec<Turn>, StoreError> {
        let key = Self::key(chat_id);
        let raw = self.kv.list_range(&key, 0, -1).await?;

        let mut turns: Vec<Turn> = raw
            .iter()
            .filter_map(|item| match serde_json::from_str(item) {
                Ok(turn) => Some(turn),
                Err(e) => {
                    // Corruption tolerance: skip, don't fail the read.
                    debug!(chat_id, error = %e, "Dropping undeserializable history entry");
                    None
                }
            })
            .collect();
        turns.reverse();
        Ok(turns)
    }

    /// Append a turn and trim to the retention cap.
    pub async fn add_message(
        &self,
        chat_id: i64,
        role: Role,
        content: &str,
    ) -> Result<(), StoreError> {
        let key = Self::key(chat_id);
        let turn = Turn::new(role, content);
        let serialized = serde_json::to_string(&turn)
            .map_err(|e| StoreError::Storage(format!("Failed to serialize turn: {e}")))?;

        self.kv.list_push_front(&key, &serialized).await?;
        self.kv.list_trim(&key, 0, self.limit as i64 - 1).await
    }

    /// Unconditionally delete the conversation's stored turns.
    pub async fn clear_history(&self, chat_id: i64) -> Result<(), StoreError> {
        self.kv.delete(&Self::key(chat_id)).await
    }
}
