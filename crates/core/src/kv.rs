//! KvStore trait — the narrow contract over the external key-value store.
//!
//! The runtime funnels all durable state through two primitive families:
//! capped FIFO lists (conversation history) and membership sets (facts).
//! Set-add is naturally idempotent and list-trim is naturally convergent
//! under a fixed cap, so the store's own consistency model is the only
//! concurrency primitive the system needs — no transactions, no
//! read-modify-write of whole blobs.
//!
//! Implementations: in-memory (tests, ephemeral sessions), SQLite.

use async_trait::async_trait;
use crate::error::StoreError;

/// The core key-value store trait.
///
/// All values are text. Range positions follow list convention: 0 is the
/// front (newest for history), `stop = -1` means "through the end".
#[async_trait]
pub trait KvStore: Send + Sync {
    /// The backend name (e.g., "memory", "sqlite").
    fn name(&self) -> &str;

    /// Push a value onto the front of the list at `key`.
    async fn list_push_front(&self, key: &str, value: &str) -> std::result::Result<(), StoreError>;

    /// Read the list at `key` from `start` through `stop` (inclusive).
    async fn list_range(
        &self,
        key: &str,
        start: i64,
        stop: i64,
    ) -> std::result::Result<Vec<String>, StoreError>;

    /// Trim the list at `key`, keeping only positions `start` through `stop`.
    async fn list_trim(&self, key: &str, start: i64, stop: i64)
        -> std::result::Result<(), StoreError>;

    /// Delete the value at `key` (list or set).
    async fn delete(&self, key: &str) -> std::result::Result<(), StoreError>;

    /// Add a member to the set at `key`. Re-adding an existing member is a no-op.
    async fn set_add(&self, key: &str, member: &str) -> std::result::Result<(), StoreError>;

    /// List all members of the set at `key`. No ordering guarantee.
    async fn set_members(&self, key: &str) -> std::result::Result<Vec<String>, StoreError>;
}
