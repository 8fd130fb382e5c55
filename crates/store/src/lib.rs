//! Storage layer for LiteClaw.
//!
//! Two layers: [`KvStore`](liteclaw_core::KvStore) backends (the opaque
//! list/set primitives) and the domain stores built on top of them —
//! [`FactStore`] for durable per-user knowledge and [`HistoryStore`] for
//! bounded per-conversation message logs.

pub mod facts;
pub mod history;
pub mod memory_kv;

#[cfg(feature = "sqlite")]
pub mod sqlite_kv;

pub use facts::{FactCategory, FactStore, RawFactDump};
pub use history::HistoryStore;
pub use memory_kv::MemoryKv;

#[cfg(feature = "sqlite")]
pub use sqlite_kv::SqliteKv;
