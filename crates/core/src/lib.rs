//! # LiteClaw Core
//!
//! Domain types, traits, and error definitions for the LiteClaw agent runtime.
//! This crate has **zero framework dependencies** — it defines the domain model
//! that all other crates implement against.
//!
//! ## Design Philosophy
//!
//! Every subsystem is defined as a trait here. Implementations live in their
//! respective crates. This enables:
//! - Swapping implementations via configuration
//! - Easy testing with mock/stub implementations
//! - Clean dependency graph (all crates depend inward on core)

pub mod error;
pub mod event;
pub mod kv;
pub mod provider;
pub mod tool;
pub mod turn;

// Re-export key types at crate root for ergonomics
pub use error::{Error, ProviderError, Result, StoreError, ToolError};
pub use event::{DomainEvent, EventBus};
pub use kv::KvStore;
pub use provider::CompletionProvider;
pub use tool::{Tool, ToolContext, ToolInvocation, ToolRegistry, ToolResult};
pub use turn::{Role, Turn};
