//! Turn — the conversational unit that flows through the entire system.
//!
//! A turn is one role-tagged message: the user's input, the assistant's
//! output, or a system instruction. Persisted history and the transient
//! turn-loop buffer are both sequences of turns.

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// The role of a turn's author.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// The end user
    User,
    /// The AI assistant
    Assistant,
    /// System instructions (persona, rules)
    System,
}

impl Role {
    /// The wire name used when talking to completion providers.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
            Role::System => "system",
        }
    }
}

/// A single turn in a conversation.
///
/// Stored turns carry a unix-millisecond timestamp; the history store keeps
/// them newest-first and reverses on read, so consumers always see
/// chronological order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Turn {
    /// Who authored this turn
    pub role: Role,

    /// The text content
    pub content: String,

    /// Unix timestamp in milliseconds
    pub timestamp: i64,
}

impl Turn {
    /// Create a new user turn.
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    /// Create a new assistant turn.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }

    /// Create a new system turn.
    pub fn system(content: impl Into<String>) -> Self {
        Self::new(Role::System, content)
    }

    /// Create a turn with an explicit role.
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            timestamp: Utc::now().timestamp_millis(),
        }
    }
}
