//! FactStore — per-user categorized fact sets.
//!
//! Facts are opaque text strings with set semantics per (user, category):
//! re-saving identical text is a no-op. A legacy uncategorized key may also
//! exist per user; it is merged into the general category on every read and
//! is never deleted or rewritten (permanent dual-read).

use liteclaw_core::error::StoreError;
use liteclaw_core::kv::KvStore;
use std::sync::Arc;
use tracing::debug;

/// The coarse classification of a stored fact.
///
/// Controls display grouping in the prompt, not access control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FactCategory {
    Core,
    #[default]
    General,
}

impl FactCategory {
    /// The key suffix for the categorized fact set.
    pub fn key_suffix(&self) -> &'static str {
        match self {
            FactCategory::Core => "core",
            FactCategory::General => "general",
        }
    }

    /// The display tag rendered in front of each fact.
    pub fn tag(&self) -> &'static str {
        match self {
            FactCategory::Core => "[CORE]",
            FactCategory::General => "[GENERAL]",
        }
    }

    /// Parse a category name; unknown names fall back to General.
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "core" => FactCategory::Core,
            _ => FactCategory::General,
        }
    }
}

/// A raw, untagged dump of every fact set for one user (diagnostics only).
#[derive(Debug, Clone, Default)]
pub struct RawFactDump {
    pub core: Vec<String>,
    pub general: Vec<String>,
    pub legacy: Vec<String>,
}

impl RawFactDump {
    pub fn is_empty(&self) -> bool {
        self.core.is_empty() && self.general.is_empty() && self.legacy.is_empty()
    }
}

/// Per-user categorized fact sets backed by a [`KvStore`].
pub struct FactStore {
    kv: Arc<dyn KvStore>,
}

/// Legacy entries that are blank or serialization junk are dropped on read.
fn is_degenerate(fact: &str) -> bool {
    let trimmed = fact.trim();
    trimmed.is_empty() || trimmed == "{}" || trimmed == "[]"
}

impl FactStore {
    pub fn new(kv: Arc<dyn KvStore>) -> Self {
        Self { kv }
    }

    fn legacy_key(user_id: i64) -> String {
        format!("facts:{user_id}")
    }

    fn category_key(user_id: i64, category: FactCategory) -> String {
        format!("facts:{user_id}:{}", category.key_suffix())
    }

    /// Read all facts for a user, rendered with category tags.
    ///
    /// Core facts come first, then general — with legacy uncategorized
    /// entries merged into general, deduplicated against it, and degenerate
    /// legacy entries dropped.
    pub async fn get_facts(&self, user_id: i64) -> Result<Vec<String>, StoreError> {
        let core = self
            .kv
            .set_members(&Self::category_key(user_id, FactCategory::Core))
            .await?;
        let general = self
            .kv
            .set_members(&Self::category_key(user_id, FactCategory::General))
            .await?;
        let legacy = self.kv.set_members(&Self::legacy_key(user_id)).await?;

        let mut facts: Vec<String> = core
            .iter()
            .map(|f| format!("{} {f}", FactCategory::Core.tag()))
            .collect();

        let mut seen: Vec<&str> = Vec::new();
        for fact in general.iter().chain(legacy.iter().filter(|f| !is_degenerate(f))) {
            if seen.contains(&fact.as_str()) {
                continue;
            }
            seen.push(fact);
            facts.push(format!("{} {fact}", FactCategory::General.tag()));
        }

        debug!(user_id, count = facts.len(), "Loaded facts");
        Ok(facts)
    }

    /// Add a fact to the user's categorized set.
    ///
    /// Idempotent via set semantics. The store performs no content
    /// validation — callers reject empty or degenerate text before this.
    pub async fn save_fact(
        &self,
        user_id: i64,
        fact: &str,
        category: FactCategory,
    ) -> Result<(), StoreError> {
        self.kv
            .set_add(&Self::category_key(user_id, category), fact)
            .await
    }

    /// Dump every raw fact set for a user, for operator diagnostics.
    pub async fn raw_facts(&self, user_id: i64) -> Result<RawFactDump, StoreError> {
        Ok(RawFactDump {
            core: self
                .kv
                .set_members(&Self::category_key(user_id, FactCategory::Core))
                .await?,
            general: self
                .kv
                .set_members(&Self::category_key(user_id, FactCategory::General))
                .await?,
            legacy: self.kv.set_members(&Self::legacy_key(user_id)).await?,
        })
    }
}
