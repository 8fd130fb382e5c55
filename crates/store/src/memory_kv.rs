//! In-memory backend — useful for testing and ephemeral sessions.

use async_trait::async_trait;
use liteclaw_core::error::StoreError;
use liteclaw_core::kv::KvStore;
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Default)]
struct Inner {
    lists: HashMap<String, VecDeque<String>>,
    sets: HashMap<String, Vec<String>>,
}

/// An in-memory key-value backend.
/// Useful for testing and sessions where persistence isn't needed.
pub struct MemoryKv {
    inner: Arc<RwLock<Inner>>,
}

impl MemoryKv {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(Inner::default())),
        }
    }
}

impl Default for MemoryKv {
    fn default() -> Self {
        Self::new()
    }
}

/// Normalize a list position: negative positions count from the end.
fn normalize(pos: i64, len: usize) -> i64 {
    if pos < 0 { len as i64 + pos } else { pos }
}

#[async_trait]
impl KvStore for MemoryKv {
    fn name(&self) -> &str { "memory" }

    async fn list_push_front(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut inner = self.inner.write().await;
        inner
            .lists
            .entry(key.to_string())
            .or_default()
            .push_front(value.to_string());
        Ok(())
    }

    async fn list_range(&self, key: &str, start: i64, stop: i64) -> Result<Vec<String>, StoreError> {
        let inner = self.inner.read().await;
        let Some(list) = inner.lists.get(key) else {
            return Ok(Vec::new());
        };

        let len = list.len();
        let start = normalize(start, len).max(0) as usize;
        let stop = normalize(stop, len).min(len as i64 - 1);
        if stop < 0 || start > stop as usize {
            return Ok(Vec::new());
        }

        Ok(list.iter().skip(start).take(stop as usize - start + 1).cloned().collect())
    }

    async fn list_trim(&self, key: &str, start: i64, stop: i64) -> Result<(), StoreError> {
        let mut inner = self.inner.write().await;
        let Some(list) = inner.lists.get_mut(key) else {
            return Ok(());
        };

        let len = list.len();
        let start = normalize(start, len).max(0) as usize;
        let stop = normalize(stop, len).min(len as i64 - 1);
        if stop < 0 || start > stop as usize {
            list.clear();
            return Ok(());
        }

        *list = list
            .iter()
            .skip(start)
            .take(stop as usize - start + 1)
            .cloned()
            .collect();
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), StoreError> {
        let mut inner = self.inner.write().await;
        inner.lists.remove(key);
        inner.sets.remove(key);
        Ok(())
    }

    async fn set_add(&self, key: &str, member: &str) -> Result<(), StoreError> {
        let mut inner = self.inner.write().await;
        let set = inner.sets.entry(key.to_string()).or_default();
        if !set.iter().any(|m| m == member) {
            set.push(member.to_string());
        }
        Ok(())
    }

    async fn set_members(&self, key: &str) -> Result<Vec<String>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner.sets.get(key).cloned().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn push_front_orders_newest_first() {
        let kv = MemoryKv::new();
        kv.list_push_front("l", "first").await.unwrap();
        kv.list_push_front("l", "second").await.unwrap();

        let range = kv.list_range("l", 0, -1).await.unwrap();
        assert_eq!(range, vec!["second", "first"]);
    }

    #[tokio::test]
    async fn range_on_missing_key_is_empty() {
        let kv = MemoryKv::new();
        assert!(kv.list_range("nope", 0, -1).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn trim_keeps_window() {
        let kv = MemoryKv::new();
        for i in 0..5 {
            kv.list_push_front("l", &i.to_string()).await.unwrap();
        }
        // List is now [4, 3, 2, 1, 0]; keep the first three.
        kv.list_trim("l", 0, 2).await.unwrap();

        let range = kv.list_range("l", 0, -1).await.unwrap();
        assert_eq!(range, vec!["4", "3", "2"]);
    }

    #[tokio::test]
    async fn set_add_is_idempotent() {
        let kv = MemoryKv::new();
        kv.set_add("s", "likes coffee").await.unwrap();
        kv.set_add("s", "likes coffee").await.unwrap();

        let members = kv.set_members("s").await.unwrap();
        assert_eq!(members.len(), 1);
    }

    #[tokio::test]
    async fn delete_removes_both_shapes() {
        let kv = MemoryKv::new();
        kv.list_push_front("k", "v").await.unwrap();
        kv.set_add("k", "m").await.unwrap();
        kv.delete("k").await.unwrap();

        assert!(kv.list_range("k", 0, -1).await.unwrap().is_empty());
        assert!(kv.set_members("k").await.unwrap().is_empty());
    }
}
