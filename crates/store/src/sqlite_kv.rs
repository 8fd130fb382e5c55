//! SQLite key-value backend.
//!
//! Two tables:
//! - `kv_list` — ordered lists; the front of a list is the lowest `seq`
//! - `kv_set`  — membership sets; `(key, member)` is the primary key, so
//!   re-adding an existing member is a no-op at the storage layer

use async_trait::async_trait;
use liteclaw_core::error::StoreError;
use liteclaw_core::kv::KvStore;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::{Row, SqlitePool};
use std::str::FromStr;
use tracing::{debug, info};

/// A durable SQLite key-value backend.
pub struct SqliteKv {
    pool: SqlitePool,
}

impl SqliteKv {
    /// Create a new SQLite backend from a file path.
    ///
    /// The database and all tables/indexes are created automatically.
    pub async fn new(path: &str) -> Result<Self, StoreError> {
        let options = SqliteConnectOptions::from_str(path)
            .map_err(|e| StoreError::Storage(format!("Invalid SQLite path: {e}")))?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal);

        let pool = SqlitePoolOptions::new()
            .max_connections(4)
            .connect_with(options)
            .await
            .map_err(|e| StoreError::Storage(format!("Failed to open SQLite: {e}")))?;

        let backend = Self { pool };
        backend.run_migrations().await?;
        info!("SQLite KV backend initialized at {path}");
        Ok(backend)
    }

    /// Run schema migrations — creates the list and set tables.
    async fn run_migrations(&self) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS kv_list (
                key   TEXT NOT NULL,
                seq   INTEGER NOT NULL,
                value TEXT NOT NULL,
                PRIMARY KEY (key, seq)
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(|e| StoreError::MigrationFailed(format!("kv_list table: {e}")))?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS kv_set (
                key    TEXT NOT NULL,
                member TEXT NOT NULL,
                PRIMARY KEY (key, member)
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(|e| StoreError::MigrationFailed(format!("kv_set table: {e}")))?;

        debug!("SQLite migrations complete");
        Ok(())
    }

    /// Read all list values for `key`, front first.
    async fn list_all(&self, key: &str) -> Result<Vec<String>, StoreError> {
        let rows = sqlx::query("SELECT value FROM kv_list WHERE key = ?1 ORDER BY seq ASC")
            .bind(key)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| StoreError::QueryFailed(format!("list read: {e}")))?;

        rows.iter()
            .map(|row| {
                row.try_get::<String, _>("value")
                    .map_err(|e| StoreError::QueryFailed(format!("value column: {e}")))
            })
            .collect()
    }
}

/// Normalize a list position: negative positions count from the end.
fn normalize(pos: i64, len: usize) -> i64 {
    if pos < 0 { len as i64 + pos } else { pos }
}

#[async_trait]
impl KvStore for SqliteKv {
    fn name(&self) -> &str { "sqlite" }

    async fn list_push_front(&self, key: &str, value: &str) -> Result<(), StoreError> {
        // Front = lowest seq. The aggregate subquery always yields one row,
        // even for an empty list. Concurrent writers on different pool
        // connections can compute the same next seq and collide on the
        // (key, seq) primary key; retry until the insert lands.
        for _ in 0..8 {
            let result = sqlx::query(
                r#"
                INSERT INTO kv_list (key, seq, value)
                SELECT ?1, COALESCE(MIN(seq), 1) - 1, ?2 FROM kv_list WHERE key = ?1
                "#,
            )
            .bind(key)
            .bind(value)
            .execute(&self.pool)
            .await;

            match result {
                Ok(_) => return Ok(()),
                Err(sqlx::Error::Database(db)) if db.is_unique_violation() => continue,
                Err(e) => return Err(StoreError::QueryFailed(format!("list push: {e}"))),
            }
        }
        Err(StoreError::QueryFailed(
            "list push: seq contention did not resolve".into(),
        ))
    }

    async fn list_range(&self, key: &str, start: i64, stop: i64) -> Result<Vec<String>, StoreError> {
        let all = self.list_all(key).await?;
        let len = all.len();
        let start = normalize(start, len).max(0) as usize;
        let stop = normalize(stop, len).min(len as i64 - 1);
        if stop < 0 || start > stop as usize {
            return Ok(Vec::new());
        }
        Ok(all[start..=stop as usize].to_vec())
    }

    async fn list_trim(&self, key: &str, start: i64, stop: i64) -> Result<(), StoreError> {
        let rows = sqlx::query("SELECT seq FROM kv_list WHERE key = ?1 ORDER BY seq ASC")
            .bind(key)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| StoreError::QueryFailed(format!("trim read: {e}")))?;

        let seqs: Vec<i64> = rows
            .iter()
            .map(|row| {
                row.try_get::<i64, _>("seq")
                    .map_err(|e| StoreError::QueryFailed(format!("seq column: {e}")))
            })
            .collect::<Result<_, _>>()?;

        let len = seqs.len();
        let start_pos = normalize(start, len).max(0);
        let stop_pos = normalize(stop, len).min(len as i64 - 1);

        if stop_pos < 0 || start_pos > stop_pos {
            // Empty keep-window: drop the whole list.
            sqlx::query("DELETE FROM kv_list WHERE key = ?1")
                .bind(key)
                .execute(&self.pool)
                .await
                .map_err(|e| StoreError::QueryFailed(format!("trim delete: {e}")))?;
            return Ok(());
        }

        let keep_min = seqs[start_pos as usize];
        let keep_max = seqs[stop_pos as usize];
        sqlx::query("DELETE FROM kv_list WHERE key = ?1 AND (seq < ?2 OR seq > ?3)")
            .bind(key)
            .bind(keep_min)
            .bind(keep_max)
            .execute(&self.pool)
            .await
            .map_err(|e| StoreError::QueryFailed(format!("trim delete: {e}")))?;
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM kv_list WHERE key = ?1")
            .bind(key)
            .execute(&self.pool)
            .await
            .map_err(|e| StoreError::QueryFailed(format!("list delete: {e}")))?;
        sqlx::query("DELETE FROM kv_set WHERE key = ?1")
            .bind(key)
            .execute(&self.pool)
            .await
            .map_err(|e| StoreError::QueryFailed(format!("set delete: {e}")))?;
        Ok(())
    }

    async fn set_add(&self, key: &str, member: &str) -> Result<(), StoreError> {
        sqlx::query("INSERT OR IGNORE INTO kv_set (key, member) VALUES (?1, ?2)")
            .bind(key)
            .bind(member)
            .execute(&self.pool)
            .await
            .map_err(|e| StoreError::QueryFailed(format!("set add: {e}")))?;
        Ok(())
    }

    async fn set_members(&self, key: &str) -> Result<Vec<String>, StoreError> {
        let rows = sqlx::query("SELECT member FROM kv_set WHERE key = ?1")
            .bind(key)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| StoreError::QueryFailed(format!("set read: {e}")))?;

        rows.iter()
            .map(|row| {
                row.try_get::<String, _>("member")
                    .map_err(|e| StoreError::QueryFailed(format!("member column: {e}")))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Each test gets its own database file; a pooled in-memory database
    // would give every pool connection a separate empty database.
    async fn open() -> (SqliteKv, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test.db");
        let kv = SqliteKv::new(path.to_str().unwrap()).await.unwrap();
        (kv, dir)
    }

    #[tokio::test]
    async fn push_front_orders_newest_first() {
        let (kv, _dir) = open().await;
        kv.list_push_front("l", "first").await.unwrap();
        kv.list_push_front("l", "second").await.unwrap();
        kv.list_push_front("l", "third").await.unwrap();

        let range = kv.list_range("l", 0, -1).await.unwrap();
        assert_eq!(range, vec!["third", "second", "first"]);
    }

    #[tokio::test]
    async fn range_respects_window() {
        let (kv, _dir) = open().await;
        for i in 0..5 {
            kv.list_push_front("l", &i.to_string()).await.unwrap();
        }

        let range = kv.list_range("l", 1, 3).await.unwrap();
        assert_eq!(range, vec!["3", "2", "1"]);
    }

    #[tokio::test]
    async fn trim_keeps_window() {
        let (kv, _dir) = open().await;
        for i in 0..5 {
            kv.list_push_front("l", &i.to_string()).await.unwrap();
        }
        kv.list_trim("l", 0, 1).await.unwrap();

        let range = kv.list_range("l", 0, -1).await.unwrap();
        assert_eq!(range, vec!["4", "3"]);
    }

    #[tokio::test]
    async fn concurrent_pushes_to_one_key_all_land() {
        // Writers on different pool connections can compute the same next
        // seq; every push must still succeed and nothing may be lost.
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test.db");
        let kv = std::sync::Arc::new(SqliteKv::new(path.to_str().unwrap()).await.unwrap());

        let mut handles = Vec::new();
        for i in 0..16 {
            let kv = kv.clone();
            handles.push(tokio::spawn(async move {
                kv.list_push_front("h", &format!("msg {i}")).await
            }));
        }
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        let all = kv.list_range("h", 0, -1).await.unwrap();
        assert_eq!(all.len(), 16);
    }

    #[tokio::test]
    async fn set_add_is_idempotent() {
        let (kv, _dir) = open().await;
        kv.set_add("s", "likes coffee").await.unwrap();
        kv.set_add("s", "likes coffee").await.unwrap();

        let members = kv.set_members("s").await.unwrap();
        assert_eq!(members, vec!["likes coffee"]);
    }

    #[tokio::test]
    async fn delete_clears_key() {
        let (kv, _dir) = open().await;
        kv.list_push_front("k", "v").await.unwrap();
        kv.set_add("k", "m").await.unwrap();
        kv.delete("k").await.unwrap();

        assert!(kv.list_range("k", 0, -1).await.unwrap().is_empty());
        assert!(kv.set_members("k").await.unwrap().is_empty());
    }
}
