// HistoryStore trait — backend-agnostic async interface for saved analyses.
//
// Implementors: SqliteHistory (wraps rusqlite). Async so a future backend
// with a native async driver fits behind the same interface.

use anyhow::Result;
use async_trait::async_trait;

use super::models::{EntrySource, HistoryEntry};
use crate::profile::ProfileRecord;

#[async_trait]
pub trait HistoryStore: Send + Sync {
    /// Count the number of user-created tables.
    async fn table_count(&self) -> Result<i64>;

    /// Save a record as the most recent entry, dropping the oldest entries
    /// beyond the store's capacity.
    async fn save(&self, record: &ProfileRecord, source: EntrySource) -> Result<HistoryEntry>;

    /// All entries, most recent first.
    async fn list(&self) -> Result<Vec<HistoryEntry>>;

    async fn get(&self, id: &str) -> Result<Option<HistoryEntry>>;

    /// Entries for one username, most recent first.
    async fn find_by_username(&self, username: &str) -> Result<Vec<HistoryEntry>>;

    /// Remove one entry. Returns false when the id is unknown.
    async fn delete(&self, id: &str) -> Result<bool>;

    /// Remove every entry and return how many there were.
    async fn clear(&self) -> Result<usize>;

    async fn count(&self) -> Result<usize>;

    /// Maximum number of entries kept.
    fn capacity(&self) -> usize;
}
