// SqliteHistory — rusqlite backend implementing the HistoryStore trait.
//
// The Connection is wrapped in tokio::sync::Mutex because Connection is
// !Sync. Trait methods lock the mutex, do synchronous rusqlite work, and
// return; the guard is never held across an .await.

use anyhow::Result;
use async_trait::async_trait;
use rusqlite::Connection;
use tokio::sync::Mutex;
use tracing::debug;

use super::models::{EntrySource, HistoryEntry};
use super::traits::HistoryStore;
use crate::profile::ProfileRecord;

/// Default number of entries kept.
pub const DEFAULT_CAPACITY: usize = 20;

pub struct SqliteHistory {
    conn: Mutex<Connection>,
    capacity: usize,
}

impl SqliteHistory {
    /// Wrap an already-opened connection whose tables exist.
    pub fn new(conn: Connection, capacity: usize) -> Result<Self> {
        if capacity == 0 {
            anyhow::bail!("History capacity must be at least 1");
        }
        Ok(Self {
            conn: Mutex::new(conn),
            capacity,
        })
    }
}

#[async_trait]
impl HistoryStore for SqliteHistory {
    async fn table_count(&self) -> Result<i64> {
        let conn = self.conn.lock().await;
        super::schema::table_count(&conn)
    }

    async fn save(&self, record: &ProfileRecord, source: EntrySource) -> Result<HistoryEntry> {
        record.validate()?;
        let entry = HistoryEntry::new(record.clone(), source);

        let mut conn = self.conn.lock().await;
        let tx = conn.transaction()?;
        super::queries::insert_entry(&tx, &entry)?;
        let pruned = super::queries::prune_to(&tx, self.capacity)?;
        tx.commit()?;

        debug!(
            id = entry.id.as_str(),
            username = entry.record.username.as_str(),
            pruned,
            "Saved history entry"
        );
        Ok(entry)
    }

    async fn list(&self) -> Result<Vec<HistoryEntry>> {
        let conn = self.conn.lock().await;
        super::queries::list_entries(&conn)
    }

    async fn get(&self, id: &str) -> Result<Option<HistoryEntry>> {
        let conn = self.conn.lock().await;
        super::queries::get_entry(&conn, id)
    }

    async fn find_by_username(&self, username: &str) -> Result<Vec<HistoryEntry>> {
        let conn = self.conn.lock().await;
        super::queries::entries_for_username(&conn, username)
    }

    async fn delete(&self, id: &str) -> Result<bool> {
        let conn = self.conn.lock().await;
        super::queries::delete_entry(&conn, id)
    }

    async fn clear(&self) -> Result<usize> {
        let conn = self.conn.lock().await;
        super::queries::clear(&conn)
    }

    async fn count(&self) -> Result<usize> {
        let conn = self.conn.lock().await;
        super::queries::count(&conn)
    }

    fn capacity(&self) -> usize {
        self.capacity
    }
}
