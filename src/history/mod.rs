// Analysis history — SQLite storage for previously analyzed profiles.
//
// rusqlite with the "bundled" feature, so there's no system SQLite
// dependency. The file lives wherever VERACITY_DB_PATH points.

pub mod models;
pub mod queries;
pub mod schema;
pub mod sqlite;
pub mod traits;

pub use models::{EntrySource, HistoryEntry};
pub use sqlite::{SqliteHistory, DEFAULT_CAPACITY};
pub use traits::HistoryStore;

use anyhow::{Context, Result};
use rusqlite::Connection;
use std::path::Path;
use std::sync::Arc;

/// Open (or create) the history database and run migrations.
pub fn initialize(db_path: &str) -> Result<Connection> {
    if let Some(parent) = Path::new(db_path).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory for history: {}", db_path))?;
        }
    }

    let conn = Connection::open(db_path)
        .with_context(|| format!("Failed to open history database at {}", db_path))?;

    conn.pragma_update(None, "journal_mode", "WAL")?;

    schema::create_tables(&conn)?;

    Ok(conn)
}

/// Open the history store, creating it on first use.
///
/// Unlike a cache that needs an explicit `init`, history is a convenience:
/// the first analysis shouldn't fail because nobody ran `veracity init`.
pub fn open_store(db_path: &str, capacity: usize) -> Result<Arc<dyn HistoryStore>> {
    let conn = initialize(db_path)?;
    Ok(Arc::new(SqliteHistory::new(conn, capacity)?))
}
