// History schema — table creation.
//
// A `schema_version` table records the layout the file was created with, so
// a later change to the history table can tell old files from new ones.

use anyhow::{Context, Result};
use rusqlite::Connection;

/// Layout version written by `create_tables`.
pub const SCHEMA_VERSION: i64 = 1;

/// Create all tables if they don't exist yet.
///
/// Idempotent — safe to call on every startup.
pub fn create_tables(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS schema_version (
            version INTEGER PRIMARY KEY,
            applied_at TEXT NOT NULL DEFAULT (datetime('now'))
        );

        -- Analyzed profiles, newest has the highest seq.
        -- Only the input record is stored; scores are recomputed on display
        -- so a change to the weights shows up in old entries too.
        CREATE TABLE IF NOT EXISTS profile_history (
            seq INTEGER PRIMARY KEY AUTOINCREMENT,
            id TEXT NOT NULL UNIQUE,            -- 16 hex chars
            username TEXT NOT NULL,
            platform TEXT NOT NULL,
            record_json TEXT NOT NULL,          -- serialized ProfileRecord
            saved_at TEXT NOT NULL,             -- RFC 3339, UTC
            source TEXT NOT NULL DEFAULT 'manual'  -- manual, lookup or batch
        );

        CREATE INDEX IF NOT EXISTS idx_history_username
            ON profile_history(username);
        ",
    )
    .context("Failed to create history tables")?;

    conn.execute(
        "INSERT OR IGNORE INTO schema_version (version) VALUES (?1)",
        [SCHEMA_VERSION],
    )?;

    Ok(())
}

/// Count user tables (shown by `veracity init`).
pub fn table_count(conn: &Connection) -> Result<i64> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name NOT LIKE 'sqlite_%'",
        [],
        |row| row.get(0),
    )?;
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_tables_is_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        create_tables(&conn).unwrap();
        create_tables(&conn).unwrap();
    }

    #[test]
    fn test_table_count() {
        let conn = Connection::open_in_memory().unwrap();
        create_tables(&conn).unwrap();
        // schema_version, profile_history
        assert_eq!(table_count(&conn).unwrap(), 2);
    }

    #[test]
    fn test_version_recorded_once() {
        let conn = Connection::open_in_memory().unwrap();
        create_tables(&conn).unwrap();
        create_tables(&conn).unwrap();

        let versions: Vec<i64> = conn
            .prepare("SELECT version FROM schema_version ORDER BY version")
            .unwrap()
            .query_map([], |row| row.get(0))
            .unwrap()
            .map(|r| r.unwrap())
            .collect();
        assert_eq!(versions, vec![SCHEMA_VERSION]);
    }

    #[test]
    fn test_source_column_created_with_table() {
        let conn = Connection::open_in_memory().unwrap();
        create_tables(&conn).unwrap();
        let columns: Vec<String> = conn
            .prepare("SELECT name FROM pragma_table_info('profile_history')")
            .unwrap()
            .query_map([], |row| row.get(0))
            .unwrap()
            .map(|r| r.unwrap())
            .collect();
        assert!(columns.iter().any(|c| c == "source"), "{columns:?}");
    }

    #[test]
    fn test_source_column_defaults_to_manual() {
        let conn = Connection::open_in_memory().unwrap();
        create_tables(&conn).unwrap();
        conn.execute(
            "INSERT INTO profile_history (id, username, platform, record_json, saved_at)
             VALUES ('abc', 'someone', 'twitter', '{}', '2026-01-01T00:00:00Z')",
            [],
        )
        .unwrap();
        let source: String = conn
            .query_row(
                "SELECT source FROM profile_history WHERE id = 'abc'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(source, "manual");
    }
}
