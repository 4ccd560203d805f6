// History queries — every SQL statement the history store runs.
//
// Plain functions over a Connection so they work equally well on a
// Transaction (which derefs to Connection) and in tests against an
// in-memory database.

use anyhow::{Context, Result};
use rusqlite::{params, Connection, OptionalExtension, Row};

use super::models::{EntrySource, HistoryEntry};
use crate::profile::ProfileRecord;

const SELECT_COLUMNS: &str = "SELECT id, record_json, source, saved_at FROM profile_history";

fn entry_from_row(row: &Row<'_>) -> rusqlite::Result<HistoryEntry> {
    let record_json: String = row.get(1)?;
    let record: ProfileRecord = serde_json::from_str(&record_json).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(1, rusqlite::types::Type::Text, Box::new(e))
    })?;
    let source: String = row.get(2)?;
    Ok(HistoryEntry {
        id: row.get(0)?,
        record,
        source: EntrySource::from_db(&source),
        saved_at: row.get(3)?,
    })
}

/// Insert a new entry. It becomes the most recent one.
pub fn insert_entry(conn: &Connection, entry: &HistoryEntry) -> Result<()> {
    let record_json = serde_json::to_string(&entry.record)?;
    conn.execute(
        "INSERT INTO profile_history (id, username, platform, record_json, saved_at, source)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            entry.id,
            entry.record.username,
            entry.record.platform.as_str(),
            record_json,
            entry.saved_at,
            entry.source.as_str(),
        ],
    )?;
    Ok(())
}

/// Delete everything but the `keep` most recent entries.
/// Returns how many rows were removed.
pub fn prune_to(conn: &Connection, keep: usize) -> Result<usize> {
    // A negative LIMIT means "no limit" to SQLite, so never let it wrap.
    let keep = i64::try_from(keep)
        .with_context(|| format!("History limit {keep} does not fit an SQLite LIMIT"))?;
    let removed = conn.execute(
        "DELETE FROM profile_history
         WHERE seq NOT IN (
            SELECT seq FROM profile_history ORDER BY seq DESC LIMIT ?1
         )",
        params![keep],
    )?;
    Ok(removed)
}

/// All entries, most recent first.
pub fn list_entries(conn: &Connection) -> Result<Vec<HistoryEntry>> {
    let mut stmt = conn.prepare(&format!("{SELECT_COLUMNS} ORDER BY seq DESC"))?;
    let rows = stmt.query_map([], entry_from_row)?;
    let mut entries = Vec::new();
    for row in rows {
        entries.push(row?);
    }
    Ok(entries)
}

/// Look up an entry by its identifier.
pub fn get_entry(conn: &Connection, id: &str) -> Result<Option<HistoryEntry>> {
    let mut stmt = conn.prepare(&format!("{SELECT_COLUMNS} WHERE id = ?1"))?;
    let entry = stmt.query_row(params![id], entry_from_row).optional()?;
    Ok(entry)
}

/// Entries for one username (case-insensitive), most recent first.
pub fn entries_for_username(conn: &Connection, username: &str) -> Result<Vec<HistoryEntry>> {
    let mut stmt = conn.prepare(&format!(
        "{SELECT_COLUMNS} WHERE username = ?1 COLLATE NOCASE ORDER BY seq DESC"
    ))?;
    let rows = stmt.query_map(params![username], entry_from_row)?;
    let mut entries = Vec::new();
    for row in rows {
        entries.push(row?);
    }
    Ok(entries)
}

/// Remove one entry. Returns false if no entry had that id.
pub fn delete_entry(conn: &Connection, id: &str) -> Result<bool> {
    let removed = conn.execute("DELETE FROM profile_history WHERE id = ?1", params![id])?;
    Ok(removed > 0)
}

/// Remove every entry. Returns how many were removed.
pub fn clear(conn: &Connection) -> Result<usize> {
    let removed = conn.execute("DELETE FROM profile_history", [])?;
    Ok(removed)
}

pub fn count(conn: &Connection) -> Result<usize> {
    let count: i64 = conn.query_row("SELECT COUNT(*) FROM profile_history", [], |row| row.get(0))?;
    Ok(count as usize)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::schema::create_tables;
    use crate::profile::{Platform, ProfilePicture};

    fn conn() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        create_tables(&conn).unwrap();
        conn
    }

    fn entry(username: &str) -> HistoryEntry {
        HistoryEntry::new(
            ProfileRecord {
                username: username.to_string(),
                display_name: String::new(),
                bio: String::new(),
                follower_count: 1,
                following_count: 2,
                post_count: 3,
                account_age_months: 4,
                profile_picture: ProfilePicture::Default,
                platform: Platform::Twitter,
            },
            EntrySource::Manual,
        )
    }

    #[test]
    fn test_insert_and_get_round_trip() {
        let conn = conn();
        let e = entry("alpha");
        insert_entry(&conn, &e).unwrap();
        let loaded = get_entry(&conn, &e.id).unwrap().unwrap();
        assert_eq!(loaded, e);
        assert!(get_entry(&conn, "missing").unwrap().is_none());
    }

    #[test]
    fn test_list_is_newest_first() {
        let conn = conn();
        for name in ["a", "b", "c"] {
            insert_entry(&conn, &entry(name)).unwrap();
        }
        let names: Vec<String> = list_entries(&conn)
            .unwrap()
            .into_iter()
            .map(|e| e.record.username)
            .collect();
        assert_eq!(names, vec!["c", "b", "a"]);
    }

    #[test]
    fn test_prune_keeps_most_recent() {
        let conn = conn();
        for i in 0..5 {
            insert_entry(&conn, &entry(&format!("user{i}"))).unwrap();
        }
        assert_eq!(prune_to(&conn, 2).unwrap(), 3);
        let names: Vec<String> = list_entries(&conn)
            .unwrap()
            .into_iter()
            .map(|e| e.record.username)
            .collect();
        assert_eq!(names, vec!["user4", "user3"]);
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn test_prune_rejects_limit_sqlite_would_treat_as_unbounded() {
        let conn = conn();
        for i in 0..3 {
            insert_entry(&conn, &entry(&format!("user{i}"))).unwrap();
        }
        assert!(prune_to(&conn, usize::MAX).is_err());
        assert_eq!(count(&conn).unwrap(), 3);
        assert_eq!(prune_to(&conn, i64::MAX as usize).unwrap(), 0);
    }

    #[test]
    fn test_username_lookup_ignores_case() {
        let conn = conn();
        insert_entry(&conn, &entry("Mixed_Case")).unwrap();
        insert_entry(&conn, &entry("other")).unwrap();
        assert_eq!(entries_for_username(&conn, "mixed_case").unwrap().len(), 1);
    }

    #[test]
    fn test_corrupt_record_json_is_an_error() {
        let conn = conn();
        conn.execute(
            "INSERT INTO profile_history (id, username, platform, record_json, saved_at)
             VALUES ('bad', 'x', 'twitter', 'not json', '2026-01-01T00:00:00Z')",
            [],
        )
        .unwrap();
        assert!(get_entry(&conn, "bad").is_err());
    }

    #[test]
    fn test_delete_and_clear() {
        let conn = conn();
        let e = entry("gone");
        insert_entry(&conn, &e).unwrap();
        insert_entry(&conn, &entry("stays")).unwrap();
        assert!(delete_entry(&conn, &e.id).unwrap());
        assert!(!delete_entry(&conn, &e.id).unwrap());
        assert_eq!(count(&conn).unwrap(), 1);
        assert_eq!(clear(&conn).unwrap(), 1);
        assert_eq!(count(&conn).unwrap(), 0);
    }
}
