// History models — the rows that flow between the store and the CLI.

use rand::RngCore;
use serde::{Deserialize, Serialize};

use crate::profile::ProfileRecord;

/// Where a history entry came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntrySource {
    /// Typed in or loaded from a single file
    #[default]
    Manual,
    /// Fetched through a ProfileLookup
    Lookup,
    /// Part of a batch run
    Batch,
}

impl EntrySource {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntrySource::Manual => "manual",
            EntrySource::Lookup => "lookup",
            EntrySource::Batch => "batch",
        }
    }

    /// Parse a stored value. Unknown values read as manual, matching the
    /// column default.
    pub fn from_db(value: &str) -> Self {
        match value {
            "lookup" => EntrySource::Lookup,
            "batch" => EntrySource::Batch,
            _ => EntrySource::Manual,
        }
    }
}

impl std::fmt::Display for EntrySource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One saved analysis input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: String,
    pub record: ProfileRecord,
    pub source: EntrySource,
    /// RFC 3339 timestamp, UTC
    pub saved_at: String,
}

impl HistoryEntry {
    /// Wrap a record with a fresh identifier and the current time.
    pub fn new(record: ProfileRecord, source: EntrySource) -> Self {
        Self {
            id: generate_id(),
            record,
            source,
            saved_at: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Random 64-bit identifier, hex-encoded (16 chars).
pub fn generate_id() -> String {
    let mut bytes = [0u8; 8];
    rand::rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}
