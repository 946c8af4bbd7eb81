//! # Persistent Store
//!
//! A durable, namespaced key-value store over SQLite.
//!
//! ## Never-Throw Facade
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Store Access Layers                                  │
//! │                                                                         │
//! │  Engine code                                                           │
//! │       │ get(key) / set(key, value) / remove(key)                       │
//! │       ▼                                                                 │
//! │  Facade: catches every fault, logs at warn, degrades to absent/no-op   │
//! │       │ try_get / try_set / try_remove                                 │
//! │       ▼                                                                 │
//! │  Fallible core: StoreResult, typed StoreError                          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite `records` table (key TEXT PRIMARY KEY, value TEXT)             │
//! │                                                                         │
//! │  A corrupted row, an unavailable database, or a full disk all look     │
//! │  the same to callers: the key is absent and the write did not stick.   │
//! │  There is no retry; unsaved progress can be lost.                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Writes are synchronous: a `set` has hit SQLite before the call returns.
//! Nothing here suspends or schedules work; record expiry is a calendar
//! comparison made on read, not a timer.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use chrono::{Duration, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::{StoreError, StoreResult};
use crate::record::PersistedRecord;

/// Default retention window for timestamped records, in days.
pub const DEFAULT_RETENTION_DAYS: i64 = 7;

// =============================================================================
// Configuration
// =============================================================================

/// Store configuration.
///
/// ## Example
/// ```rust,ignore
/// let config = StoreConfig::new("./data/sartor.db").retention_days(7);
/// let store = PersistentStore::open(config)?;
/// ```
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Path to the SQLite database file.
    pub database_path: PathBuf,

    /// How long a timestamped record stays readable after its last save.
    pub retention: Duration,
}

impl StoreConfig {
    /// Creates a configuration for a file-backed store at the given path.
    /// The file is created on open if it doesn't exist.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        StoreConfig {
            database_path: path.into(),
            retention: Duration::days(DEFAULT_RETENTION_DAYS),
        }
    }

    /// Creates an in-memory store configuration (for testing).
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let store = PersistentStore::open(StoreConfig::in_memory())?;
    /// // Store is isolated and vanishes with the handle, perfect for tests
    /// ```
    pub fn in_memory() -> Self {
        StoreConfig {
            database_path: PathBuf::from(":memory:"),
            retention: Duration::days(DEFAULT_RETENTION_DAYS),
        }
    }

    /// Sets the retention window in days.
    pub fn retention_days(mut self, days: i64) -> Self {
        self.retention = Duration::days(days);
        self
    }
}

// =============================================================================
// Persistent Store
// =============================================================================

/// Durable key-value record storage.
///
/// The handle is cheap to clone; clones share one connection. All access
/// goes through an internal mutex, and every public read/write/delete call
/// completes synchronously before returning.
///
/// After a successful [`open`], the facade methods ([`get`], [`set`],
/// [`remove`], [`get_record`], [`set_record`]) never fail from the caller's
/// point of view: storage faults are logged and degrade to "absent".
///
/// [`open`]: PersistentStore::open
/// [`get`]: PersistentStore::get
/// [`set`]: PersistentStore::set
/// [`remove`]: PersistentStore::remove
/// [`get_record`]: PersistentStore::get_record
/// [`set_record`]: PersistentStore::set_record
#[derive(Debug, Clone)]
pub struct PersistentStore {
    conn: Arc<Mutex<Connection>>,
    retention: Duration,
}

impl PersistentStore {
    /// Opens (and if needed creates) the store described by `config`.
    ///
    /// ## What This Does
    /// 1. Opens the SQLite database (file-backed or in-memory)
    /// 2. Switches file-backed databases to WAL journal mode
    /// 3. Creates the `records` table if it doesn't exist
    pub fn open(config: StoreConfig) -> StoreResult<Self> {
        info!(
            path = %config.database_path.display(),
            "Opening persistent store"
        );

        let in_memory = config.database_path.as_os_str() == ":memory:";
        let conn = if in_memory {
            Connection::open_in_memory()
        } else {
            Connection::open(&config.database_path)
        }
        .map_err(|e| StoreError::Open(e.to_string()))?;

        if !in_memory {
            // WAL keeps reads from blocking the synchronous writes
            conn.pragma_update(None, "journal_mode", "WAL")
                .map_err(|e| StoreError::Open(e.to_string()))?;
        }

        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS records (
                key        TEXT PRIMARY KEY,
                value      TEXT NOT NULL,
                updated_at TEXT NOT NULL
            );",
        )
        .map_err(|e| StoreError::Open(e.to_string()))?;

        Ok(PersistentStore {
            conn: Arc::new(Mutex::new(conn)),
            retention: config.retention,
        })
    }

    /// The retention window applied to timestamped records.
    pub fn retention(&self) -> Duration {
        self.retention
    }

    // -------------------------------------------------------------------------
    // Never-throw facade
    // -------------------------------------------------------------------------

    /// Reads and parses the JSON value stored under `key`.
    ///
    /// Any failure (missing key, corrupted JSON, unavailable database)
    /// reads as `None`. Callers treat `None` as the expected absent case.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        match self.try_get(key) {
            Ok(value) => value,
            Err(e) => {
                warn!(key = %key, error = %e, "Storage read failed; treating key as absent");
                None
            }
        }
    }

    /// Serializes `value` and writes it under `key`.
    ///
    /// A failed write is logged and dropped; there is no retry and no error
    /// to the caller.
    pub fn set<T: Serialize>(&self, key: &str, value: &T) {
        if let Err(e) = self.try_set(key, value) {
            warn!(key = %key, error = %e, "Storage write failed; value not persisted");
        }
    }

    /// Deletes the value stored under `key`, if any.
    pub fn remove(&self, key: &str) {
        if let Err(e) = self.try_remove(key) {
            warn!(key = %key, error = %e, "Storage delete failed");
        }
    }

    /// Reads a timestamped record, applying the retention window.
    ///
    /// ## Behavior
    /// - Live record → returned as-is
    /// - Record older than the retention window → purged, reported absent
    /// - Missing/corrupt record → absent
    ///
    /// Expiry is evaluated on every read; nothing is scheduled.
    pub fn get_record<T: DeserializeOwned>(&self, key: &str) -> Option<PersistedRecord<T>> {
        let record: PersistedRecord<T> = self.get(key)?;
        if record.is_expired(self.retention, Utc::now()) {
            debug!(key = %key, saved_at = %record.saved_at, "Record expired; purging");
            self.remove(key);
            return None;
        }
        Some(record)
    }

    /// Writes `payload` under `key`, stamped with the current time and the
    /// writer's schema version.
    pub fn set_record<T: Serialize>(&self, key: &str, payload: &T) {
        let record = PersistedRecord::new(payload, Utc::now());
        self.set(key, &record);
    }

    // -------------------------------------------------------------------------
    // Fallible core
    // -------------------------------------------------------------------------

    /// Fallible read. The facade's [`get`] wraps this and swallows the error.
    ///
    /// [`get`]: PersistentStore::get
    pub fn try_get<T: DeserializeOwned>(&self, key: &str) -> StoreResult<Option<T>> {
        let conn = self.conn.lock().map_err(|_| StoreError::Poisoned)?;
        let raw: Option<String> = conn
            .query_row(
                "SELECT value FROM records WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()?;

        match raw {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    /// Fallible write. The facade's [`set`] wraps this and swallows the error.
    ///
    /// [`set`]: PersistentStore::set
    pub fn try_set<T: Serialize>(&self, key: &str, value: &T) -> StoreResult<()> {
        let json = serde_json::to_string(value)?;
        let conn = self.conn.lock().map_err(|_| StoreError::Poisoned)?;
        conn.execute(
            "INSERT INTO records (key, value, updated_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at",
            params![key, json, Utc::now().to_rfc3339()],
        )?;
        Ok(())
    }

    /// Fallible delete. The facade's [`remove`] wraps this and swallows the
    /// error.
    ///
    /// [`remove`]: PersistentStore::remove
    pub fn try_remove(&self, key: &str) -> StoreResult<()> {
        let conn = self.conn.lock().map_err(|_| StoreError::Poisoned)?;
        conn.execute("DELETE FROM records WHERE key = ?1", params![key])?;
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Sample {
        name: String,
        count: u32,
    }

    fn memory_store() -> PersistentStore {
        PersistentStore::open(StoreConfig::in_memory()).unwrap()
    }

    #[test]
    fn test_set_get_round_trip() {
        let store = memory_store();
        let value = Sample {
            name: "linen".to_string(),
            count: 3,
        };

        store.set("sample", &value);
        assert_eq!(store.get::<Sample>("sample"), Some(value));
    }

    #[test]
    fn test_missing_key_reads_absent() {
        let store = memory_store();
        assert_eq!(store.get::<Sample>("nope"), None);
    }

    #[test]
    fn test_corrupt_value_reads_absent() {
        let store = memory_store();
        // A perfectly valid JSON string that is not a Sample
        store.set("sample", &"garbage");

        assert_eq!(store.get::<Sample>("sample"), None);
    }

    #[test]
    fn test_set_overwrites() {
        let store = memory_store();
        store.set("n", &1_i64);
        store.set("n", &2_i64);

        assert_eq!(store.get::<i64>("n"), Some(2));
    }

    #[test]
    fn test_remove_is_idempotent() {
        let store = memory_store();
        store.set("n", &1_i64);

        store.remove("n");
        assert_eq!(store.get::<i64>("n"), None);

        // Removing an absent key is a no-op
        store.remove("n");
    }

    #[test]
    fn test_record_round_trip() {
        let store = memory_store();
        let value = Sample {
            name: "tweed".to_string(),
            count: 1,
        };

        store.set_record("record", &value);
        let record = store.get_record::<Sample>("record").unwrap();

        assert_eq!(record.payload, value);
        assert_eq!(record.schema_version, crate::record::SCHEMA_VERSION);
    }

    #[test]
    fn test_expired_record_is_absent_and_purged() {
        let store = memory_store();
        let stale = PersistedRecord::new(
            Sample {
                name: "stale".to_string(),
                count: 0,
            },
            Utc::now() - Duration::days(8),
        );
        store.set("record", &stale);

        assert!(store.get_record::<Sample>("record").is_none());
        // Lazy deletion: the read that discovered expiry removed the row
        assert_eq!(
            store.try_get::<serde_json::Value>("record").unwrap(),
            None
        );
    }

    #[test]
    fn test_custom_retention_window() {
        let store =
            PersistentStore::open(StoreConfig::in_memory().retention_days(1)).unwrap();
        let stale = PersistedRecord::new(7_i64, Utc::now() - Duration::days(2));
        store.set("record", &stale);

        assert!(store.get_record::<i64>("record").is_none());
    }

    #[test]
    fn test_file_backed_store_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sartor.db");

        {
            let store = PersistentStore::open(StoreConfig::new(&path)).unwrap();
            store.set("n", &41_i64);
        }

        let store = PersistentStore::open(StoreConfig::new(&path)).unwrap();
        assert_eq!(store.get::<i64>("n"), Some(41));
    }
}
