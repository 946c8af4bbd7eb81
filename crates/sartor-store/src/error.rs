//! # Storage Error Types
//!
//! Error types for store operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  SQLite error (rusqlite::Error) / JSON error (serde_json::Error)       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StoreError (this module) ← categorized, carried by try_* methods      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Public facade (get/set/remove) ← logged at warn, then swallowed       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Caller sees None / no-op, never an error                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

/// Storage operation errors.
///
/// Only [`PersistentStore::open`] surfaces these to callers; everything else
/// degrades to "the key is absent" at the facade.
///
/// [`PersistentStore::open`]: crate::store::PersistentStore::open
#[derive(Debug, Error)]
pub enum StoreError {
    /// The database could not be opened or its schema initialized.
    #[error("Store open failed: {0}")]
    Open(String),

    /// A query against the records table failed.
    #[error("Query failed: {0}")]
    Query(String),

    /// A value could not be (de)serialized as JSON.
    #[error("Serialization failed: {0}")]
    Serde(#[from] serde_json::Error),

    /// The connection lock was poisoned by a panicking writer.
    #[error("Store lock poisoned")]
    Poisoned,
}

/// Convert rusqlite errors to StoreError.
impl From<rusqlite::Error> for StoreError {
    fn from(err: rusqlite::Error) -> Self {
        StoreError::Query(err.to_string())
    }
}

/// Result type for fallible store operations.
pub type StoreResult<T> = Result<T, StoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
