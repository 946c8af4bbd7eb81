//! # Persisted Record Envelope
//!
//! Wraps a payload with the metadata the store needs to apply its retention
//! policy: when it was saved and which schema wrote it.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Schema version stamped onto every record written by this build.
///
/// Reserved for forward compatibility; no migration logic reads it yet.
pub const SCHEMA_VERSION: u32 = 1;

/// A stored payload plus the metadata needed for retention checks.
///
/// Readers treat a record older than the retention window as absent; the
/// store purges such records lazily on the read that discovers them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedRecord<T> {
    /// The wrapped value.
    pub payload: T,

    /// When the record was written.
    pub saved_at: DateTime<Utc>,

    /// Schema version of the writer.
    pub schema_version: u32,
}

impl<T> PersistedRecord<T> {
    /// Wraps `payload` in a fresh envelope stamped at `now`.
    pub fn new(payload: T, now: DateTime<Utc>) -> Self {
        PersistedRecord {
            payload,
            saved_at: now,
            schema_version: SCHEMA_VERSION,
        }
    }

    /// Whether the record has outlived `retention` as of `now`.
    ///
    /// A record exactly at the boundary is still live; expiry needs the
    /// elapsed time to exceed the window.
    pub fn is_expired(&self, retention: Duration, now: DateTime<Utc>) -> bool {
        now.signed_duration_since(self.saved_at) > retention
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
