//! # sartor-store: Persistence Layer for Sartor
//!
//! This crate provides durable storage for the Sartor order engine.
//! It keeps namespaced JSON records in a local SQLite database, written
//! synchronously so every save completes before the caller's function
//! returns.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Sartor Data Flow                                 │
//! │                                                                         │
//! │  Engine call (cart save, draft save)                                   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   sartor-store (THIS CRATE)                     │   │
//! │  │                                                                 │   │
//! │  │   ┌────────────────┐   ┌────────────────┐   ┌──────────────┐  │   │
//! │  │   │ PersistentStore│   │ PersistedRecord│   │  StoreError  │  │   │
//! │  │   │  (store.rs)    │   │  (record.rs)   │   │  (error.rs)  │  │   │
//! │  │   │                │   │                │   │              │  │   │
//! │  │   │ get/set/remove │◄──│ saved_at +     │   │ swallowed at │  │   │
//! │  │   │ never throw    │   │ retention      │   │ the facade   │  │   │
//! │  │   └────────────────┘   └────────────────┘   └──────────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite database (one `records` table of JSON values)                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`store`] - The store handle, its configuration, and the never-throw facade
//! - [`record`] - The timestamped record envelope and retention checks
//! - [`error`] - Storage error types (internal; callers only ever see `None`)

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod record;
pub mod store;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{StoreError, StoreResult};
pub use record::{PersistedRecord, SCHEMA_VERSION};
pub use store::{PersistentStore, StoreConfig, DEFAULT_RETENTION_DAYS};
