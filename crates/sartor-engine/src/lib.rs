//! # sartor-engine: Cart & Booking State Managers
//!
//! The durable state layer of Sartor. It keeps an in-progress multi-step
//! custom-order draft and the shopping cart consistent with each other,
//! persists both on every mutation, and lets an interrupted order be
//! resumed after a reload.
//!
//! ## State Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Engine State Managers                                │
//! │                                                                         │
//! │  ┌──────────────┐   ┌─────────────────────┐   ┌──────────────────────┐ │
//! │  │ CartManager  │   │ BookingDraftManager │   │ WorkflowResume-      │ │
//! │  │              │   │                     │   │ Controller           │ │
//! │  │  line list,  │   │  draft + derived    │   │  resumability,       │ │
//! │  │  quantities, │◄──│  metrics, mirror    │◄──│  expiry policy,      │ │
//! │  │  totals      │   │  line upkeep        │   │  summary             │ │
//! │  └──────┬───────┘   └──────────┬──────────┘   └──────────────────────┘ │
//! │         │                      │                                        │
//! │         ▼                      ▼                                        │
//! │  "sartor.cart.v1"     "sartor.booking_draft.v1"                        │
//! │  (JSON line array)    (timestamped draft record)                       │
//! │                                                                         │
//! │  THREAD MODEL: single-threaded, cooperative. Handles clone cheaply     │
//! │  (Arc<Mutex> interiors); every public method completes its whole       │
//! │  read-then-write synchronously, so no lost updates inside the engine.  │
//! │  Two processes sharing one store file can still diverge.               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`cart`] - Cart line list, quantity arithmetic, totals
//! - [`booking`] - The booking draft manager and its cart mirror line
//! - [`resume`] - Resume detection, expiry policy, display summary

// =============================================================================
// Module Declarations
// =============================================================================

pub mod booking;
pub mod cart;
pub mod resume;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use booking::BookingDraftManager;
pub use cart::{CartManager, CartTotals};
pub use resume::{ResumeSummary, WorkflowResumeController};

// =============================================================================
// Persisted Record Keys
// =============================================================================

/// Store key for the cart line list (a JSON array of `CartLineItem`).
pub const CART_RECORD_KEY: &str = "sartor.cart.v1";

/// Store key for the booking draft (a timestamped `PersistedRecord`).
pub const DRAFT_RECORD_KEY: &str = "sartor.booking_draft.v1";

/// Line id of the single synthetic cart line mirroring the booking draft.
pub const BOOKING_LINE_ID: &str = "booking-draft";
