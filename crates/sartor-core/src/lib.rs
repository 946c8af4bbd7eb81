//! # sartor-core: Pure Business Logic for Sartor
//!
//! This crate is the **heart** of the Sartor order engine. It contains all
//! business logic as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Sartor Architecture                              │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Frontend (web storefront)                    │   │
//! │  │    Fabric picker ──► Booking wizard ──► Cart ──► Checkout      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    sartor-engine                                │   │
//! │  │    CartManager, BookingDraftManager, WorkflowResumeController  │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ sartor-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌──────────────────────────┐  │   │
//! │  │   │   types   │  │   money   │  │        booking           │  │   │
//! │  │   │ LineKind  │  │   Money   │  │  BookingDraft, steps,    │  │   │
//! │  │   │ CartLine  │  │  (cents)  │  │  progress, pricing       │  │   │
//! │  │   └───────────┘  └───────────┘  └──────────────────────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (ServiceType, LineKind, CartLineItem)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`booking`] - The booking draft and its derived step/progress math
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Database, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: All monetary values are in cents (i64) to avoid float errors
//! 4. **Degrade, Don't Fail**: Partial drafts compute to zero/empty, never panic

// =============================================================================
// Module Declarations
// =============================================================================

pub mod booking;
pub mod money;
pub mod types;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use sartor_core::Money` instead of
// `use sartor_core::money::Money`

pub use booking::BookingDraft;
pub use money::Money;
pub use types::*;
