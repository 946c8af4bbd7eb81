//! # Cart Manager
//!
//! Owns the list of cart line items: catalog products plus at most one
//! synthetic booking-draft line.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart State Operations                                │
//! │                                                                         │
//! │  Frontend Action          Manager Call            State Change          │
//! │  ───────────────          ────────────            ────────────          │
//! │                                                                         │
//! │  Click Product ──────────► add_product_line() ──► merge or append      │
//! │                                                                         │
//! │  Change Quantity ────────► set_quantity() ──────► clamp to ≥ 1         │
//! │                                                                         │
//! │  Click Remove ───────────► remove_line() ───────► delete by (id,kind)  │
//! │                                                                         │
//! │  View Cart ──────────────► lines() / totals() ──► (read only)          │
//! │                                                                         │
//! │  Every write re-persists the FULL line list before returning.          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};
use tracing::debug;
use ts_rs::TS;

use sartor_core::{CartLineItem, LineKind, Money};
use sartor_store::PersistentStore;

use crate::CART_RECORD_KEY;

// =============================================================================
// Cart Totals
// =============================================================================

/// Cart totals summary for the cart page.
///
/// Always computed from the live line list; never cached, so it can never
/// go stale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartTotals {
    /// Number of distinct lines.
    pub item_count: usize,

    /// Sum of quantities across all lines.
    pub total_quantity: u32,

    /// Σ(unit price × quantity) over all lines.
    pub subtotal: Money,
}

impl CartTotals {
    fn from_lines(lines: &[CartLineItem]) -> Self {
        CartTotals {
            item_count: lines.len(),
            total_quantity: lines.iter().map(|l| l.quantity).sum(),
            subtotal: lines.iter().map(CartLineItem::line_total).sum(),
        }
    }
}

// =============================================================================
// Cart Manager
// =============================================================================

/// Manages the cart line list and keeps it persisted.
///
/// The handle is cheap to clone; clones share state. The line list is
/// loaded from the store once at construction and re-persisted in full
/// after every mutating call.
#[derive(Debug, Clone)]
pub struct CartManager {
    store: PersistentStore,
    lines: Arc<Mutex<Vec<CartLineItem>>>,
}

impl CartManager {
    /// Creates a manager over `store`, loading any previously persisted
    /// cart contents.
    pub fn new(store: PersistentStore) -> Self {
        let lines: Vec<CartLineItem> = store.get(CART_RECORD_KEY).unwrap_or_default();
        debug!(lines = lines.len(), "Cart state loaded");
        CartManager {
            store,
            lines: Arc::new(Mutex::new(lines)),
        }
    }

    /// Adds a product to the cart, or increases its quantity if a line with
    /// the same `(id, kind)` already exists.
    ///
    /// ## Behavior
    /// - Existing line: quantity increases by `quantity` (at least 1)
    /// - New line: appended with `quantity` (at least 1)
    pub fn add_product_line(&self, item: CartLineItem, quantity: u32) {
        let quantity = quantity.max(1);
        debug!(id = %item.id, quantity, "add_product_line");

        self.write(|lines| {
            if let Some(existing) = lines
                .iter_mut()
                .find(|l| l.matches(&item.id, item.kind))
            {
                existing.quantity += quantity;
            } else {
                let mut line = item;
                line.quantity = quantity;
                lines.push(line);
            }
        });
    }

    /// Removes the line matching `(id, kind)`. No-op if absent.
    pub fn remove_line(&self, id: &str, kind: LineKind) {
        debug!(id = %id, ?kind, "remove_line");

        self.write(|lines| {
            lines.retain(|l| !l.matches(id, kind));
        });
    }

    /// Sets the quantity of the line matching `(id, kind)`, clamped to a
    /// minimum of 1. No-op if the line is absent.
    pub fn set_quantity(&self, id: &str, kind: LineKind, quantity: u32) {
        let quantity = quantity.max(1);
        debug!(id = %id, ?kind, quantity, "set_quantity");

        self.write(|lines| {
            if let Some(line) = lines.iter_mut().find(|l| l.matches(id, kind)) {
                line.quantity = quantity;
            }
        });
    }

    /// A snapshot of the current lines.
    pub fn lines(&self) -> Vec<CartLineItem> {
        self.read(|lines| lines.to_vec())
    }

    /// Whether the cart has no lines.
    pub fn is_empty(&self) -> bool {
        self.read(|lines| lines.is_empty())
    }

    /// Current totals, recomputed from the line list on every call.
    pub fn totals(&self) -> CartTotals {
        self.read(CartTotals::from_lines)
    }

    /// The synthetic booking-draft line, if present.
    pub fn booking_line(&self) -> Option<CartLineItem> {
        self.read(|lines| {
            lines
                .iter()
                .find(|l| l.kind == LineKind::BookingDraft)
                .cloned()
        })
    }

    /// Replaces the single booking-draft mirror line, inserting it if
    /// absent. Called by the draft manager on every draft save.
    pub fn upsert_booking_line(&self, line: CartLineItem) {
        self.write(|lines| {
            if let Some(existing) = lines.iter_mut().find(|l| l.kind == LineKind::BookingDraft)
            {
                *existing = line;
            } else {
                lines.push(line);
            }
        });
    }

    /// Drops the booking-draft mirror line, if present.
    pub fn remove_booking_line(&self) {
        self.write(|lines| {
            lines.retain(|l| l.kind != LineKind::BookingDraft);
        });
    }

    // -------------------------------------------------------------------------
    // Lock + persist plumbing
    // -------------------------------------------------------------------------

    fn read<R>(&self, f: impl FnOnce(&[CartLineItem]) -> R) -> R {
        let lines = self.lines.lock().expect("cart mutex poisoned");
        f(&lines)
    }

    /// Runs a mutation and persists the full line list before returning.
    /// A failed write is swallowed by the store; the in-memory state stays
    /// authoritative for this session.
    fn write<R>(&self, f: impl FnOnce(&mut Vec<CartLineItem>) -> R) -> R {
        let mut lines = self.lines.lock().expect("cart mutex poisoned");
        let result = f(&mut lines);
        self.store.set(CART_RECORD_KEY, &*lines);
        result
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
