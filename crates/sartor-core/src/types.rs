//! # Domain Types
//!
//! Core domain types used throughout Sartor.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │  CartLineItem   │   │    LineKind     │   │  ServiceType    │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id + kind      │   │  Product        │   │  FabricOnly     │       │
//! │  │  quantity       │   │  BookingDraft   │   │  FabricTailor   │       │
//! │  │  unit_price     │   └─────────────────┘   └─────────────────┘       │
//! │  │  display_name   │                                                   │
//! │  └─────────────────┘                                                   │
//! │                                                                         │
//! │  A cart holds catalog product lines plus at most ONE synthetic         │
//! │  booking-draft line mirroring the in-progress custom order.            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Service Type
// =============================================================================

/// The shape of a custom order: fabric purchase alone, or fabric plus a
/// tailoring service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum ServiceType {
    /// Fabric purchase only (3-step flow).
    FabricOnly,
    /// Fabric plus tailoring service (6-step flow).
    FabricTailor,
}

impl ServiceType {
    /// Total number of wizard steps for this service type.
    ///
    /// ## Example
    /// ```rust
    /// use sartor_core::types::ServiceType;
    ///
    /// assert_eq!(ServiceType::FabricOnly.total_steps(), 3);
    /// assert_eq!(ServiceType::FabricTailor.total_steps(), 6);
    /// ```
    #[inline]
    pub const fn total_steps(&self) -> u8 {
        match self {
            ServiceType::FabricOnly => 3,
            ServiceType::FabricTailor => 6,
        }
    }
}

// =============================================================================
// Line Kind
// =============================================================================

/// Distinguishes catalog product lines from the synthetic booking-draft line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum LineKind {
    /// A catalog product added to the cart directly.
    Product,
    /// The mirror line representing the in-progress booking draft.
    BookingDraft,
}

// =============================================================================
// Cart Line Item
// =============================================================================

/// A line item in the shopping cart.
///
/// Lines are identified by the `(id, kind)` pair: product lines are unique
/// per pair, and at most one line in a cart has `kind = BookingDraft`.
///
/// Display data is a snapshot taken when the line is created; the cart shows
/// consistent data even if the catalog changes afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartLineItem {
    /// Catalog id for product lines; a fixed sentinel for the booking line.
    pub id: String,

    /// What this line represents.
    pub kind: LineKind,

    /// Quantity in cart. Always at least 1.
    pub quantity: u32,

    /// Price per unit, frozen when the line was created.
    pub unit_price: Money,

    /// Name shown in the cart.
    pub display_name: String,

    /// Secondary line of display text (selection summary for the booking
    /// line, catalog description for products).
    pub description: Option<String>,

    /// Image reference for the cart thumbnail, if any.
    pub image_ref: Option<String>,
}

impl CartLineItem {
    /// Line total (unit price × quantity).
    ///
    /// ## Example
    /// ```rust
    /// use sartor_core::money::Money;
    /// use sartor_core::types::{CartLineItem, LineKind};
    ///
    /// let line = CartLineItem {
    ///     id: "F1".to_string(),
    ///     kind: LineKind::Product,
    ///     quantity: 3,
    ///     unit_price: Money::from_cents(299),
    ///     display_name: "Linen, sky blue".to_string(),
    ///     description: None,
    ///     image_ref: None,
    /// };
    /// assert_eq!(line.line_total().cents(), 897);
    /// ```
    #[inline]
    pub fn line_total(&self) -> Money {
        self.unit_price.multiply_quantity(self.quantity as i64)
    }

    /// Whether this line matches the given `(id, kind)` identity.
    #[inline]
    pub fn matches(&self, id: &str, kind: LineKind) -> bool {
        self.kind == kind && self.id == id
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn fabric_line(id: &str, price_cents: i64, quantity: u32) -> CartLineItem {
        CartLineItem {
            id: id.to_string(),
            kind: LineKind::Product,
            quantity,
            unit_price: Money::from_cents(price_cents),
            display_name: format!("Fabric {}", id),
            description: None,
            image_ref: None,
        }
    }

    #[test]
    fn test_total_steps_lookup() {
        assert_eq!(ServiceType::FabricOnly.total_steps(), 3);
        assert_eq!(ServiceType::FabricTailor.total_steps(), 6);
    }

    #[test]
    fn test_line_total() {
        let line = fabric_line("F1", 1250, 2);
        assert_eq!(line.line_total().cents(), 2500);
    }

    #[test]
    fn test_matches_requires_both_id_and_kind() {
        let line = fabric_line("F1", 1250, 1);
        assert!(line.matches("F1", LineKind::Product));
        assert!(!line.matches("F1", LineKind::BookingDraft));
        assert!(!line.matches("F2", LineKind::Product));
    }

    #[test]
    fn test_service_type_serde_names() {
        let json = serde_json::to_string(&ServiceType::FabricTailor).unwrap();
        assert_eq!(json, "\"fabric_tailor\"");

        let parsed: ServiceType = serde_json::from_str("\"fabric_only\"").unwrap();
        assert_eq!(parsed, ServiceType::FabricOnly);
    }
}
