//! # Booking Draft Manager
//!
//! Owns the in-progress custom-order draft, persists it on every change,
//! and mirrors it into the cart as one synthetic line.
//!
//! ## Setter Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Every Setter Does Four Things                        │
//! │                                                                         │
//! │  set_fabric("F1")                                                      │
//! │       │                                                                 │
//! │       ├─► 1. update the in-memory draft (create it on first call)      │
//! │       ├─► 2. refresh updated_at                                        │
//! │       ├─► 3. persist the draft record                                  │
//! │       └─► 4. upsert the mirror line into the cart                      │
//! │                                                                         │
//! │  All four happen inside one synchronous call; no observer can see      │
//! │  the draft and its mirror out of step.                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::{Arc, Mutex};

use chrono::Utc;
use tracing::debug;

use sartor_core::booking::Measurements;
use sartor_core::{BookingDraft, CartLineItem, LineKind, ServiceType};
use sartor_store::PersistentStore;

use crate::cart::CartManager;
use crate::{BOOKING_LINE_ID, DRAFT_RECORD_KEY};

// =============================================================================
// Booking Draft Manager
// =============================================================================

/// Manages the booking draft lifecycle: implicit creation on the first
/// setter, persistence and cart mirroring on every change, destruction on
/// [`clear`].
///
/// The handle is cheap to clone; clones share state.
///
/// [`clear`]: BookingDraftManager::clear
#[derive(Debug, Clone)]
pub struct BookingDraftManager {
    store: PersistentStore,
    cart: CartManager,
    draft: Arc<Mutex<Option<BookingDraft>>>,
}

impl BookingDraftManager {
    /// Creates a manager over `store`, adopting any previously persisted,
    /// unexpired draft.
    pub fn new(store: PersistentStore, cart: CartManager) -> Self {
        let draft = store
            .get_record::<BookingDraft>(DRAFT_RECORD_KEY)
            .map(|record| record.payload);
        debug!(resumed = draft.is_some(), "Booking draft state loaded");
        BookingDraftManager {
            store,
            cart,
            draft: Arc::new(Mutex::new(draft)),
        }
    }

    // -------------------------------------------------------------------------
    // Setters
    // -------------------------------------------------------------------------

    /// Records the selected fabric.
    pub fn set_fabric(&self, fabric_id: &str) {
        debug!(fabric_id = %fabric_id, "set_fabric");
        self.mutate(|draft| draft.fabric_id = Some(fabric_id.to_string()));
    }

    /// Records the selected tailor.
    pub fn set_tailor(&self, tailor_id: &str) {
        debug!(tailor_id = %tailor_id, "set_tailor");
        self.mutate(|draft| draft.tailor_id = Some(tailor_id.to_string()));
    }

    /// Records the selected garment design.
    pub fn set_design(&self, design_id: &str) {
        debug!(design_id = %design_id, "set_design");
        self.mutate(|draft| draft.design_id = Some(design_id.to_string()));
    }

    /// Chooses between a fabric-only purchase and a full tailoring order.
    /// The current step is re-clamped into the new flow's range.
    pub fn set_service_type(&self, service_type: ServiceType) {
        debug!(?service_type, "set_service_type");
        self.mutate(|draft| {
            draft.service_type = Some(service_type);
            draft.current_step = draft.clamp_step(draft.current_step);
        });
    }

    /// Moves the wizard to `step`, clamped into the valid range for the
    /// chosen service type.
    pub fn set_step(&self, step: u8) {
        debug!(step, "set_step");
        self.mutate(|draft| draft.current_step = draft.clamp_step(step));
    }

    /// Records the entered measurements.
    pub fn set_measurements(&self, measurements: Measurements) {
        debug!(count = measurements.len(), "set_measurements");
        self.mutate(|draft| draft.measurements = Some(measurements));
    }

    /// Destroys the draft: the persisted record, the mirrored cart line,
    /// and the in-memory state. Called on explicit abandonment and on
    /// checkout commit.
    pub fn clear(&self) {
        debug!("clear booking draft");
        let mut guard = self.draft.lock().expect("draft mutex poisoned");
        *guard = None;
        self.store.remove(DRAFT_RECORD_KEY);
        self.cart.remove_booking_line();
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    /// A snapshot of the in-memory draft, if one exists.
    pub fn draft(&self) -> Option<BookingDraft> {
        self.draft.lock().expect("draft mutex poisoned").clone()
    }

    /// The persisted draft, read fresh from the store with the retention
    /// window applied. `None` if absent or expired (an expired record is
    /// purged by this read).
    pub fn stored_draft(&self) -> Option<BookingDraft> {
        self.store
            .get_record::<BookingDraft>(DRAFT_RECORD_KEY)
            .map(|record| record.payload)
    }

    // -------------------------------------------------------------------------
    // Mutation plumbing
    // -------------------------------------------------------------------------

    /// Applies `f` to the draft (creating a fresh one on the first setter
    /// call), refreshes `updated_at`, persists the record, and upserts the
    /// mirror line, all before returning.
    fn mutate(&self, f: impl FnOnce(&mut BookingDraft)) {
        let mut guard = self.draft.lock().expect("draft mutex poisoned");
        let now = Utc::now();
        let draft = guard.get_or_insert_with(|| BookingDraft::new(now));

        f(draft);
        draft.updated_at = now;

        self.store.set_record(DRAFT_RECORD_KEY, draft);
        self.cart.upsert_booking_line(mirror_line(draft));
    }
}

/// Builds the synthetic cart line for the current draft.
fn mirror_line(draft: &BookingDraft) -> CartLineItem {
    CartLineItem {
        id: BOOKING_LINE_ID.to_string(),
        kind: LineKind::BookingDraft,
        quantity: 1,
        unit_price: draft.booking_price(),
        display_name: draft.display_name(),
        description: Some(draft.description()),
        image_ref: None,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use sartor_core::Money;
    use sartor_store::StoreConfig;

    fn managers() -> (PersistentStore, CartManager, BookingDraftManager) {
        let store = PersistentStore::open(StoreConfig::in_memory()).unwrap();
        let cart = CartManager::new(store.clone());
        let drafts = BookingDraftManager::new(store.clone(), cart.clone());
        (store, cart, drafts)
    }

    fn booking_lines(cart: &CartManager) -> Vec<CartLineItem> {
        cart.lines()
            .into_iter()
            .filter(|l| l.kind == LineKind::BookingDraft)
            .collect()
    }

    #[test]
    fn test_first_setter_creates_draft() {
        let (_, cart, drafts) = managers();
        assert!(drafts.draft().is_none());

        drafts.set_fabric("F1");

        let draft = drafts.draft().unwrap();
        assert_eq!(draft.fabric_id.as_deref(), Some("F1"));
        assert_eq!(draft.current_step, 1);
        assert_eq!(booking_lines(&cart).len(), 1);
    }

    #[test]
    fn test_setting_same_fabric_twice_is_idempotent() {
        let (_, cart, drafts) = managers();

        drafts.set_fabric("F1");
        let first = drafts.draft().unwrap();
        let first_mirror = booking_lines(&cart);

        drafts.set_fabric("F1");
        let second = drafts.draft().unwrap();
        let second_mirror = booking_lines(&cart);

        // Only the touch timestamp may differ
        let mut first_pinned = first.clone();
        first_pinned.updated_at = second.updated_at;
        assert_eq!(first_pinned, second);
        assert_eq!(first.created_at, second.created_at);
        assert_eq!(first_mirror, second_mirror);
    }

    #[test]
    fn test_mirror_follows_every_setter() {
        let (_, cart, drafts) = managers();

        drafts.set_service_type(ServiceType::FabricTailor);
        drafts.set_fabric("F1");
        drafts.set_tailor("T2");
        drafts.set_step(2);

        let mirrors = booking_lines(&cart);
        assert_eq!(mirrors.len(), 1);

        let draft = drafts.draft().unwrap();
        let mirror = &mirrors[0];
        assert_eq!(mirror.unit_price, draft.booking_price());
        assert_eq!(mirror.quantity, 1);
        assert_eq!(mirror.display_name, "Custom tailoring order");
        assert_eq!(
            mirror.description.as_deref(),
            Some("Fabric F1 · Tailor T2 · Step 2 of 6")
        );
    }

    #[test]
    fn test_mirror_price_tracks_supplied_costs() {
        let (_, cart, drafts) = managers();

        drafts.set_fabric("F1");
        assert_eq!(booking_lines(&cart)[0].unit_price, Money::zero());

        // Costs arrive from outside the wizard; a later save mirrors them
        {
            let mut guard = drafts.draft.lock().unwrap();
            let draft = guard.as_mut().unwrap();
            draft.fabric_cost = Some(Money::from_cents(4500));
        }
        drafts.set_step(2);

        assert_eq!(booking_lines(&cart)[0].unit_price.cents(), 4500);
    }

    #[test]
    fn test_step_clamps_to_service_flow() {
        let (_, _, drafts) = managers();

        drafts.set_service_type(ServiceType::FabricTailor);
        drafts.set_step(5);
        assert_eq!(drafts.draft().unwrap().current_step, 5);

        // Switching to the shorter flow pulls the step back into range
        drafts.set_service_type(ServiceType::FabricOnly);
        assert_eq!(drafts.draft().unwrap().current_step, 3);

        drafts.set_step(0);
        assert_eq!(drafts.draft().unwrap().current_step, 1);
    }

    #[test]
    fn test_measurements_count_toward_completion() {
        let (_, _, drafts) = managers();

        drafts.set_service_type(ServiceType::FabricTailor);
        drafts.set_measurements(Measurements::from([("chest".to_string(), 96.5)]));

        let draft = drafts.draft().unwrap();
        assert!(draft.has_measurements());
        assert_eq!(draft.completed_steps(), 2);
    }

    #[test]
    fn test_clear_removes_record_and_mirror() {
        let (store, cart, drafts) = managers();

        drafts.set_fabric("F1");
        drafts.set_service_type(ServiceType::FabricTailor);
        assert_eq!(booking_lines(&cart).len(), 1);

        drafts.clear();

        assert!(drafts.draft().is_none());
        assert!(drafts.stored_draft().is_none());
        assert!(booking_lines(&cart).is_empty());
        assert!(store.get::<serde_json::Value>(DRAFT_RECORD_KEY).is_none());
    }

    #[test]
    fn test_clear_leaves_product_lines_alone() {
        let (_, cart, drafts) = managers();
        cart.add_product_line(
            CartLineItem {
                id: "F9".to_string(),
                kind: LineKind::Product,
                quantity: 1,
                unit_price: Money::from_cents(999),
                display_name: "Fabric F9".to_string(),
                description: None,
                image_ref: None,
            },
            1,
        );

        drafts.set_fabric("F1");
        drafts.clear();

        let lines = cart.lines();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].id, "F9");
    }

    #[test]
    fn test_draft_resumes_through_new_manager() {
        let (store, cart, drafts) = managers();

        drafts.set_service_type(ServiceType::FabricTailor);
        drafts.set_fabric("F1");
        drafts.set_step(3);

        // Simulated reload: fresh manager over the same store
        let reloaded = BookingDraftManager::new(store, cart);
        let draft = reloaded.draft().unwrap();

        assert_eq!(draft.fabric_id.as_deref(), Some("F1"));
        assert_eq!(draft.current_step, 3);
    }
}
