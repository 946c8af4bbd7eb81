//! # Booking Draft
//!
//! The in-progress custom-order draft and its derived metrics.
//!
//! ## Draft Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Booking Draft Lifecycle                              │
//! │                                                                         │
//! │  ┌──────────┐  first setter   ┌──────────┐   retention window   ┌────┐ │
//! │  │  Absent  │────────────────►│  Active  │─────────────────────►│Exp.│ │
//! │  └──────────┘                 └──────────┘   (detected on read) └────┘ │
//! │       ▲                            │                               │    │
//! │       │        clear() / checkout  │                               │    │
//! │       └────────────────────────────┴───────────────────────────────┘    │
//! │                                                                         │
//! │  An expired draft is never observable: a read either returns the       │
//! │  active draft or reports it absent.                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! This module holds the draft's data and every derived computation (step
//! totals, completion count, progress percentage, price). Persistence and
//! cart mirroring live in `sartor-engine`.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::types::ServiceType;

/// Named body measurements captured by the measurement step, in centimeters.
pub type Measurements = HashMap<String, f64>;

// =============================================================================
// Booking Draft
// =============================================================================

/// The in-progress, not-yet-submitted state of a custom tailoring order.
///
/// Every field except the timestamps starts empty; the wizard fills them in
/// one selection at a time, in any order. Derived computations tolerate any
/// partially-filled combination and default to zero/empty rather than fail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct BookingDraft {
    /// Fabric-only purchase or fabric plus tailoring.
    pub service_type: Option<ServiceType>,

    /// Selected fabric, by catalog id.
    pub fabric_id: Option<String>,

    /// Selected tailor, by directory id.
    pub tailor_id: Option<String>,

    /// Selected garment design, by catalog id.
    pub design_id: Option<String>,

    /// Measurements entered so far.
    pub measurements: Option<Measurements>,

    /// Fabric cost supplied by the catalog surface. Not populated by the
    /// wizard setters; passed through to the mirrored cart line.
    pub fabric_cost: Option<Money>,

    /// Tailoring cost supplied by the tailor directory. Same pass-through
    /// as `fabric_cost`.
    pub tailoring_cost: Option<Money>,

    /// Current wizard step, 1-based.
    pub current_step: u8,

    /// When the draft was started.
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,

    /// When the draft was last touched.
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl BookingDraft {
    /// Creates an empty draft started at `now`.
    ///
    /// The timestamp is passed in so this crate stays deterministic; the
    /// engine layer supplies the wall clock.
    pub fn new(now: DateTime<Utc>) -> Self {
        BookingDraft {
            service_type: None,
            fabric_id: None,
            tailor_id: None,
            design_id: None,
            measurements: None,
            fabric_cost: None,
            tailoring_cost: None,
            current_step: 1,
            created_at: now,
            updated_at: now,
        }
    }

    // -------------------------------------------------------------------------
    // Selection predicates
    // -------------------------------------------------------------------------

    /// Whether a fabric has been selected.
    #[inline]
    pub fn has_fabric(&self) -> bool {
        self.fabric_id.as_deref().is_some_and(|id| !id.is_empty())
    }

    /// Whether a tailor has been selected.
    #[inline]
    pub fn has_tailor(&self) -> bool {
        self.tailor_id.as_deref().is_some_and(|id| !id.is_empty())
    }

    /// Whether a service type has been chosen.
    #[inline]
    pub fn has_service_type(&self) -> bool {
        self.service_type.is_some()
    }

    /// Whether a design has been selected.
    #[inline]
    pub fn has_design(&self) -> bool {
        self.design_id.as_deref().is_some_and(|id| !id.is_empty())
    }

    /// Whether any measurements have been entered.
    #[inline]
    pub fn has_measurements(&self) -> bool {
        self.measurements.as_ref().is_some_and(|m| !m.is_empty())
    }

    // -------------------------------------------------------------------------
    // Derived metrics
    // -------------------------------------------------------------------------

    /// Total wizard steps for the chosen service type, 0 while no service
    /// type has been chosen.
    #[inline]
    pub fn total_steps(&self) -> u8 {
        self.service_type.map_or(0, |s| s.total_steps())
    }

    /// Number of completed selections, counted in fixed order over
    /// {fabric, service type, design, tailor, measurements}.
    ///
    /// The service-type slot counts only when tailoring is part of the
    /// order: a fabric-only choice contributes nothing here. This count is
    /// deliberately on a different scale than [`total_steps`]; the progress
    /// percentage derived from the two can overshoot 100 or stall below it.
    ///
    /// [`total_steps`]: BookingDraft::total_steps
    pub fn completed_steps(&self) -> u8 {
        let checks = [
            self.has_fabric(),
            self.service_type == Some(ServiceType::FabricTailor),
            self.has_design(),
            self.has_tailor(),
            self.has_measurements(),
        ];
        checks.iter().filter(|done| **done).count() as u8
    }

    /// Completion percentage, rounded to the nearest whole percent.
    /// 0 while no service type has been chosen.
    pub fn progress_percentage(&self) -> u8 {
        let total = self.total_steps();
        if total == 0 {
            return 0;
        }
        let pct = f64::from(self.completed_steps()) / f64::from(total) * 100.0;
        pct.round() as u8
    }

    /// Price of the draft as mirrored into the cart: the sum of the
    /// externally supplied fabric and tailoring costs, each defaulting to
    /// zero when absent.
    pub fn booking_price(&self) -> Money {
        self.fabric_cost.unwrap_or_default() + self.tailoring_cost.unwrap_or_default()
    }

    /// Clamps a requested wizard step into the valid range for the current
    /// service type. With no service type chosen yet only the lower bound
    /// applies.
    pub fn clamp_step(&self, requested: u8) -> u8 {
        let step = requested.max(1);
        match self.total_steps() {
            0 => step,
            total => step.min(total),
        }
    }

    // -------------------------------------------------------------------------
    // Display derivation
    // -------------------------------------------------------------------------

    /// Name for the mirrored cart line, derived from the service type.
    pub fn display_name(&self) -> String {
        match self.service_type {
            Some(ServiceType::FabricOnly) => "Custom fabric order".to_string(),
            Some(ServiceType::FabricTailor) => "Custom tailoring order".to_string(),
            None => "Custom order (in progress)".to_string(),
        }
    }

    /// Selection summary for the mirrored cart line, e.g.
    /// `"Fabric F1 · Tailor T2 · Step 2 of 6"`.
    pub fn description(&self) -> String {
        let mut parts: Vec<String> = Vec::new();
        if let Some(fabric) = self.fabric_id.as_deref().filter(|id| !id.is_empty()) {
            parts.push(format!("Fabric {}", fabric));
        }
        if let Some(design) = self.design_id.as_deref().filter(|id| !id.is_empty()) {
            parts.push(format!("Design {}", design));
        }
        if let Some(tailor) = self.tailor_id.as_deref().filter(|id| !id.is_empty()) {
            parts.push(format!("Tailor {}", tailor));
        }
        match self.total_steps() {
            0 => parts.push(format!("Step {}", self.current_step)),
            total => parts.push(format!("Step {} of {}", self.current_step, total)),
        }
        parts.join(" · ")
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> BookingDraft {
        BookingDraft::new(Utc::now())
    }

    #[test]
    fn test_new_draft_is_empty_at_step_one() {
        let d = draft();
        assert_eq!(d.current_step, 1);
        assert_eq!(d.total_steps(), 0);
        assert_eq!(d.completed_steps(), 0);
        assert_eq!(d.progress_percentage(), 0);
        assert!(d.booking_price().is_zero());
    }

    /// Fabric-only service chosen, nothing else selected: three steps total,
    /// none counted complete.
    #[test]
    fn test_fabric_only_alone_counts_nothing() {
        let mut d = draft();
        d.service_type = Some(ServiceType::FabricOnly);

        assert_eq!(d.total_steps(), 3);
        assert_eq!(d.completed_steps(), 0);
        assert_eq!(d.progress_percentage(), 0);
    }

    /// Tailoring service with fabric and tailor picked: halfway through the
    /// six-step flow.
    #[test]
    fn test_fabric_tailor_with_fabric_and_tailor_is_half_done() {
        let mut d = draft();
        d.service_type = Some(ServiceType::FabricTailor);
        d.fabric_id = Some("F1".to_string());
        d.tailor_id = Some("T7".to_string());

        assert_eq!(d.total_steps(), 6);
        assert_eq!(d.completed_steps(), 3);
        assert_eq!(d.progress_percentage(), 50);
    }

    #[test]
    fn test_empty_string_selections_do_not_count() {
        let mut d = draft();
        d.fabric_id = Some(String::new());
        d.tailor_id = Some(String::new());
        d.measurements = Some(Measurements::new());

        assert_eq!(d.completed_steps(), 0);
        assert!(!d.has_fabric());
        assert!(!d.has_measurements());
    }

    #[test]
    fn test_all_selections_on_fabric_tailor() {
        let mut d = draft();
        d.service_type = Some(ServiceType::FabricTailor);
        d.fabric_id = Some("F1".to_string());
        d.tailor_id = Some("T1".to_string());
        d.design_id = Some("D1".to_string());
        d.measurements = Some(HashMap::from([("chest".to_string(), 96.5)]));

        assert_eq!(d.completed_steps(), 5);
        // 5 of 6 selections leaves the bar short of full.
        assert_eq!(d.progress_percentage(), 83);
    }

    /// The completion count can overshoot the step total: percentages above
    /// 100 are representable and preserved.
    #[test]
    fn test_progress_can_exceed_one_hundred() {
        let mut d = draft();
        d.service_type = Some(ServiceType::FabricOnly);
        d.fabric_id = Some("F1".to_string());
        d.tailor_id = Some("T1".to_string());
        d.design_id = Some("D1".to_string());
        d.measurements = Some(HashMap::from([("waist".to_string(), 81.0)]));

        assert_eq!(d.total_steps(), 3);
        assert_eq!(d.completed_steps(), 4);
        assert_eq!(d.progress_percentage(), 133);
    }

    #[test]
    fn test_booking_price_defaults_to_zero() {
        let mut d = draft();
        assert_eq!(d.booking_price(), Money::zero());

        d.fabric_cost = Some(Money::from_cents(4500));
        assert_eq!(d.booking_price().cents(), 4500);

        d.tailoring_cost = Some(Money::from_cents(12000));
        assert_eq!(d.booking_price().cents(), 16500);
    }

    #[test]
    fn test_clamp_step() {
        let mut d = draft();
        // No service type yet: only the lower bound applies.
        assert_eq!(d.clamp_step(0), 1);
        assert_eq!(d.clamp_step(9), 9);

        d.service_type = Some(ServiceType::FabricOnly);
        assert_eq!(d.clamp_step(0), 1);
        assert_eq!(d.clamp_step(2), 2);
        assert_eq!(d.clamp_step(9), 3);

        d.service_type = Some(ServiceType::FabricTailor);
        assert_eq!(d.clamp_step(9), 6);
    }

    #[test]
    fn test_display_name_follows_service_type() {
        let mut d = draft();
        assert_eq!(d.display_name(), "Custom order (in progress)");

        d.service_type = Some(ServiceType::FabricOnly);
        assert_eq!(d.display_name(), "Custom fabric order");

        d.service_type = Some(ServiceType::FabricTailor);
        assert_eq!(d.display_name(), "Custom tailoring order");
    }

    #[test]
    fn test_description_lists_selections_and_step() {
        let mut d = draft();
        d.service_type = Some(ServiceType::FabricTailor);
        d.fabric_id = Some("F1".to_string());
        d.tailor_id = Some("T2".to_string());
        d.current_step = 2;

        assert_eq!(d.description(), "Fabric F1 · Tailor T2 · Step 2 of 6");
    }

    #[test]
    fn test_serde_round_trip() {
        let mut d = draft();
        d.service_type = Some(ServiceType::FabricTailor);
        d.fabric_id = Some("F1".to_string());
        d.fabric_cost = Some(Money::from_cents(4500));
        d.current_step = 3;

        let json = serde_json::to_string(&d).unwrap();
        let back: BookingDraft = serde_json::from_str(&json).unwrap();
        assert_eq!(back, d);
    }
}
