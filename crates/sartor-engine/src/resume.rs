//! # Workflow Resume Controller
//!
//! Decides whether an interrupted order can be resumed and produces the
//! summary the "resume your order" banner renders.
//!
//! ## Read Path
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Resume Decision                                      │
//! │                                                                         │
//! │  summarize() / has_resumable_draft() / load_for_resume()               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Fresh store read of the draft record                                  │
//! │       │                                                                 │
//! │       ├── absent / corrupt ────────────────► None                      │
//! │       ├── saved_at older than 7 days ──────► purge record, None        │
//! │       └── live ────────────────────────────► the draft, unchanged      │
//! │                                                                         │
//! │  Expiry is a calendar comparison made on each read; there is no        │
//! │  background timer, and an expired draft is never observable.           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use sartor_core::{BookingDraft, Money};

use crate::booking::BookingDraftManager;

// =============================================================================
// Resume Summary
// =============================================================================

/// What the resume banner needs to render: where the user is in the flow
/// and what has been selected so far.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ResumeSummary {
    /// Current wizard step, 1-based.
    pub current_step: u8,

    /// Steps in the chosen flow; 0 while no service type is chosen.
    pub total_steps: u8,

    /// Completed selections (counted on its own scale, see
    /// `BookingDraft::completed_steps`).
    pub completed_steps: u8,

    /// Rounded completion percentage.
    pub progress_percentage: u8,

    /// Whether a fabric has been selected.
    pub has_fabric: bool,

    /// Whether a tailor has been selected.
    pub has_tailor: bool,

    /// Whether a service type has been chosen.
    pub has_service_type: bool,

    /// Draft price as mirrored into the cart.
    pub total_cost: Money,
}

impl From<&BookingDraft> for ResumeSummary {
    fn from(draft: &BookingDraft) -> Self {
        ResumeSummary {
            current_step: draft.current_step,
            total_steps: draft.total_steps(),
            completed_steps: draft.completed_steps(),
            progress_percentage: draft.progress_percentage(),
            has_fabric: draft.has_fabric(),
            has_tailor: draft.has_tailor(),
            has_service_type: draft.has_service_type(),
            total_cost: draft.booking_price(),
        }
    }
}

// =============================================================================
// Workflow Resume Controller
// =============================================================================

/// Computes resumability over the persisted draft.
///
/// Every method reads the store fresh so the answer reflects what would
/// survive a reload, and none of them mutates the draft's fields. These
/// methods do not fail: storage faults and partial drafts all read as
/// "nothing to resume".
#[derive(Debug, Clone)]
pub struct WorkflowResumeController {
    drafts: BookingDraftManager,
}

impl WorkflowResumeController {
    /// Creates a controller over the given draft manager.
    pub fn new(drafts: BookingDraftManager) -> Self {
        WorkflowResumeController { drafts }
    }

    /// Whether a persisted, unexpired draft exists.
    pub fn has_resumable_draft(&self) -> bool {
        self.drafts.stored_draft().is_some()
    }

    /// The stored draft, field-for-field as it was saved; `None` if absent
    /// or expired.
    pub fn load_for_resume(&self) -> Option<BookingDraft> {
        self.drafts.stored_draft()
    }

    /// Summary for the resume banner, or `None` when there is nothing to
    /// resume.
    pub fn summarize(&self) -> Option<ResumeSummary> {
        self.drafts
            .stored_draft()
            .map(|draft| ResumeSummary::from(&draft))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
