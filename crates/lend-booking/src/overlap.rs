//! Approved-window overlap checking.
//!
//! Pure function over a candidate window and the existing bookings of one
//! item. Only APPROVED bookings block: WAITING requests may pile up on
//! the same window, and the real exclusivity decision happens when the
//! owner approves (which re-runs this check — see the engine).
//!
//! Two half-open windows `[s1, e1)` and `[s2, e2)` conflict iff
//! `s1 < e2 && s2 < e1`. That closed form covers the start-inside,
//! end-inside, and containment cases, plus the exactly-equal-window case
//! the case-by-case phrasing misses.

use lend_core::BookingWindow;

use crate::model::{Booking, BookingStatus};

/// Does `candidate` overlap any APPROVED booking in `existing`?
///
/// Non-approved entries are skipped, so callers may pass either a
/// pre-filtered approved set or a full per-item scan.
pub fn conflicts_with_approved(candidate: &BookingWindow, existing: &[Booking]) -> bool {
    existing
        .iter()
        .filter(|b| b.status == BookingStatus::Approved)
        .any(|b| candidate.overlaps(&b.window))
}
