//! Comment-eligibility gate.
//!
//! A party may review an item only on the strength of a real rental:
//! an APPROVED booking of that item by that party whose start is at or
//! before now. Read-only over the booking store; no new state.

use uuid::Uuid;

use crate::engine::BookingEngine;
use crate::error::BookingError;
use crate::model::Booking;

impl BookingEngine {
    /// May `author_id` comment on `item_id`?
    ///
    /// Returns the qualifying booking (the earliest-starting approved
    /// one), [`BookingError::NoEligibleBooking`] when the author never
    /// had an approved booking, or [`BookingError::BookingNotYetStarted`]
    /// when the approved booking is still entirely in the future.
    pub fn comment_eligibility(
        &self,
        item_id: Uuid,
        author_id: Uuid,
    ) -> Result<Booking, BookingError> {
        let booking = self
            .store()
            .earliest_approved_for(&item_id, &author_id)
            .ok_or(BookingError::NoEligibleBooking {
                item_id,
                user_id: author_id,
            })?;

        if booking.window.start > self.now() {
            return Err(BookingError::BookingNotYetStarted {
                item_id,
                user_id: author_id,
            });
        }
        Ok(booking)
    }
}
