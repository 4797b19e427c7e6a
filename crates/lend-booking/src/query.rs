//! State-filtered booking listings.
//!
//! A party's bookings — as renter, or as owner of the booked items — are
//! retrieved newest-start-first, classified against the engine clock,
//! and optionally paginated. A party with no history at all in the
//! requested role is an error; a nonempty history that a filter reduces
//! to nothing is an empty page. Callers depend on that asymmetry.

use uuid::Uuid;

use crate::engine::BookingEngine;
use crate::error::BookingError;
use crate::model::{Booking, BookingRole, PageRequest, StateFilter};

impl BookingEngine {
    /// List `user_id`'s bookings from the given role's vantage point.
    ///
    /// Pagination, when present, selects page `from / size` of the
    /// filtered sequence (see [`PageRequest`] for the page-index
    /// semantics).
    pub fn list(
        &self,
        user_id: Uuid,
        role: BookingRole,
        filter: StateFilter,
        page: Option<PageRequest>,
    ) -> Result<Vec<Booking>, BookingError> {
        if !self.directory().party_exists(&user_id) {
            return Err(BookingError::UserNotFound(user_id));
        }

        let retrieved = match role {
            BookingRole::Renter => self.store().by_booker(&user_id),
            BookingRole::Owner => {
                let owned = self.directory().items_owned_by(&user_id);
                self.store().by_items(&owned)
            }
        };

        if retrieved.is_empty() {
            return Err(BookingError::NoBookingHistory { user_id, role });
        }

        let now = self.now();
        let filtered: Vec<Booking> = retrieved
            .into_iter()
            .filter(|b| filter.matches(b, now))
            .collect();

        tracing::debug!(
            user_id = %user_id,
            role = %role,
            filter = ?filter,
            matched = filtered.len(),
            "booking listing"
        );

        Ok(match page {
            Some(page) => page.apply(filtered),
            None => filtered,
        })
    }
}
