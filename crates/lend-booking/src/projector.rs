//! Last/next booking projection for owner item views.
//!
//! When an owner looks at their own item, the view carries two derived
//! references: `next_booking`, the earliest booking starting strictly
//! after now (any status), and `last_booking`, the earliest-starting
//! booking overall. The "last" pick is the first-ever booking by start
//! time rather than the most recent past one; that reading is preserved
//! deliberately because existing consumers were built against it, and
//! the pinning tests below would catch any silent "fix".
//!
//! Non-owner viewers get neither field: a renter must not see another
//! party's scheduling detail through an item read. The projection is
//! recomputed on every read and never persisted.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::directory::ItemSummary;
use crate::engine::BookingEngine;

/// The (booking, booker) pair attached to an owner's item view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingRef {
    pub id: Uuid,
    pub booker_id: Uuid,
}

/// Derived, request-scoped projection for one item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ItemBookingView {
    pub last_booking: Option<BookingRef>,
    pub next_booking: Option<BookingRef>,
}

impl BookingEngine {
    /// Compute the last/next projection of `item` as seen by `viewer_id`.
    ///
    /// Empty for every viewer but the owner.
    pub fn item_booking_view(&self, item: &ItemSummary, viewer_id: Uuid) -> ItemBookingView {
        if viewer_id != item.owner_id {
            return ItemBookingView::default();
        }

        let now = self.now();
        let bookings = self.store().for_item(&item.id);

        // `for_item` is start-ascending: the head is the first-ever
        // booking, the scan finds the earliest strictly-future start.
        let last_booking = bookings.first().map(|b| BookingRef {
            id: b.id,
            booker_id: b.booker_id,
        });
        let next_booking = bookings
            .iter()
            .find(|b| b.window.start > now)
            .map(|b| BookingRef {
                id: b.id,
                booker_id: b.booker_id,
            });

        ItemBookingView {
            last_booking,
            next_booking,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directory::PartyDirectory;
    use crate::testutil::fixture;
    use chrono::Duration;

    #[test]
    fn non_owner_sees_no_booking_fields() {
        let fx = fixture();
        let stranger = fx.directory.add_user();
        fx.engine.create(fx.renter, fx.request(1, 2)).unwrap();

        let item = fx.directory.item(&fx.item).unwrap();
        for viewer in [fx.renter, stranger] {
            let view = fx.engine.item_booking_view(&item, viewer);
            assert_eq!(view, ItemBookingView::default());
        }
    }

    #[test]
    fn owner_of_unbooked_item_gets_neither_field() {
        let fx = fixture();
        let item = fx.directory.item(&fx.item).unwrap();
        let view = fx.engine.item_booking_view(&item, fx.owner);
        assert!(view.last_booking.is_none());
        assert!(view.next_booking.is_none());
    }

    #[test]
    fn single_future_booking_fills_both_fields() {
        let fx = fixture();
        let b = fx.engine.create(fx.renter, fx.request(1, 2)).unwrap();

        let item = fx.directory.item(&fx.item).unwrap();
        let view = fx.engine.item_booking_view(&item, fx.owner);
        let expected = Some(BookingRef {
            id: b.id,
            booker_id: fx.renter,
        });
        assert_eq!(view.last_booking, expected);
        assert_eq!(view.next_booking, expected);
    }

    #[test]
    fn last_is_the_earliest_start_overall_not_the_most_recent_past() {
        let fx = fixture();
        let first = fx.engine.create(fx.renter, fx.request(1, 2)).unwrap();
        let second = fx.engine.create(fx.renter, fx.request(3, 4)).unwrap();
        let third = fx.engine.create(fx.renter, fx.request(6, 7)).unwrap();

        // Move past the first two windows; the third is still ahead.
        fx.clock.advance(Duration::days(5));

        let item = fx.directory.item(&fx.item).unwrap();
        let view = fx.engine.item_booking_view(&item, fx.owner);

        // Pinned: "last" is the first-ever booking, not `second` (the
        // most recent past one).
        assert_eq!(view.last_booking.unwrap().id, first.id);
        assert_eq!(view.next_booking.unwrap().id, third.id);
        let _ = second;
    }

    #[test]
    fn next_ignores_status() {
        let fx = fixture();
        let b = fx.engine.create(fx.renter, fx.request(1, 2)).unwrap();
        fx.engine.decide(b.id, fx.owner, false).unwrap();

        // A rejected booking still shows up as "next": status is not
        // filtered on this path.
        let item = fx.directory.item(&fx.item).unwrap();
        let view = fx.engine.item_booking_view(&item, fx.owner);
        assert_eq!(view.next_booking.unwrap().id, b.id);
    }

    #[test]
    fn next_requires_a_strictly_future_start() {
        let fx = fixture();
        let b = fx.engine.create(fx.renter, fx.request(1, 3)).unwrap();

        // Enter the window: the booking has started, so it is no longer
        // "next", but remains "last".
        fx.clock.advance(Duration::days(2));
        let item = fx.directory.item(&fx.item).unwrap();
        let view = fx.engine.item_booking_view(&item, fx.owner);
        assert!(view.next_booking.is_none());
        assert_eq!(view.last_booking.unwrap().id, b.id);
    }
}
