//! Booking storage abstraction.
//!
//! The engine talks to a [`BookingStore`] trait; [`InMemoryBookingStore`]
//! is the DashMap-backed implementation used at runtime and as the test
//! double. Query methods return owned snapshots sorted the way their
//! consumers read them: listings start-descending, per-item scans
//! start-ascending.

use dashmap::DashMap;
use uuid::Uuid;

use crate::model::{Booking, BookingStatus};

/// Durable home of booking records.
///
/// All mutation flows through `insert` and `set_status`; nothing else in
/// the system writes a booking.
pub trait BookingStore: Send + Sync {
    /// Persist a freshly created booking.
    fn insert(&self, booking: Booking);

    /// Fetch a booking by id.
    fn get(&self, id: &Uuid) -> Option<Booking>;

    /// Overwrite the status of an existing booking, returning the updated
    /// record, or `None` if the booking does not exist.
    fn set_status(&self, id: &Uuid, status: BookingStatus) -> Option<Booking>;

    /// All bookings placed by `booker_id`, newest start first.
    fn by_booker(&self, booker_id: &Uuid) -> Vec<Booking>;

    /// All bookings against any of `item_ids`, newest start first.
    fn by_items(&self, item_ids: &[Uuid]) -> Vec<Booking>;

    /// All bookings for one item, earliest start first.
    fn for_item(&self, item_id: &Uuid) -> Vec<Booking>;

    /// Approved bookings for one item, earliest start first.
    fn approved_for_item(&self, item_id: &Uuid) -> Vec<Booking>;

    /// The earliest-starting approved booking of `booker_id` for
    /// `item_id`, if any.
    fn earliest_approved_for(&self, item_id: &Uuid, booker_id: &Uuid) -> Option<Booking>;
}

/// Concurrent in-memory booking store.
#[derive(Default)]
pub struct InMemoryBookingStore {
    bookings: DashMap<Uuid, Booking>,
}

impl InMemoryBookingStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored bookings.
    pub fn len(&self) -> usize {
        self.bookings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bookings.is_empty()
    }

    fn collect_sorted<F>(&self, keep: F, ascending: bool) -> Vec<Booking>
    where
        F: Fn(&Booking) -> bool,
    {
        let mut out: Vec<Booking> = self
            .bookings
            .iter()
            .filter(|entry| keep(entry.value()))
            .map(|entry| entry.value().clone())
            .collect();
        out.sort_by_key(|b| b.window.start);
        if !ascending {
            out.reverse();
        }
        out
    }
}

impl BookingStore for InMemoryBookingStore {
    fn insert(&self, booking: Booking) {
        self.bookings.insert(booking.id, booking);
    }

    fn get(&self, id: &Uuid) -> Option<Booking> {
        self.bookings.get(id).map(|entry| entry.value().clone())
    }

    fn set_status(&self, id: &Uuid, status: BookingStatus) -> Option<Booking> {
        let mut entry = self.bookings.get_mut(id)?;
        entry.value_mut().status = status;
        Some(entry.value().clone())
    }

    fn by_booker(&self, booker_id: &Uuid) -> Vec<Booking> {
        self.collect_sorted(|b| b.booker_id == *booker_id, false)
    }

    fn by_items(&self, item_ids: &[Uuid]) -> Vec<Booking> {
        self.collect_sorted(|b| item_ids.contains(&b.item_id), false)
    }

    fn for_item(&self, item_id: &Uuid) -> Vec<Booking> {
        self.collect_sorted(|b| b.item_id == *item_id, true)
    }

    fn approved_for_item(&self, item_id: &Uuid) -> Vec<Booking> {
        self.collect_sorted(
            |b| b.item_id == *item_id && b.status == BookingStatus::Approved,
            true,
        )
    }

    fn earliest_approved_for(&self, item_id: &Uuid, booker_id: &Uuid) -> Option<Booking> {
        self.collect_sorted(
            |b| {
                b.item_id == *item_id
                    && b.booker_id == *booker_id
                    && b.status == BookingStatus::Approved
            },
            true,
        )
        .into_iter()
        .next()
    }
}

impl std::fmt::Debug for InMemoryBookingStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryBookingStore")
            .field("bookings_count", &self.bookings.len())
            .finish()
    }
}
