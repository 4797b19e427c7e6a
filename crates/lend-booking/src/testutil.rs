//! Shared test fixtures for the reservation engine.

use std::sync::Arc;

use chrono::{DateTime, Duration, TimeZone, Utc};
use lend_core::{Clock, FixedClock};
use uuid::Uuid;

use crate::directory::InMemoryDirectory;
use crate::engine::{BookingEngine, NewBooking};
use crate::store::InMemoryBookingStore;

pub(crate) struct Fixture {
    pub engine: BookingEngine,
    pub directory: Arc<InMemoryDirectory>,
    pub clock: Arc<FixedClock>,
    pub owner: Uuid,
    pub renter: Uuid,
    pub item: Uuid,
}

/// One owner, one renter, one available item, clock pinned to
/// 2026-03-01T12:00:00Z.
pub(crate) fn fixture() -> Fixture {
    let store = Arc::new(InMemoryBookingStore::new());
    let directory = Arc::new(InMemoryDirectory::new());
    let clock = Arc::new(FixedClock::new(
        Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap(),
    ));
    let owner = directory.add_user();
    let renter = directory.add_user();
    let item = directory.add_item(owner, true);
    let engine = BookingEngine::new(store, directory.clone(), clock.clone());
    Fixture {
        engine,
        directory,
        clock,
        owner,
        renter,
        item,
    }
}

impl Fixture {
    /// Reservation request for the fixture item, bounds in whole days
    /// relative to the pinned clock.
    pub(crate) fn request(&self, start_days: i64, end_days: i64) -> NewBooking {
        self.request_for(self.item, start_days, end_days)
    }

    pub(crate) fn request_for(&self, item_id: Uuid, start_days: i64, end_days: i64) -> NewBooking {
        let now: DateTime<Utc> = self.clock.now();
        NewBooking {
            item_id,
            start: now + Duration::days(start_days),
            end: now + Duration::days(end_days),
        }
    }
}
