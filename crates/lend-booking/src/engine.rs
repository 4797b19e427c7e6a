//! Booking lifecycle state machine.
//!
//! [`BookingEngine`] owns all booking mutation: `create` admits a new
//! WAITING booking after the five-step validation gauntlet, and `decide`
//! moves it exactly once to APPROVED or REJECTED. Reads (`get`, the
//! query, projection and eligibility modules) hang off the same engine
//! so every consumer shares one store, directory, and clock.
//!
//! ## Decision serialization
//!
//! `create` only screens against APPROVED bookings, so overlapping
//! WAITING requests are allowed to coexist; exclusivity is enforced at
//! approval. To keep two concurrent approvals for the same item from
//! both committing, `decide` holds a per-item mutex across the
//! status-guard → overlap-re-check → commit sequence.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use lend_core::{BookingWindow, Clock};
use parking_lot::Mutex;
use uuid::Uuid;

use crate::directory::PartyDirectory;
use crate::error::BookingError;
use crate::model::{Booking, BookingStatus};
use crate::overlap;
use crate::store::BookingStore;

/// A renter's reservation request.
#[derive(Debug, Clone, Copy)]
pub struct NewBooking {
    pub item_id: Uuid,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// The reservation engine.
pub struct BookingEngine {
    store: Arc<dyn BookingStore>,
    directory: Arc<dyn PartyDirectory>,
    clock: Arc<dyn Clock>,
    decision_locks: DashMap<Uuid, Arc<Mutex<()>>>,
}

impl BookingEngine {
    pub fn new(
        store: Arc<dyn BookingStore>,
        directory: Arc<dyn PartyDirectory>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            store,
            directory,
            clock,
            decision_locks: DashMap::new(),
        }
    }

    pub(crate) fn store(&self) -> &dyn BookingStore {
        self.store.as_ref()
    }

    pub(crate) fn directory(&self) -> &dyn PartyDirectory {
        self.directory.as_ref()
    }

    pub(crate) fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// Create a WAITING booking for `booker_id`.
    ///
    /// Checks, first failure wins: item exists, booker exists, window is
    /// well-formed and future-dated, booker is not the owner, item is
    /// available, window does not overlap an approved booking. The item's
    /// availability flag is not touched — it belongs to item management.
    pub fn create(&self, booker_id: Uuid, request: NewBooking) -> Result<Booking, BookingError> {
        let item = self
            .directory
            .item(&request.item_id)
            .ok_or(BookingError::ItemNotFound(request.item_id))?;

        if !self.directory.party_exists(&booker_id) {
            return Err(BookingError::UserNotFound(booker_id));
        }

        let window = BookingWindow::new(request.start, request.end);
        if let Some(violation) = window.violation(self.clock.now()) {
            return Err(BookingError::InvalidWindow(violation));
        }

        if booker_id == item.owner_id {
            return Err(BookingError::SelfBookingDenied {
                item_id: item.id,
                user_id: booker_id,
            });
        }

        if !item.available {
            return Err(BookingError::ItemUnavailable(item.id));
        }

        let approved = self.store.approved_for_item(&item.id);
        if overlap::conflicts_with_approved(&window, &approved) {
            return Err(BookingError::WindowConflict(item.id));
        }

        let booking = Booking {
            id: Uuid::new_v4(),
            item_id: item.id,
            booker_id,
            window,
            status: BookingStatus::Waiting,
            created_at: self.clock.now(),
        };
        self.store.insert(booking.clone());
        tracing::info!(
            booking_id = %booking.id,
            item_id = %item.id,
            booker_id = %booker_id,
            "booking request saved"
        );
        Ok(booking)
    }

    /// Resolve a WAITING booking to APPROVED or REJECTED.
    ///
    /// Only the item owner may decide, and only once. Approval re-runs
    /// the overlap check against the current approved set under the
    /// item's decision lock, so a concurrent approval that has since
    /// claimed the window turns this one into a `WindowConflict`.
    pub fn decide(
        &self,
        booking_id: Uuid,
        decider_id: Uuid,
        approve: bool,
    ) -> Result<Booking, BookingError> {
        let booking = self
            .store
            .get(&booking_id)
            .ok_or(BookingError::BookingNotFound(booking_id))?;
        let item = self
            .directory
            .item(&booking.item_id)
            .ok_or(BookingError::ItemNotFound(booking.item_id))?;

        if decider_id != item.owner_id {
            return Err(BookingError::NotItemOwner {
                item_id: item.id,
                user_id: decider_id,
            });
        }

        let lock = self.decision_lock(item.id);
        let _guard = lock.lock();

        // Re-read under the lock: a concurrent decision may have landed.
        let booking = self
            .store
            .get(&booking_id)
            .ok_or(BookingError::BookingNotFound(booking_id))?;
        match booking.status {
            BookingStatus::Approved => return Err(BookingError::AlreadyApproved(booking_id)),
            BookingStatus::Rejected => return Err(BookingError::AlreadyRejected(booking_id)),
            BookingStatus::Waiting => {}
        }

        let next = if approve {
            let approved = self.store.approved_for_item(&item.id);
            if overlap::conflicts_with_approved(&booking.window, &approved) {
                return Err(BookingError::WindowConflict(item.id));
            }
            BookingStatus::Approved
        } else {
            BookingStatus::Rejected
        };

        let updated = self
            .store
            .set_status(&booking_id, next)
            .ok_or(BookingError::BookingNotFound(booking_id))?;
        tracing::info!(
            booking_id = %booking_id,
            owner_id = %decider_id,
            status = %next,
            "booking decided"
        );
        Ok(updated)
    }

    /// Fetch a booking, visible only to its booker or the item owner.
    pub fn get(&self, booking_id: Uuid, requester_id: Uuid) -> Result<Booking, BookingError> {
        let booking = self
            .store
            .get(&booking_id)
            .ok_or(BookingError::BookingNotFound(booking_id))?;
        let item = self
            .directory
            .item(&booking.item_id)
            .ok_or(BookingError::ItemNotFound(booking.item_id))?;

        if requester_id != booking.booker_id && requester_id != item.owner_id {
            return Err(BookingError::NotAuthorized {
                booking_id,
                user_id: requester_id,
            });
        }
        Ok(booking)
    }

    fn decision_lock(&self, item_id: Uuid) -> Arc<Mutex<()>> {
        self.decision_locks
            .entry(item_id)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }
}

impl std::fmt::Debug for BookingEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BookingEngine")
            .field("decision_locks", &self.decision_locks.len())
            .finish()
    }
}
