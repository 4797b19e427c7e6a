//! Reservation engine error taxonomy.
//!
//! Every business-rule rejection surfaces as its own [`BookingError`]
//! kind so the HTTP boundary can map each to a distinct machine code.
//! None of these are retried internally; they are verdicts, not faults.

use lend_core::WindowViolation;
use thiserror::Error;
use uuid::Uuid;

use crate::model::BookingRole;

/// Typed failure of a reservation-engine operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BookingError {
    /// Referenced user does not exist.
    #[error("user {0} not found")]
    UserNotFound(Uuid),

    /// Referenced item does not exist.
    #[error("item {0} not found")]
    ItemNotFound(Uuid),

    /// Referenced booking does not exist.
    #[error("booking {0} not found")]
    BookingNotFound(Uuid),

    /// Candidate window fails ordering or past-dating rules.
    #[error("invalid booking window: {0}")]
    InvalidWindow(WindowViolation),

    /// A renter may not book their own item.
    #[error("user {user_id} owns item {item_id} and cannot book it")]
    SelfBookingDenied { item_id: Uuid, user_id: Uuid },

    /// The item's availability flag is off.
    #[error("item {0} is not available for booking")]
    ItemUnavailable(Uuid),

    /// Candidate window overlaps an approved booking for the same item,
    /// at creation or at approval time.
    #[error("requested window overlaps an approved booking for item {0}")]
    WindowConflict(Uuid),

    /// Caller is neither the booker nor the item owner.
    #[error("user {user_id} is neither the booker nor the item owner for booking {booking_id}")]
    NotAuthorized { booking_id: Uuid, user_id: Uuid },

    /// Decision attempted by someone other than the item owner.
    #[error("item {item_id} does not belong to user {user_id}")]
    NotItemOwner { item_id: Uuid, user_id: Uuid },

    /// Decision requested on a booking that was already approved.
    #[error("booking {0} was already approved")]
    AlreadyApproved(Uuid),

    /// Decision requested on a booking that was already rejected.
    #[error("booking {0} was already rejected")]
    AlreadyRejected(Uuid),

    /// The party has no booking history at all in the requested role.
    /// Absence of *any* history is an error; an empty filtered page over
    /// a nonempty history is not.
    #[error("user {user_id} has no bookings as {role}")]
    NoBookingHistory { user_id: Uuid, role: BookingRole },

    /// Comment gate: no approved booking for (item, author).
    #[error("user {user_id} has never had an approved booking for item {item_id}")]
    NoEligibleBooking { item_id: Uuid, user_id: Uuid },

    /// Comment gate: the qualifying booking has not started yet.
    #[error("user {user_id} cannot review item {item_id} before the booking starts")]
    BookingNotYetStarted { item_id: Uuid, user_id: Uuid },
}

impl BookingError {
    /// True for the two terminal-state rejections of `decide`.
    pub fn is_already_decided(&self) -> bool {
        matches!(self, Self::AlreadyApproved(_) | Self::AlreadyRejected(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn already_decided_covers_both_terminal_states() {
        let id = Uuid::new_v4();
        assert!(BookingError::AlreadyApproved(id).is_already_decided());
        assert!(BookingError::AlreadyRejected(id).is_already_decided());
        assert!(!BookingError::BookingNotFound(id).is_already_decided());
    }

    #[test]
    fn terminal_state_messages_are_distinct() {
        let id = Uuid::new_v4();
        let approved = BookingError::AlreadyApproved(id).to_string();
        let rejected = BookingError::AlreadyRejected(id).to_string();
        assert!(approved.contains("already approved"));
        assert!(rejected.contains("already rejected"));
        assert_ne!(approved, rejected);
    }

    #[test]
    fn history_message_names_the_role() {
        let user_id = Uuid::new_v4();
        let renter = BookingError::NoBookingHistory {
            user_id,
            role: BookingRole::Renter,
        };
        let owner = BookingError::NoBookingHistory {
            user_id,
            role: BookingRole::Owner,
        };
        assert!(renter.to_string().ends_with("as renter"));
        assert!(owner.to_string().ends_with("as owner"));
    }
}
