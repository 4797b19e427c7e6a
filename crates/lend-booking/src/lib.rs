//! # lend-booking — Reservation Engine
//!
//! The core of the Lend stack: the lifecycle of a [`model::Booking`]
//! (WAITING → APPROVED | REJECTED), temporal-overlap validation against
//! approved reservations, state-filtered listing for renters and owners,
//! and the last/next booking projection owners see on their items.
//!
//! ## Architecture
//!
//! The [`engine::BookingEngine`] owns all booking mutation. It is wired
//! with three injected collaborators:
//!
//! - a [`store::BookingStore`] holding the booking records,
//! - a [`directory::PartyDirectory`] resolving users and items,
//! - a [`lend_core::Clock`] supplying the current instant.
//!
//! Validation and classification are pure computation over data already
//! fetched; the only shared mutable resource is the booking store, and
//! the only writers are [`engine::BookingEngine::create`] and
//! [`engine::BookingEngine::decide`].
//!
//! ## Concurrency
//!
//! Approval re-runs the overlap check against the *current* approved set
//! under a per-item lock, so two concurrent approvals of overlapping
//! WAITING bookings cannot both succeed. See [`engine`].

pub mod directory;
pub mod eligibility;
pub mod engine;
pub mod error;
pub mod model;
pub mod overlap;
pub mod projector;
pub mod query;
pub mod store;

#[cfg(test)]
pub(crate) mod testutil;

pub use directory::{InMemoryDirectory, ItemSummary, PartyDirectory};
pub use engine::{BookingEngine, NewBooking};
pub use error::BookingError;
pub use model::{Booking, BookingRole, BookingStatus, PageRequest, StateFilter};
pub use projector::{BookingRef, ItemBookingView};
pub use store::{BookingStore, InMemoryBookingStore};
