//! Booking records and the closed query vocabulary.
//!
//! [`StateFilter`] is a closed enum matched exhaustively — filter strings
//! are parsed once at the boundary and fail closed on anything
//! unrecognized, so no stringly-typed "unsupported status" path survives
//! past parsing.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use lend_core::BookingWindow;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Lifecycle state of a booking. `Waiting` is initial; the other two are
/// terminal — no transition leaves them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingStatus {
    Waiting,
    Approved,
    Rejected,
}

impl BookingStatus {
    /// Wire/database representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Waiting => "WAITING",
            Self::Approved => "APPROVED",
            Self::Rejected => "REJECTED",
        }
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The vantage point a booking list is requested from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingRole {
    /// The party that placed the bookings.
    Renter,
    /// The party that owns the booked items.
    Owner,
}

impl fmt::Display for BookingRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Renter => f.write_str("renter"),
            Self::Owner => f.write_str("owner"),
        }
    }
}

/// A reservation of an item for a `[start, end)` window by a renter,
/// subject to owner approval.
///
/// `id` is assigned at creation and immutable; `window` never changes
/// after creation; `status` changes exactly once, via the owner's
/// decision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    pub id: Uuid,
    pub item_id: Uuid,
    pub booker_id: Uuid,
    #[serde(flatten)]
    pub window: BookingWindow,
    pub status: BookingStatus,
    pub created_at: DateTime<Utc>,
}

/// Requested state filter for booking listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StateFilter {
    #[default]
    All,
    Current,
    Past,
    Future,
    Waiting,
    Rejected,
}

/// Unrecognized state filter string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown state filter: {0}")]
pub struct UnknownStateFilter(pub String);

impl FromStr for StateFilter {
    type Err = UnknownStateFilter;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "ALL" => Ok(Self::All),
            "CURRENT" => Ok(Self::Current),
            "PAST" => Ok(Self::Past),
            "FUTURE" => Ok(Self::Future),
            "WAITING" => Ok(Self::Waiting),
            "REJECTED" => Ok(Self::Rejected),
            _ => Err(UnknownStateFilter(s.to_string())),
        }
    }
}

impl StateFilter {
    /// Does `booking` fall under this filter when evaluated at `now`?
    ///
    /// `Current`/`Past`/`Future` classify by the booking window against
    /// `now`; `Waiting`/`Rejected` classify by status; `All` admits
    /// everything.
    pub fn matches(&self, booking: &Booking, now: DateTime<Utc>) -> bool {
        match self {
            Self::All => true,
            Self::Current => booking.window.is_current(now),
            Self::Past => booking.window.is_past(now),
            Self::Future => booking.window.is_future(now),
            Self::Waiting => booking.status == BookingStatus::Waiting,
            Self::Rejected => booking.status == BookingStatus::Rejected,
        }
    }
}

/// Pagination request carried as a `from`/`size` pair.
///
/// `from` is interpreted as a **page index seed, not a row offset**: the
/// returned page is page number `from / size` (integer division) of the
/// filtered sequence. `from=2, size=2` therefore yields the second page,
/// not rows 2..4. Existing callers depend on this reading; treat it as
/// load-bearing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    from: u32,
    size: u32,
}

/// Invalid pagination parameters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PageRequestError {
    #[error("size must be positive")]
    ZeroSize,
}

impl PageRequest {
    /// Build a page request; `size` must be positive.
    pub fn new(from: u32, size: u32) -> Result<Self, PageRequestError> {
        if size == 0 {
            return Err(PageRequestError::ZeroSize);
        }
        Ok(Self { from, size })
    }

    /// Page number selected by this request (`from / size`).
    pub fn page_index(&self) -> u32 {
        self.from / self.size
    }

    /// Rows per page.
    pub fn size(&self) -> u32 {
        self.size
    }

    /// Slice `items` down to the selected page.
    pub fn apply<T>(&self, items: Vec<T>) -> Vec<T> {
        let skip = (self.page_index() as usize) * (self.size as usize);
        items
            .into_iter()
            .skip(skip)
            .take(self.size as usize)
            .collect()
    }
}
