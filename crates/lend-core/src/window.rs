//! Closed-open booking windows.
//!
//! A [`BookingWindow`] is the `[start, end)` interval a booking claims.
//! Overlap between two windows is the closed-form intersection test
//! `s1 < e2 && s2 < e1`; classification against an instant partitions
//! well-formed windows into exactly one of past, current, or future.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why a candidate window is unacceptable at creation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum WindowViolation {
    /// `end` is not strictly after `start`.
    #[error("end is not after start")]
    EndNotAfterStart,
    /// `start` is not strictly in the future.
    #[error("start is in the past")]
    StartInPast,
    /// `end` is not strictly in the future.
    #[error("end is in the past")]
    EndInPast,
}

/// A half-open `[start, end)` time interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl BookingWindow {
    /// Build a window without validating it. Validation happens against a
    /// clock instant via [`BookingWindow::violation`].
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    /// First rule this window breaks when proposed at `now`, if any.
    ///
    /// Checked in order: ordering, past-dated start, past-dated end.
    pub fn violation(&self, now: DateTime<Utc>) -> Option<WindowViolation> {
        if self.end <= self.start {
            return Some(WindowViolation::EndNotAfterStart);
        }
        if self.start <= now {
            return Some(WindowViolation::StartInPast);
        }
        if self.end <= now {
            return Some(WindowViolation::EndInPast);
        }
        None
    }

    /// Closed-form intersection test for half-open intervals.
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// `start < now < end`.
    pub fn is_current(&self, now: DateTime<Utc>) -> bool {
        self.start < now && now < self.end
    }

    /// `end < now`.
    pub fn is_past(&self, now: DateTime<Utc>) -> bool {
        self.end < now
    }

    /// `start > now`.
    pub fn is_future(&self, now: DateTime<Utc>) -> bool {
        self.start > now
    }
}
