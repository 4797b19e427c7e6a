//! Injected time source.
//!
//! Every temporal rule in the reservation engine (window validity, the
//! CURRENT/PAST/FUTURE classification, the last/next projection, the
//! comment gate) is evaluated against an instant supplied by a [`Clock`],
//! never against an ambient `Utc::now()` read. Tests supply a
//! [`FixedClock`] and advance it explicitly.

use chrono::{DateTime, Duration, Utc};
use parking_lot::RwLock;

/// Supplies the current instant.
pub trait Clock: Send + Sync {
    /// The current UTC instant.
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time source used in production.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Deterministic time source for tests.
///
/// Starts at a caller-chosen instant and only moves when told to.
#[derive(Debug)]
pub struct FixedClock {
    now: RwLock<DateTime<Utc>>,
}

impl FixedClock {
    /// Create a clock pinned to `instant`.
    pub fn new(instant: DateTime<Utc>) -> Self {
        Self {
            now: RwLock::new(instant),
        }
    }

    /// Replace the pinned instant.
    pub fn set(&self, instant: DateTime<Utc>) {
        *self.now.write() = instant;
    }

    /// Move the pinned instant forward by `delta`.
    pub fn advance(&self, delta: Duration) {
        let mut now = self.now.write();
        *now += delta;
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.read()
    }
}
