//! Shared application state.

use std::sync::Arc;

use lend_booking::{BookingEngine, InMemoryBookingStore};
use lend_core::{Clock, SystemClock};
use sqlx::PgPool;

use crate::registry::SharingRegistry;

/// State shared by all request handlers.
///
/// The registry and booking store are the source of truth at runtime;
/// the pool, when present, is a write-through journal that survives
/// restarts (see [`crate::db`]). Cloning is cheap, everything inside is
/// an `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<BookingEngine>,
    pub registry: Arc<SharingRegistry>,
    pub bookings: Arc<InMemoryBookingStore>,
    pub db_pool: Option<PgPool>,
}

impl AppState {
    /// Fresh state on the system clock, no persistence.
    pub fn new() -> Self {
        Self::build(None, Arc::new(SystemClock))
    }

    /// Fresh state with a write-through Postgres pool.
    pub fn with_pool(pool: PgPool) -> Self {
        Self::build(Some(pool), Arc::new(SystemClock))
    }

    /// Fresh state on an injected clock; used by tests to pin time.
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self::build(None, clock)
    }

    fn build(db_pool: Option<PgPool>, clock: Arc<dyn Clock>) -> Self {
        let registry = Arc::new(SharingRegistry::new());
        let bookings = Arc::new(InMemoryBookingStore::new());
        let engine = Arc::new(BookingEngine::new(
            bookings.clone(),
            registry.clone(),
            clock,
        ));
        Self {
            engine,
            registry,
            bookings,
            db_pool,
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
