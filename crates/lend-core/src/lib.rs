//! # lend-core — Foundational Types for the Lend Stack
//!
//! Leaf crate of the workspace DAG. It defines the two primitives every
//! temporal decision in the reservation engine is built on:
//!
//! 1. **Injected clock.** All "now" reads flow through the [`Clock`] trait.
//!    Production code uses [`SystemClock`]; tests pin instants with
//!    [`FixedClock`]. No `Utc::now()` calls are scattered through
//!    validation logic.
//!
//! 2. **Closed-open windows.** [`BookingWindow`] models a `[start, end)`
//!    interval with the overlap test and CURRENT/PAST/FUTURE
//!    classification used by the reservation engine.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `lend-*` crates.
//! - No `unsafe` code, no `panic!()`/`.unwrap()` outside tests.

pub mod clock;
pub mod window;

pub use clock::{Clock, FixedClock, SystemClock};
pub use window::{BookingWindow, WindowViolation};
