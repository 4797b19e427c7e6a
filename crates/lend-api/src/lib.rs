//! # lend-api — Axum HTTP Service for the Lend Stack
//!
//! Item sharing with owner-approved bookings. The service exposes a
//! user and item catalogue, item requests with answering items, the
//! booking reservation lifecycle, filtered booking listings for renters
//! and owners, owner item views with last/next booking projections, and
//! rental-gated comments.
//!
//! ## API Surface
//!
//! | Prefix | Module | Domain |
//! |--------|--------|--------|
//! | `/users` | [`routes::users`] | Registration and lookup |
//! | `/items` | [`routes::items`] | Catalogue, projections, comments |
//! | `/requests` | [`routes::requests`] | Item requests and their answers |
//! | `/bookings` | [`routes::bookings`] | Reservation lifecycle |
//!
//! Caller identity is the `X-Sharer-User-Id` header on the item,
//! request, and booking routes. The `/users` routes, health probes
//! (`/health/*`), and `/openapi.json` take no identity.

pub mod db;
pub mod error;
pub mod extractors;
pub mod openapi;
pub mod registry;
pub mod routes;
pub mod state;

use axum::extract::{DefaultBodyLimit, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Assemble the full application router.
///
/// Health probes are mounted beside the API routes; readiness checks
/// actual service health including the database when configured.
///
/// Body size limit: 2 MiB. Request bodies here are small JSON documents;
/// anything larger is a client defect.
pub fn app(state: AppState) -> Router {
    let api = Router::new()
        .merge(routes::users::router())
        .merge(routes::items::router())
        .merge(routes::requests::router())
        .merge(routes::bookings::router())
        .merge(openapi::router())
        .layer(DefaultBodyLimit::max(2 * 1024 * 1024))
        .layer(TraceLayer::new_for_http())
        .with_state(state.clone());

    let health = Router::new()
        .route("/health/liveness", axum::routing::get(liveness))
        .route("/health/readiness", axum::routing::get(readiness))
        .with_state(state);

    Router::new().merge(health).merge(api)
}

/// Liveness probe — always returns 200 if the process is running.
async fn liveness() -> &'static str {
    "ok"
}

/// Readiness probe — verifies the application is ready to serve traffic.
///
/// Checks the in-memory stores are accessible and, when a pool is
/// configured, that the database answers. Returns 200 "ready" or 503
/// with a diagnostic message.
async fn readiness(State(state): State<AppState>) -> impl IntoResponse {
    let _ = state.bookings.len();
    let _ = state.registry.list_users().len();

    if let Some(pool) = &state.db_pool {
        if let Err(e) = sqlx::query("SELECT 1").execute(pool).await {
            tracing::warn!("Database health check failed: {e}");
            return (StatusCode::SERVICE_UNAVAILABLE, "database unreachable").into_response();
        }
    }

    (StatusCode::OK, "ready").into_response()
}
