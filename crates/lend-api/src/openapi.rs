//! # OpenAPI Specification Assembly
//!
//! Assembles all utoipa-documented routes into a single OpenAPI spec,
//! served at `/openapi.json`.

use axum::routing::get;
use axum::{Json, Router};
use utoipa::OpenApi;

use crate::state::AppState;

/// Assembled OpenAPI spec for the entire API surface.
///
/// Registers all utoipa-documented routes, schemas, and tags. Serves as
/// the single source of truth for integrators.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Lend API — Item Sharing & Booking",
        version = "0.3.2",
        description = "HTTP service for the Lend stack: user and item catalogue, \
            item requests with answering items, booking reservations with owner \
            approval, state-filtered booking listings, owner item views with \
            last/next booking projections, and rental-gated item comments.\n\n\
            Caller identity is the `X-Sharer-User-Id` header (UUID) on the \
            item, request, and booking routes. The `/users` routes and health \
            probes (`/health/*`) need no identity.",
        license(name = "MIT"),
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server"),
    ),
    paths(
        // ── Users ───────────────────────────────────────────────────────
        crate::routes::users::create_user,
        crate::routes::users::list_users,
        crate::routes::users::get_user,
        // ── Items ───────────────────────────────────────────────────────
        crate::routes::items::create_item,
        crate::routes::items::list_items,
        crate::routes::items::get_item,
        crate::routes::items::update_item,
        crate::routes::items::add_comment,
        // ── Requests ────────────────────────────────────────────────────
        crate::routes::requests::create_request,
        crate::routes::requests::list_own_requests,
        crate::routes::requests::list_other_requests,
        crate::routes::requests::get_request,
        // ── Bookings ────────────────────────────────────────────────────
        crate::routes::bookings::create_booking,
        crate::routes::bookings::decide_booking,
        crate::routes::bookings::get_booking,
        crate::routes::bookings::list_renter_bookings,
        crate::routes::bookings::list_owner_bookings,
    ),
    components(
        schemas(
            // ── Error types ─────────────────────────────────────────────
            crate::error::ErrorBody,
            crate::error::ErrorDetail,
            // ── User DTOs ───────────────────────────────────────────────
            crate::routes::users::CreateUserRequest,
            crate::routes::users::UserResponse,
            // ── Item DTOs ───────────────────────────────────────────────
            crate::routes::items::CreateItemRequest,
            crate::routes::items::UpdateItemRequest,
            crate::routes::items::AddCommentRequest,
            crate::routes::items::ItemResponse,
            crate::routes::items::BookingRefDto,
            crate::routes::items::CommentResponse,
            // ── Request DTOs ────────────────────────────────────────────
            crate::routes::requests::CreateRequestRequest,
            crate::routes::requests::RequestResponse,
            crate::routes::requests::AnsweringItemDto,
            // ── Booking DTOs ────────────────────────────────────────────
            crate::routes::bookings::CreateBookingRequest,
            crate::routes::bookings::BookingResponse,
        ),
    ),
    tags(
        (name = "users", description = "User registration and lookup"),
        (name = "items", description = "Item catalogue, owner projections, and rental-gated comments"),
        (name = "requests", description = "Item requests and the items answering them"),
        (name = "bookings", description = "Reservation lifecycle — create, decide, read, and filtered listings"),
    )
)]
pub struct ApiDoc;

/// Build the OpenAPI router.
pub fn router() -> Router<AppState> {
    Router::new().route("/openapi.json", get(openapi_json))
}

/// GET /openapi.json — Return the generated OpenAPI specification.
async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
