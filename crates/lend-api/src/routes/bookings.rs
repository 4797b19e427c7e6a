//! # Booking Endpoints
//!
//! The reservation surface: renters place WAITING bookings, owners
//! decide them once, both sides read them back, and each role has a
//! state-filtered listing.
//!
//! | Method | Path | Handler |
//! |--------|------|---------|
//! | `POST` | `/bookings` | `create_booking` |
//! | `PATCH` | `/bookings/:booking_id?approved=` | `decide_booking` |
//! | `GET` | `/bookings/:booking_id` | `get_booking` |
//! | `GET` | `/bookings?state=&from=&size=` | `list_renter_bookings` |
//! | `GET` | `/bookings/owner?state=&from=&size=` | `list_owner_bookings` |

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use lend_booking::{Booking, BookingRole, NewBooking, StateFilter};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::db;
use crate::error::AppError;
use crate::extractors::SharerId;
use crate::routes::PageParams;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request to reserve an item for a `[start, end)` window.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct CreateBookingRequest {
    pub item_id: Uuid,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// Owner's verdict, carried as a query parameter.
#[derive(Debug, Deserialize)]
pub struct DecisionParams {
    pub approved: bool,
}

/// State filter plus pagination for the listing endpoints.
///
/// `from`/`size` are spelled out rather than flattened: serde's flatten
/// buffers values as strings, which breaks integer query parameters
/// under `serde_urlencoded`.
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub state: Option<String>,
    pub from: Option<i64>,
    pub size: Option<i64>,
}

/// A booking as returned by the API.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct BookingResponse {
    pub id: Uuid,
    pub item_id: Uuid,
    pub booker_id: Uuid,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    /// "WAITING", "APPROVED", or "REJECTED".
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl From<Booking> for BookingResponse {
    fn from(b: Booking) -> Self {
        Self {
            id: b.id,
            item_id: b.item_id,
            booker_id: b.booker_id,
            start: b.window.start,
            end: b.window.end,
            status: b.status.to_string(),
            created_at: b.created_at,
        }
    }
}

// ---------------------------------------------------------------------------
// Router
// ---------------------------------------------------------------------------

/// Build the booking router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/bookings",
            axum::routing::post(create_booking).get(list_renter_bookings),
        )
        .route("/bookings/owner", get(list_owner_bookings))
        .route(
            "/bookings/:booking_id",
            get(get_booking).patch(decide_booking),
        )
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /bookings — Reserve an item; the booking starts WAITING.
#[utoipa::path(
    post,
    path = "/bookings",
    request_body = CreateBookingRequest,
    responses(
        (status = 201, description = "Booking created", body = BookingResponse),
        (status = 404, description = "Unknown item or booker, or booker owns the item", body = crate::error::ErrorBody),
        (status = 409, description = "Window overlaps an approved booking", body = crate::error::ErrorBody),
        (status = 422, description = "Invalid window or unavailable item", body = crate::error::ErrorBody),
    ),
    tag = "bookings"
)]
pub async fn create_booking(
    State(state): State<AppState>,
    SharerId(booker_id): SharerId,
    Json(req): Json<CreateBookingRequest>,
) -> Result<impl IntoResponse, AppError> {
    let booking = state.engine.create(
        booker_id,
        NewBooking {
            item_id: req.item_id,
            start: req.start,
            end: req.end,
        },
    )?;

    if let Some(ref pool) = state.db_pool {
        db::bookings::save_booking(pool, &booking).await?;
    }

    Ok((StatusCode::CREATED, Json(BookingResponse::from(booking))))
}

/// PATCH /bookings/:booking_id?approved= — Owner's one-shot decision.
#[utoipa::path(
    patch,
    path = "/bookings/{booking_id}",
    params(
        ("booking_id" = Uuid, Path, description = "Booking id"),
        ("approved" = bool, Query, description = "true approves, false rejects"),
    ),
    responses(
        (status = 200, description = "Decided booking", body = BookingResponse),
        (status = 404, description = "Unknown booking, or caller is not the owner", body = crate::error::ErrorBody),
        (status = 409, description = "Already decided, or the window was claimed meanwhile", body = crate::error::ErrorBody),
    ),
    tag = "bookings"
)]
pub async fn decide_booking(
    State(state): State<AppState>,
    SharerId(decider_id): SharerId,
    Path(booking_id): Path<Uuid>,
    Query(params): Query<DecisionParams>,
) -> Result<Json<BookingResponse>, AppError> {
    let booking = state.engine.decide(booking_id, decider_id, params.approved)?;

    if let Some(ref pool) = state.db_pool {
        db::bookings::save_booking(pool, &booking).await?;
    }

    Ok(Json(BookingResponse::from(booking)))
}

/// GET /bookings/:booking_id — Fetch one booking.
///
/// Visible to the booker and the item owner; everyone else gets 404.
#[utoipa::path(
    get,
    path = "/bookings/{booking_id}",
    params(("booking_id" = Uuid, Path, description = "Booking id")),
    responses(
        (status = 200, description = "The booking", body = BookingResponse),
        (status = 404, description = "Unknown booking or caller not involved", body = crate::error::ErrorBody),
    ),
    tag = "bookings"
)]
pub async fn get_booking(
    State(state): State<AppState>,
    SharerId(requester_id): SharerId,
    Path(booking_id): Path<Uuid>,
) -> Result<Json<BookingResponse>, AppError> {
    let booking = state.engine.get(booking_id, requester_id)?;
    Ok(Json(BookingResponse::from(booking)))
}

/// GET /bookings — The calling renter's bookings, newest start first.
#[utoipa::path(
    get,
    path = "/bookings",
    params(
        ("state" = Option<String>, Query, description = "ALL, CURRENT, PAST, FUTURE, WAITING, or REJECTED"),
        ("from" = Option<i64>, Query, description = "Pagination seed; page index is from / size"),
        ("size" = Option<i64>, Query, description = "Page size"),
    ),
    responses(
        (status = 200, description = "Filtered bookings", body = [BookingResponse]),
        (status = 404, description = "Unknown user or no booking history", body = crate::error::ErrorBody),
        (status = 422, description = "Unrecognized state filter or bad pagination", body = crate::error::ErrorBody),
    ),
    tag = "bookings"
)]
pub async fn list_renter_bookings(
    State(state): State<AppState>,
    SharerId(user_id): SharerId,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<BookingResponse>>, AppError> {
    list_bookings(&state, user_id, BookingRole::Renter, params)
}

/// GET /bookings/owner — Bookings against the caller's items.
#[utoipa::path(
    get,
    path = "/bookings/owner",
    params(
        ("state" = Option<String>, Query, description = "ALL, CURRENT, PAST, FUTURE, WAITING, or REJECTED"),
        ("from" = Option<i64>, Query, description = "Pagination seed; page index is from / size"),
        ("size" = Option<i64>, Query, description = "Page size"),
    ),
    responses(
        (status = 200, description = "Filtered bookings", body = [BookingResponse]),
        (status = 404, description = "Unknown user or no booking history", body = crate::error::ErrorBody),
        (status = 422, description = "Unrecognized state filter or bad pagination", body = crate::error::ErrorBody),
    ),
    tag = "bookings"
)]
pub async fn list_owner_bookings(
    State(state): State<AppState>,
    SharerId(user_id): SharerId,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<BookingResponse>>, AppError> {
    list_bookings(&state, user_id, BookingRole::Owner, params)
}

fn list_bookings(
    state: &AppState,
    user_id: Uuid,
    role: BookingRole,
    params: ListParams,
) -> Result<Json<Vec<BookingResponse>>, AppError> {
    let filter = match params.state.as_deref() {
        None => StateFilter::default(),
        Some(raw) => raw
            .parse::<StateFilter>()
            .map_err(|e| AppError::Validation(e.to_string()))?,
    };
    let page = PageParams {
        from: params.from,
        size: params.size,
    }
    .into_page()?;

    let bookings = state.engine.list(user_id, role, filter, page)?;
    Ok(Json(
        bookings.into_iter().map(BookingResponse::from).collect(),
    ))
}
