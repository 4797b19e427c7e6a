//! # Item Request Endpoints
//!
//! A request is a wish for an item nobody has listed yet. Other sharers
//! answer it by listing an item with a `request_id` link; every request
//! read carries the items answering it.
//!
//! | Method | Path | Handler |
//! |--------|------|---------|
//! | `POST` | `/requests` | `create_request` |
//! | `GET` | `/requests` | `list_own_requests` |
//! | `GET` | `/requests/all` | `list_other_requests` |
//! | `GET` | `/requests/:request_id` | `get_request` |

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use lend_booking::BookingError;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::db;
use crate::error::AppError;
use crate::extractors::SharerId;
use crate::registry::{ItemRecord, RequestRecord};
use crate::routes::PageParams;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request to file an item request.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct CreateRequestRequest {
    pub description: String,
}

/// An item listed in answer to a request.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AnsweringItemDto {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub name: String,
    pub description: String,
    pub available: bool,
    pub request_id: Uuid,
}

/// An item request with the items answering it.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RequestResponse {
    pub id: Uuid,
    pub requester_id: Uuid,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub items: Vec<AnsweringItemDto>,
}

// ---------------------------------------------------------------------------
// Router
// ---------------------------------------------------------------------------

/// Build the request router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/requests", post(create_request).get(list_own_requests))
        .route("/requests/all", get(list_other_requests))
        .route("/requests/:request_id", get(get_request))
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /requests — File a request for an item.
#[utoipa::path(
    post,
    path = "/requests",
    request_body = CreateRequestRequest,
    responses(
        (status = 201, description = "Request filed", body = RequestResponse),
        (status = 404, description = "Sharer does not exist", body = crate::error::ErrorBody),
        (status = 422, description = "Blank description", body = crate::error::ErrorBody),
    ),
    tag = "requests"
)]
pub async fn create_request(
    State(state): State<AppState>,
    SharerId(requester_id): SharerId,
    Json(req): Json<CreateRequestRequest>,
) -> Result<impl IntoResponse, AppError> {
    if req.description.trim().is_empty() {
        return Err(AppError::Validation(
            "description must not be empty".to_string(),
        ));
    }
    if state.registry.user(&requester_id).is_none() {
        return Err(BookingError::UserNotFound(requester_id).into());
    }

    let record = state.registry.add_request(requester_id, req.description);
    if let Some(ref pool) = state.db_pool {
        db::requests::save_request(pool, &record).await?;
    }
    tracing::info!(request_id = %record.id, requester_id = %requester_id, "item request filed");

    Ok((StatusCode::CREATED, Json(response(&state, record))))
}

/// GET /requests — The calling sharer's own requests, oldest first.
#[utoipa::path(
    get,
    path = "/requests",
    responses(
        (status = 200, description = "The sharer's requests", body = [RequestResponse]),
        (status = 404, description = "Sharer does not exist", body = crate::error::ErrorBody),
    ),
    tag = "requests"
)]
pub async fn list_own_requests(
    State(state): State<AppState>,
    SharerId(requester_id): SharerId,
) -> Result<Json<Vec<RequestResponse>>, AppError> {
    if state.registry.user(&requester_id).is_none() {
        return Err(BookingError::UserNotFound(requester_id).into());
    }
    let responses = state
        .registry
        .requests_of(&requester_id)
        .into_iter()
        .map(|record| response(&state, record))
        .collect();
    Ok(Json(responses))
}

/// GET /requests/all — Other sharers' requests, oldest first.
///
/// The caller's own requests are excluded. `from`/`size` select a page
/// of the sequence; absent, the whole sequence is returned.
#[utoipa::path(
    get,
    path = "/requests/all",
    params(
        ("from" = Option<i64>, Query, description = "Pagination seed; page index is from / size"),
        ("size" = Option<i64>, Query, description = "Page size"),
    ),
    responses(
        (status = 200, description = "Requests filed by other sharers", body = [RequestResponse]),
        (status = 404, description = "Sharer does not exist", body = crate::error::ErrorBody),
        (status = 422, description = "Bad pagination parameters", body = crate::error::ErrorBody),
    ),
    tag = "requests"
)]
pub async fn list_other_requests(
    State(state): State<AppState>,
    SharerId(viewer_id): SharerId,
    Query(params): Query<PageParams>,
) -> Result<Json<Vec<RequestResponse>>, AppError> {
    let page = params.into_page()?;
    if state.registry.user(&viewer_id).is_none() {
        return Err(BookingError::UserNotFound(viewer_id).into());
    }

    let requests = state.registry.requests_excluding(&viewer_id);
    let requests = match page {
        Some(page) => page.apply(requests),
        None => requests,
    };
    let responses = requests
        .into_iter()
        .map(|record| response(&state, record))
        .collect();
    Ok(Json(responses))
}

/// GET /requests/:request_id — Fetch one request with its answers.
///
/// Any registered sharer may read any request.
#[utoipa::path(
    get,
    path = "/requests/{request_id}",
    params(("request_id" = Uuid, Path, description = "Request id")),
    responses(
        (status = 200, description = "The request", body = RequestResponse),
        (status = 404, description = "No such sharer or request", body = crate::error::ErrorBody),
    ),
    tag = "requests"
)]
pub async fn get_request(
    State(state): State<AppState>,
    SharerId(viewer_id): SharerId,
    Path(request_id): Path<Uuid>,
) -> Result<Json<RequestResponse>, AppError> {
    if state.registry.user(&viewer_id).is_none() {
        return Err(BookingError::UserNotFound(viewer_id).into());
    }
    let record = state
        .registry
        .get_request(&request_id)
        .ok_or(AppError::RequestNotFound(request_id))?;
    Ok(Json(response(&state, record)))
}

// ---------------------------------------------------------------------------
// Response assembly
// ---------------------------------------------------------------------------

fn response(state: &AppState, record: RequestRecord) -> RequestResponse {
    let items = state
        .registry
        .items_answering(&record.id)
        .into_iter()
        .map(|item| answering_item(item, record.id))
        .collect();
    RequestResponse {
        id: record.id,
        requester_id: record.requester_id,
        description: record.description,
        created_at: record.created_at,
        items,
    }
}

fn answering_item(item: ItemRecord, request_id: Uuid) -> AnsweringItemDto {
    AnsweringItemDto {
        id: item.id,
        owner_id: item.owner_id,
        name: item.name,
        description: item.description,
        available: item.available,
        request_id,
    }
}
