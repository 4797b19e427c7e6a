//! # Item Endpoints
//!
//! Item reads are viewer-dependent: the owner sees the last/next booking
//! projection, everyone else gets the bare listing plus comments.
//!
//! | Method | Path | Handler |
//! |--------|------|---------|
//! | `POST` | `/items` | `create_item` |
//! | `GET` | `/items` | `list_items` |
//! | `GET` | `/items/:item_id` | `get_item` |
//! | `PATCH` | `/items/:item_id` | `update_item` |
//! | `POST` | `/items/:item_id/comments` | `add_comment` |

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use lend_booking::{BookingError, BookingRef, ItemSummary};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::db;
use crate::error::AppError;
use crate::extractors::SharerId;
use crate::registry::{CommentRecord, ItemPatch, ItemRecord};
use crate::routes::PageParams;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request to list a new item. `request_id` marks the item as an
/// answer to an existing item request.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct CreateItemRequest {
    pub name: String,
    pub description: String,
    pub available: bool,
    #[serde(default)]
    pub request_id: Option<Uuid>,
}

/// Partial item update; absent fields are left untouched.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(deny_unknown_fields, default)]
pub struct UpdateItemRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub available: Option<bool>,
}

/// Request to comment on an item.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct AddCommentRequest {
    pub text: String,
}

/// Reference to a booking inside an item view.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct BookingRefDto {
    pub id: Uuid,
    pub booker_id: Uuid,
}

impl From<BookingRef> for BookingRefDto {
    fn from(r: BookingRef) -> Self {
        Self {
            id: r.id,
            booker_id: r.booker_id,
        }
    }
}

/// A stored comment.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CommentResponse {
    pub id: Uuid,
    pub item_id: Uuid,
    pub author_id: Uuid,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

impl From<CommentRecord> for CommentResponse {
    fn from(record: CommentRecord) -> Self {
        Self {
            id: record.id,
            item_id: record.item_id,
            author_id: record.author_id,
            text: record.body,
            created_at: record.created_at,
        }
    }
}

/// An item as returned by the API. `last_booking`/`next_booking` are
/// present only on the owner's own reads.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ItemResponse {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub name: String,
    pub description: String,
    pub available: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_booking: Option<BookingRefDto>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_booking: Option<BookingRefDto>,
    pub comments: Vec<CommentResponse>,
}

// ---------------------------------------------------------------------------
// Router
// ---------------------------------------------------------------------------

/// Build the item router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/items", post(create_item).get(list_items))
        .route("/items/:item_id", get(get_item).patch(update_item))
        .route("/items/:item_id/comments", post(add_comment))
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /items — List a new item owned by the calling sharer.
#[utoipa::path(
    post,
    path = "/items",
    request_body = CreateItemRequest,
    responses(
        (status = 201, description = "Item created", body = ItemResponse),
        (status = 404, description = "Sharer or referenced request does not exist", body = crate::error::ErrorBody),
        (status = 422, description = "Blank name or description", body = crate::error::ErrorBody),
    ),
    tag = "items"
)]
pub async fn create_item(
    State(state): State<AppState>,
    SharerId(owner_id): SharerId,
    Json(req): Json<CreateItemRequest>,
) -> Result<impl IntoResponse, AppError> {
    if req.name.trim().is_empty() {
        return Err(AppError::Validation("name must not be empty".to_string()));
    }
    if req.description.trim().is_empty() {
        return Err(AppError::Validation(
            "description must not be empty".to_string(),
        ));
    }
    if let Some(request_id) = req.request_id {
        if state.registry.get_request(&request_id).is_none() {
            return Err(AppError::RequestNotFound(request_id));
        }
    }

    let record = state.registry.add_item(
        owner_id,
        req.name,
        req.description,
        req.available,
        req.request_id,
    )?;

    if let Some(ref pool) = state.db_pool {
        db::items::save_item(pool, &record).await?;
    }
    tracing::info!(item_id = %record.id, owner_id = %owner_id, "item listed");

    Ok((StatusCode::CREATED, Json(bare_response(record))))
}

/// PATCH /items/:item_id — Update name, description, or availability.
///
/// Owner only; this is the one write path for the `available` flag, the
/// reservation engine never touches it.
#[utoipa::path(
    patch,
    path = "/items/{item_id}",
    params(("item_id" = Uuid, Path, description = "Item id")),
    request_body = UpdateItemRequest,
    responses(
        (status = 200, description = "Updated item", body = ItemResponse),
        (status = 404, description = "No such item, or caller is not the owner", body = crate::error::ErrorBody),
    ),
    tag = "items"
)]
pub async fn update_item(
    State(state): State<AppState>,
    SharerId(caller_id): SharerId,
    Path(item_id): Path<Uuid>,
    Json(req): Json<UpdateItemRequest>,
) -> Result<Json<ItemResponse>, AppError> {
    let patch = ItemPatch {
        name: req.name,
        description: req.description,
        available: req.available,
    };
    let record = state.registry.update_item(&item_id, caller_id, patch)?;

    if let Some(ref pool) = state.db_pool {
        db::items::save_item(pool, &record).await?;
    }
    tracing::info!(item_id = %item_id, owner_id = %caller_id, "item updated");

    Ok(Json(bare_response(record)))
}

/// GET /items/:item_id — Fetch one item, with comments.
///
/// When the caller owns the item the response carries the last/next
/// booking projection; any other viewer gets neither field.
#[utoipa::path(
    get,
    path = "/items/{item_id}",
    params(("item_id" = Uuid, Path, description = "Item id")),
    responses(
        (status = 200, description = "The item", body = ItemResponse),
        (status = 404, description = "No such item", body = crate::error::ErrorBody),
    ),
    tag = "items"
)]
pub async fn get_item(
    State(state): State<AppState>,
    SharerId(viewer_id): SharerId,
    Path(item_id): Path<Uuid>,
) -> Result<Json<ItemResponse>, AppError> {
    let record = state
        .registry
        .get_item(&item_id)
        .ok_or(BookingError::ItemNotFound(item_id))?;
    Ok(Json(projected_response(&state, record, viewer_id)))
}

/// GET /items — The calling sharer's own items, projections included.
///
/// A sharer with no listed items gets 404 rather than an empty list.
/// `from`/`size` select a page of the id-ordered sequence.
#[utoipa::path(
    get,
    path = "/items",
    params(
        ("from" = Option<i64>, Query, description = "Pagination seed; page index is from / size"),
        ("size" = Option<i64>, Query, description = "Page size"),
    ),
    responses(
        (status = 200, description = "The sharer's items", body = [ItemResponse]),
        (status = 404, description = "Sharer unknown or has no items", body = crate::error::ErrorBody),
    ),
    tag = "items"
)]
pub async fn list_items(
    State(state): State<AppState>,
    SharerId(owner_id): SharerId,
    Query(params): Query<PageParams>,
) -> Result<Json<Vec<ItemResponse>>, AppError> {
    let page = params.into_page()?;
    if state.registry.user(&owner_id).is_none() {
        return Err(BookingError::UserNotFound(owner_id).into());
    }

    let items = state.registry.items_of(&owner_id);
    if items.is_empty() {
        return Err(AppError::NotFound(format!(
            "user {owner_id} has no items to share"
        )));
    }

    let items = match page {
        Some(page) => page.apply(items),
        None => items,
    };
    let responses = items
        .into_iter()
        .map(|record| projected_response(&state, record, owner_id))
        .collect();
    Ok(Json(responses))
}

/// POST /items/:item_id/comments — Review an item after renting it.
///
/// Gated on a started, approved booking of this item by the caller.
#[utoipa::path(
    post,
    path = "/items/{item_id}/comments",
    params(("item_id" = Uuid, Path, description = "Item id")),
    request_body = AddCommentRequest,
    responses(
        (status = 201, description = "Comment stored", body = CommentResponse),
        (status = 404, description = "No such user or item", body = crate::error::ErrorBody),
        (status = 422, description = "Blank text, no qualifying booking, or booking not started", body = crate::error::ErrorBody),
    ),
    tag = "items"
)]
pub async fn add_comment(
    State(state): State<AppState>,
    SharerId(author_id): SharerId,
    Path(item_id): Path<Uuid>,
    Json(req): Json<AddCommentRequest>,
) -> Result<impl IntoResponse, AppError> {
    if req.text.trim().is_empty() {
        return Err(AppError::Validation("text must not be empty".to_string()));
    }
    if state.registry.user(&author_id).is_none() {
        return Err(BookingError::UserNotFound(author_id).into());
    }
    if state.registry.get_item(&item_id).is_none() {
        return Err(BookingError::ItemNotFound(item_id).into());
    }

    state.engine.comment_eligibility(item_id, author_id)?;

    let record = state.registry.add_comment(item_id, author_id, req.text);
    if let Some(ref pool) = state.db_pool {
        db::comments::save_comment(pool, &record).await?;
    }
    tracing::info!(item_id = %item_id, author_id = %author_id, "comment stored");

    Ok((StatusCode::CREATED, Json(CommentResponse::from(record))))
}

// ---------------------------------------------------------------------------
// Response assembly
// ---------------------------------------------------------------------------

/// Response without the booking projection (create/patch paths).
fn bare_response(record: ItemRecord) -> ItemResponse {
    ItemResponse {
        id: record.id,
        owner_id: record.owner_id,
        name: record.name,
        description: record.description,
        available: record.available,
        request_id: record.request_id,
        last_booking: None,
        next_booking: None,
        comments: Vec::new(),
    }
}

/// Response with comments and, for the owner, the last/next projection.
fn projected_response(state: &AppState, record: ItemRecord, viewer_id: Uuid) -> ItemResponse {
    let summary = ItemSummary {
        id: record.id,
        owner_id: record.owner_id,
        available: record.available,
    };
    let view = state.engine.item_booking_view(&summary, viewer_id);
    let comments = state
        .registry
        .comments_for(&record.id)
        .into_iter()
        .map(CommentResponse::from)
        .collect();

    ItemResponse {
        id: record.id,
        owner_id: record.owner_id,
        name: record.name,
        description: record.description,
        available: record.available,
        request_id: record.request_id,
        last_booking: view.last_booking.map(BookingRefDto::from),
        next_booking: view.next_booking.map(BookingRefDto::from),
        comments,
    }
}
