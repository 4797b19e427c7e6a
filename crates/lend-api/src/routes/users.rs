//! # User Endpoints
//!
//! | Method | Path | Handler |
//! |--------|------|---------|
//! | `POST` | `/users` | `create_user` |
//! | `GET` | `/users` | `list_users` |
//! | `GET` | `/users/:user_id` | `get_user` |

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::db;
use crate::error::AppError;
use crate::registry::UserRecord;
use crate::state::AppState;

/// Request to register a user.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct CreateUserRequest {
    pub name: String,
    pub email: String,
}

/// A user as returned by the API.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl From<UserRecord> for UserResponse {
    fn from(record: UserRecord) -> Self {
        Self {
            id: record.id,
            name: record.name,
            email: record.email,
            created_at: record.created_at,
        }
    }
}

/// Build the user router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/users", axum::routing::post(create_user).get(list_users))
        .route("/users/:user_id", get(get_user))
}

/// POST /users — Register a user.
#[utoipa::path(
    post,
    path = "/users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created", body = UserResponse),
        (status = 409, description = "Email already registered", body = crate::error::ErrorBody),
        (status = 422, description = "Blank name or malformed email", body = crate::error::ErrorBody),
    ),
    tag = "users"
)]
pub async fn create_user(
    State(state): State<AppState>,
    Json(req): Json<CreateUserRequest>,
) -> Result<impl IntoResponse, AppError> {
    if req.name.trim().is_empty() {
        return Err(AppError::Validation("name must not be empty".to_string()));
    }
    let email = req.email.trim();
    if email.is_empty() || !email.contains('@') {
        return Err(AppError::Validation(
            "email must be a valid address".to_string(),
        ));
    }

    let record = state.registry.add_user(req.name, email.to_string())?;

    if let Some(ref pool) = state.db_pool {
        db::users::save_user(pool, &record).await?;
    }
    tracing::info!(user_id = %record.id, "user registered");

    Ok((StatusCode::CREATED, Json(UserResponse::from(record))))
}

/// GET /users — List all users.
#[utoipa::path(
    get,
    path = "/users",
    responses(
        (status = 200, description = "All users", body = [UserResponse]),
    ),
    tag = "users"
)]
pub async fn list_users(State(state): State<AppState>) -> Json<Vec<UserResponse>> {
    let users = state
        .registry
        .list_users()
        .into_iter()
        .map(UserResponse::from)
        .collect();
    Json(users)
}

/// GET /users/:user_id — Fetch one user.
#[utoipa::path(
    get,
    path = "/users/{user_id}",
    params(("user_id" = Uuid, Path, description = "User id")),
    responses(
        (status = 200, description = "The user", body = UserResponse),
        (status = 404, description = "No such user", body = crate::error::ErrorBody),
    ),
    tag = "users"
)]
pub async fn get_user(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<UserResponse>, AppError> {
    let record = state
        .registry
        .user(&user_id)
        .ok_or_else(|| AppError::NotFound(format!("user {user_id} not found")))?;
    Ok(Json(UserResponse::from(record)))
}
