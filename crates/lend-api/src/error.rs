//! # API Error Types
//!
//! Structured error type implementing `axum::response::IntoResponse`.
//! Maps [`BookingError`] and catalogue errors to HTTP status codes and
//! returns JSON error response bodies with error code, message, and
//! details. Never exposes internal error details in responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use lend_booking::BookingError;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

use crate::registry::DuplicateEmail;

/// Structured JSON error response body.
///
/// All error responses use this format across the API surface. The
/// `details` field carries additional context for 422 validation errors
/// but is omitted for 500-class errors to prevent information leakage.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

/// Inner error detail.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorDetail {
    /// Machine-readable error code (e.g., "BOOKING_NOT_FOUND").
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Additional details, present only for client errors.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

/// Application-level error type that implements [`IntoResponse`] for Axum.
///
/// Booking-engine verdicts keep their own machine codes; the remaining
/// variants cover catalogue and transport failures.
#[derive(Error, Debug)]
pub enum AppError {
    /// A reservation-engine verdict; status and code depend on the kind.
    #[error(transparent)]
    Booking(#[from] BookingError),

    /// Resource not found (404).
    #[error("not found: {0}")]
    NotFound(String),

    /// Referenced item request does not exist (404).
    #[error("request {0} does not exist")]
    RequestNotFound(uuid::Uuid),

    /// Request validation failed (422). Covers malformed identity
    /// headers, bad pagination, unparseable bodies, and blank fields:
    /// the client sent syntactically valid HTTP but semantically
    /// invalid content.
    #[error("validation error: {0}")]
    Validation(String),

    /// Conflict with current resource state (409).
    #[error("conflict: {0}")]
    Conflict(String),

    /// Internal server error (500). Message is logged but not returned
    /// to the client.
    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Return the HTTP status code and machine-readable error code.
    ///
    /// Absence and authorization failures alike map to 404 so a caller
    /// probing someone else's booking cannot distinguish "does not
    /// exist" from "not yours". Terminal-state and window collisions
    /// are 409; everything the client could fix by editing the request
    /// is 422.
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            Self::Booking(err) => match err {
                BookingError::UserNotFound(_) => (StatusCode::NOT_FOUND, "USER_NOT_FOUND"),
                BookingError::ItemNotFound(_) => (StatusCode::NOT_FOUND, "ITEM_NOT_FOUND"),
                BookingError::BookingNotFound(_) => (StatusCode::NOT_FOUND, "BOOKING_NOT_FOUND"),
                BookingError::SelfBookingDenied { .. } => {
                    (StatusCode::NOT_FOUND, "SELF_BOOKING_DENIED")
                }
                BookingError::NotAuthorized { .. } | BookingError::NotItemOwner { .. } => {
                    (StatusCode::NOT_FOUND, "NOT_AUTHORIZED")
                }
                BookingError::NoBookingHistory { .. } => {
                    (StatusCode::NOT_FOUND, "NO_BOOKING_HISTORY")
                }
                BookingError::InvalidWindow(_) => {
                    (StatusCode::UNPROCESSABLE_ENTITY, "INVALID_WINDOW")
                }
                BookingError::ItemUnavailable(_) => {
                    (StatusCode::UNPROCESSABLE_ENTITY, "ITEM_UNAVAILABLE")
                }
                BookingError::NoEligibleBooking { .. } => {
                    (StatusCode::UNPROCESSABLE_ENTITY, "NO_ELIGIBLE_BOOKING")
                }
                BookingError::BookingNotYetStarted { .. } => {
                    (StatusCode::UNPROCESSABLE_ENTITY, "BOOKING_NOT_YET_STARTED")
                }
                BookingError::WindowConflict(_) => (StatusCode::CONFLICT, "WINDOW_CONFLICT"),
                BookingError::AlreadyApproved(_) | BookingError::AlreadyRejected(_) => {
                    (StatusCode::CONFLICT, "ALREADY_DECIDED")
                }
            },
            Self::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            Self::RequestNotFound(_) => (StatusCode::NOT_FOUND, "REQUEST_NOT_FOUND"),
            Self::Validation(_) => (StatusCode::UNPROCESSABLE_ENTITY, "VALIDATION_ERROR"),
            Self::Conflict(_) => (StatusCode::CONFLICT, "CONFLICT"),
            Self::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        // Never expose internal error messages to clients.
        let message = match &self {
            Self::Internal(_) => "An internal error occurred".to_string(),
            other => other.to_string(),
        };

        if let Self::Internal(_) = &self {
            tracing::error!(error = %self, "internal server error");
        }

        let body = ErrorBody {
            error: ErrorDetail {
                code: code.to_string(),
                message,
                details: None,
            },
        };

        (status, Json(body)).into_response()
    }
}

impl From<DuplicateEmail> for AppError {
    fn from(err: DuplicateEmail) -> Self {
        Self::Conflict(err.to_string())
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        Self::Internal(format!("database error: {err}"))
    }
}
