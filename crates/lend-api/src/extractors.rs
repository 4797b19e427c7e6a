//! Request extractors.

use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use uuid::Uuid;

use crate::error::AppError;

/// Name of the caller-identity header.
pub const SHARER_HEADER: &str = "X-Sharer-User-Id";

/// The calling user's id, taken from the `X-Sharer-User-Id` header.
///
/// Every non-health route requires it. A missing or unparseable header
/// is a validation error before any handler logic runs; whether the id
/// refers to a real user is checked per operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SharerId(pub Uuid);

#[async_trait]
impl<S> FromRequestParts<S> for SharerId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let raw = parts
            .headers
            .get(SHARER_HEADER)
            .ok_or_else(|| AppError::Validation(format!("missing {SHARER_HEADER} header")))?;
        let raw = raw
            .to_str()
            .map_err(|_| AppError::Validation(format!("{SHARER_HEADER} is not valid UTF-8")))?;
        let id = raw
            .parse::<Uuid>()
            .map_err(|_| AppError::Validation(format!("{SHARER_HEADER} is not a valid UUID")))?;
        Ok(SharerId(id))
    }
}
