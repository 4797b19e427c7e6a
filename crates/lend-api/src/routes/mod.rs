//! HTTP route handlers.

pub mod bookings;
pub mod items;
pub mod requests;
pub mod users;

use serde::Deserialize;

use crate::error::AppError;
use lend_booking::PageRequest;

/// `from`/`size` pagination query parameters, shared by the listing
/// endpoints. Optional as a pair: a lone parameter is rejected here so
/// handlers only ever see none or both.
#[derive(Debug, Default, Deserialize)]
pub struct PageParams {
    pub from: Option<i64>,
    pub size: Option<i64>,
}

impl PageParams {
    pub fn into_page(self) -> Result<Option<PageRequest>, AppError> {
        let (from, size) = match (self.from, self.size) {
            (None, None) => return Ok(None),
            (Some(from), Some(size)) => (from, size),
            _ => {
                return Err(AppError::Validation(
                    "from and size must be supplied together".to_string(),
                ))
            }
        };
        if from < 0 {
            return Err(AppError::Validation("from must not be negative".to_string()));
        }
        if size <= 0 {
            return Err(AppError::Validation("size must be positive".to_string()));
        }
        let from = u32::try_from(from)
            .map_err(|_| AppError::Validation("from is out of range".to_string()))?;
        let size = u32::try_from(size)
            .map_err(|_| AppError::Validation("size is out of range".to_string()))?;
        PageRequest::new(from, size)
            .map(Some)
            .map_err(|e| AppError::Validation(e.to_string()))
    }
}
