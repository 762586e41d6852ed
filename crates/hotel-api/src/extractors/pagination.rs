//! Query parameters for booking list endpoints.

use serde::{Deserialize, Serialize};

use hotel_core::types::pagination::PageRequest;
use hotel_entity::booking::BookingStatus;

use crate::error::ApiError;

/// `?status=&page=&limit=` on booking lists.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BookingListParams {
    /// Optional status filter (`pending_payment`, `confirmed`, ...).
    pub status: Option<String>,
    /// Page number (1-based, default: 1).
    pub page: Option<u64>,
    /// Items per page (clamped to the store maximum).
    pub limit: Option<u64>,
}

impl BookingListParams {
    /// Parse the status filter and build a page request, using
    /// `default_limit` when the caller gave none.
    pub fn into_parts(
        self,
        default_limit: u64,
    ) -> Result<(Option<BookingStatus>, PageRequest), ApiError> {
        let status = match self.status.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(s) => Some(s.parse::<BookingStatus>()?),
        };
        let page = PageRequest::new(
            self.page.unwrap_or(1),
            self.limit.unwrap_or(default_limit),
        );
        Ok((status, page))
    }
}
