//! Response DTOs.

use serde::{Deserialize, Serialize};

use hotel_core::types::pagination::PageResponse;

/// Standard success envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T: Serialize> {
    /// Always `true`.
    pub success: bool,
    /// The response payload.
    pub data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagination: Option<Pagination>,
}

impl<T: Serialize> ApiResponse<T> {
    /// Creates a success response.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
            message: None,
            pagination: None,
        }
    }

    /// Creates a success response with a human-readable message.
    pub fn with_message(data: T, message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            ..Self::ok(data)
        }
    }
}

impl<T: Serialize> ApiResponse<Vec<T>> {
    /// Creates a list response carrying page metadata.
    pub fn paginated(page: PageResponse<T>) -> Self {
        let pagination = Pagination {
            page: page.page,
            limit: page.page_size,
            total: page.total_items,
            total_pages: page.total_pages,
        };
        Self {
            pagination: Some(pagination),
            ..Self::ok(page.items)
        }
    }
}

/// Page metadata on list responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: u64,
    pub limit: u64,
    pub total: u64,
    pub total_pages: u64,
}
