//! Admin booking management handlers.

use axum::Json;
use axum::extract::State;

use hotel_core::types::BookingId;
use hotel_entity::booking::Booking;

use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::extractors::{ApiPath, ApiQuery, AuthUser, BookingListParams};
use crate::state::AppState;

const ADMIN_PAGE_SIZE: u64 = 20;

/// GET /api/admin/bookings
pub async fn list_bookings(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiQuery(params): ApiQuery<BookingListParams>,
) -> Result<Json<ApiResponse<Vec<Booking>>>, ApiError> {
    let (status, page) = params.into_parts(ADMIN_PAGE_SIZE)?;
    let result = state
        .booking_service
        .list_all_bookings(&auth, status, page)
        .await?;
    Ok(Json(ApiResponse::paginated(result)))
}

/// PATCH /api/admin/bookings/{id}/cancel
pub async fn cancel_booking(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(id): ApiPath<BookingId>,
) -> Result<Json<ApiResponse<Booking>>, ApiError> {
    let booking = state.booking_service.admin_cancel(&auth, id).await?;
    Ok(Json(ApiResponse::with_message(booking, "Booking cancelled")))
}
