//! Hotel availability handler.

use axum::Json;
use axum::extract::State;

use hotel_core::types::HotelId;
use hotel_service::HotelAvailability;

use crate::dto::request::AvailabilityParams;
use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::extractors::{ApiPath, ApiQuery};
use crate::state::AppState;

/// GET /api/hotels/{id}/availability
pub async fn availability(
    State(state): State<AppState>,
    ApiPath(hotel_id): ApiPath<HotelId>,
    ApiQuery(params): ApiQuery<AvailabilityParams>,
) -> Result<Json<ApiResponse<HotelAvailability>>, ApiError> {
    let query = params.into_query(hotel_id)?;
    let result = state.availability_service.check_availability(&query).await?;
    Ok(Json(ApiResponse::ok(result)))
}
