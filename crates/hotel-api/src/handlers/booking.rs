//! Guest booking handlers.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use hotel_core::types::BookingId;
use hotel_entity::booking::Booking;
use hotel_service::{BookingDetails, BookingWithPrice};

use crate::dto::request::{ConfirmPaymentRequest, CreateBookingRequest};
use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::extractors::{ApiPath, ApiQuery, AuthUser, BookingListParams, ValidatedJson};
use crate::state::AppState;

const MY_BOOKINGS_PAGE_SIZE: u64 = 10;

/// POST /api/bookings
pub async fn create_booking(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(req): ValidatedJson<CreateBookingRequest>,
) -> Result<(StatusCode, Json<ApiResponse<BookingWithPrice>>), ApiError> {
    let new_booking = req.into_new_booking(auth.request_time)?;
    let created = state
        .booking_service
        .attempt_booking(&auth, new_booking)
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message(
            created,
            "Booking created successfully",
        )),
    ))
}

/// GET /api/bookings/my
pub async fn my_bookings(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiQuery(params): ApiQuery<BookingListParams>,
) -> Result<Json<ApiResponse<Vec<Booking>>>, ApiError> {
    let (status, page) = params.into_parts(MY_BOOKINGS_PAGE_SIZE)?;
    let result = state
        .booking_service
        .list_my_bookings(&auth, status, page)
        .await?;
    Ok(Json(ApiResponse::paginated(result)))
}

/// GET /api/bookings/{id}
pub async fn get_booking(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(id): ApiPath<BookingId>,
) -> Result<Json<ApiResponse<BookingDetails>>, ApiError> {
    let details = state.booking_service.get_booking(&auth, id).await?;
    Ok(Json(ApiResponse::ok(details)))
}

/// PATCH /api/bookings/{id}/cancel
pub async fn cancel_booking(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(id): ApiPath<BookingId>,
) -> Result<Json<ApiResponse<Booking>>, ApiError> {
    let booking = state.booking_service.cancel(&auth, id).await?;
    Ok(Json(ApiResponse::with_message(
        booking,
        "Booking cancelled successfully",
    )))
}

/// POST /api/bookings/{id}/confirm-payment
pub async fn confirm_payment(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(id): ApiPath<BookingId>,
    ValidatedJson(req): ValidatedJson<ConfirmPaymentRequest>,
) -> Result<Json<ApiResponse<Booking>>, ApiError> {
    let booking = state
        .booking_service
        .confirm_payment(&auth, id, &req.payment_ref)
        .await?;
    Ok(Json(ApiResponse::with_message(booking, "Payment confirmed")))
}
