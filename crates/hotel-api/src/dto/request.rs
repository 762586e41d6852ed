//! Request DTOs with validation.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use hotel_core::types::{HotelId, RoomId};
use hotel_service::{AvailabilityQuery, NewBooking};

use crate::error::ApiError;

/// `POST /api/bookings`
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingRequest {
    /// Hotel being booked.
    pub hotel_id: HotelId,
    /// Room type being booked.
    pub room_id: RoomId,
    /// `YYYY-MM-DD` or RFC 3339.
    pub check_in: String,
    /// `YYYY-MM-DD` or RFC 3339.
    pub check_out: String,
    #[validate(range(min = 1, max = 20))]
    pub guests: i32,
    #[validate(range(min = 1, max = 10))]
    pub rooms_count: i32,
    #[validate(length(min = 2, max = 100))]
    pub guest_name: String,
    #[validate(email, length(max = 255))]
    pub guest_email: String,
    #[validate(length(min = 5, max = 20))]
    pub guest_phone: String,
    #[validate(length(max = 500))]
    pub special_notes: Option<String>,
}

impl CreateBookingRequest {
    /// Parse the stay dates and convert into the service input.
    ///
    /// Rejects stays whose check-out is not after check-in and check-ins
    /// before the start of the current UTC day.
    pub fn into_new_booking(self, now: DateTime<Utc>) -> Result<NewBooking, ApiError> {
        let (check_in, check_out) = parse_stay(&self.check_in, &self.check_out)?;
        if check_in < start_of_day(now) {
            return Err(ApiError::bad_request("Check-in date cannot be in the past"));
        }

        Ok(NewBooking {
            hotel_id: self.hotel_id,
            room_id: self.room_id,
            check_in,
            check_out,
            guests: self.guests,
            rooms_count: self.rooms_count,
            guest_name: self.guest_name.trim().to_string(),
            guest_email: self.guest_email.trim().to_string(),
            guest_phone: self.guest_phone.trim().to_string(),
            special_notes: self
                .special_notes
                .map(|n| n.trim().to_string())
                .filter(|n| !n.is_empty()),
        })
    }
}

/// `POST /api/bookings/{id}/confirm-payment`
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmPaymentRequest {
    /// Provider transaction reference.
    #[serde(default)]
    #[validate(length(max = 255))]
    pub payment_ref: String,
}

/// `GET /api/hotels/{id}/availability`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityParams {
    pub check_in: String,
    pub check_out: String,
    /// Restrict the answer to one room type.
    pub room_id: Option<RoomId>,
    /// Units required (default 1).
    pub rooms: Option<i32>,
}

impl AvailabilityParams {
    /// Build the service query for `hotel_id`.
    pub fn into_query(self, hotel_id: HotelId) -> Result<AvailabilityQuery, ApiError> {
        let (check_in, check_out) = parse_stay(&self.check_in, &self.check_out)?;
        Ok(AvailabilityQuery {
            hotel_id,
            check_in,
            check_out,
            room_id: self.room_id,
            rooms: self.rooms.unwrap_or(1),
        })
    }
}

/// Parse an instant from `YYYY-MM-DD` (midnight UTC) or RFC 3339.
pub fn parse_instant(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .map(|d| d.and_time(NaiveTime::MIN).and_utc())
}

fn parse_stay(check_in: &str, check_out: &str) -> Result<(DateTime<Utc>, DateTime<Utc>), ApiError> {
    let check_in = parse_instant(check_in)
        .ok_or_else(|| ApiError::bad_request(format!("Invalid check-in date: '{check_in}'")))?;
    let check_out = parse_instant(check_out)
        .ok_or_else(|| ApiError::bad_request(format!("Invalid check-out date: '{check_out}'")))?;
    if check_out <= check_in {
        return Err(ApiError::bad_request(
            "Check-out date must be after check-in date",
        ));
    }
    Ok((check_in, check_out))
}

fn start_of_day(now: DateTime<Utc>) -> DateTime<Utc> {
    now.date_naive().and_time(NaiveTime::MIN).and_utc()
}
