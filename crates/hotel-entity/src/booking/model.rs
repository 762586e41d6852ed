//! Booking entity model.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use hotel_core::types::{BookingId, HotelId, RoomId, UserId};

use super::status::{BookingStatus, PaymentStatus};

/// A reservation of `rooms_count` units of one room type over
/// `[check_in, check_out)`.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    /// Unique booking identifier.
    pub id: BookingId,
    /// The user who made the booking.
    pub user_id: UserId,
    /// The hotel being booked.
    pub hotel_id: HotelId,
    /// The room type being booked.
    pub room_id: RoomId,
    /// Start of the stay (inclusive).
    pub check_in: DateTime<Utc>,
    /// End of the stay (exclusive).
    pub check_out: DateTime<Utc>,
    /// Number of guests.
    pub guests: i32,
    /// Number of physical units reserved.
    pub rooms_count: i32,
    /// Amount due, including taxes and fees.
    pub total_amount: Decimal,
    /// Lead guest name.
    pub guest_name: String,
    /// Lead guest email.
    pub guest_email: String,
    /// Lead guest phone.
    pub guest_phone: String,
    /// Free-form requests from the guest.
    pub special_notes: Option<String>,
    /// Lifecycle state.
    pub status: BookingStatus,
    /// Payment state.
    pub payment_status: PaymentStatus,
    /// When the booking was created.
    pub created_at: DateTime<Utc>,
    /// When the booking was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Booking {
    /// Whether this booking currently occupies inventory.
    pub fn holds_inventory(&self) -> bool {
        self.status.holds_inventory()
    }

    /// Whether this booking's stay overlaps `[check_in, check_out)`.
    pub fn overlaps(&self, check_in: DateTime<Utc>, check_out: DateTime<Utc>) -> bool {
        ranges_overlap(self.check_in, self.check_out, check_in, check_out)
    }

    /// Whether the given user owns this booking.
    pub fn is_owned_by(&self, user_id: UserId) -> bool {
        self.user_id == user_id
    }
}

/// Half-open interval overlap: `[a_start, a_end)` and `[b_start, b_end)`.
///
/// Touching intervals do not overlap, so a check-out day can be reused by
/// a same-day check-in.
pub fn ranges_overlap(
    a_start: DateTime<Utc>,
    a_end: DateTime<Utc>,
    b_start: DateTime<Utc>,
    b_end: DateTime<Utc>,
) -> bool {
    a_start < b_end && a_end > b_start
}

/// Data required to insert a booking once admission has succeeded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateBooking {
    /// The booking user.
    pub user_id: UserId,
    /// The hotel being booked.
    pub hotel_id: HotelId,
    /// The room type being booked.
    pub room_id: RoomId,
    /// Start of the stay.
    pub check_in: DateTime<Utc>,
    /// End of the stay (exclusive).
    pub check_out: DateTime<Utc>,
    /// Number of guests.
    pub guests: i32,
    /// Units to reserve.
    pub rooms_count: i32,
    /// Amount due.
    pub total_amount: Decimal,
    /// Lead guest name.
    pub guest_name: String,
    /// Lead guest email.
    pub guest_email: String,
    /// Lead guest phone.
    pub guest_phone: String,
    /// Free-form requests.
    pub special_notes: Option<String>,
}
