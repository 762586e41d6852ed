//! Room type entity model.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use hotel_core::types::{HotelId, RoomId};

/// A category of accommodation within a hotel (e.g. "Deluxe Room").
///
/// `total_rooms` is the number of physical units of this type; it is the
/// inventory ceiling for overlapping bookings.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    /// Unique room type identifier.
    pub id: RoomId,
    /// The hotel that owns this room type.
    pub hotel_id: HotelId,
    /// Display name.
    pub name: String,
    /// Short type label (e.g. "suite").
    pub room_type: String,
    /// Maximum guests per physical unit.
    pub capacity: i32,
    /// Nightly rate for one unit.
    pub price_per_night: Decimal,
    /// Number of physical units of this type.
    pub total_rooms: i32,
    /// When the room type was created.
    pub created_at: DateTime<Utc>,
}

impl Room {
    /// Maximum guests that `rooms_count` units of this type can hold.
    pub fn max_guests(&self, rooms_count: i32) -> i64 {
        i64::from(self.capacity) * i64::from(rooms_count)
    }

    /// Whether this room type belongs to the given hotel.
    pub fn belongs_to(&self, hotel_id: HotelId) -> bool {
        self.hotel_id == hotel_id
    }
}
