//! Availability lookup for display.
//!
//! Uses the same overlap and active-status rule as admission but takes no
//! lock, so the figures can be stale by the time a booking is attempted.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use hotel_core::error::AppError;
use hotel_core::result::AppResult;
use hotel_core::types::{HotelId, RoomId};
use hotel_database::store::BookingStore;

use crate::booking::BookingError;

/// Parameters of an availability lookup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvailabilityQuery {
    /// Hotel to inspect.
    pub hotel_id: HotelId,
    /// Start of the stay.
    pub check_in: DateTime<Utc>,
    /// End of the stay (exclusive).
    pub check_out: DateTime<Utc>,
    /// Restrict to one room type.
    pub room_id: Option<RoomId>,
    /// Units the caller wants.
    pub rooms: i32,
}

/// Availability of one room type.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomAvailability {
    pub room_id: RoomId,
    pub room_name: String,
    pub room_type: String,
    pub total_rooms: i32,
    pub booked_rooms: i64,
    /// Never negative.
    pub available_rooms: i64,
    pub is_available: bool,
    pub price_per_night: Decimal,
    pub capacity: i32,
}

/// Availability of a hotel's room types over a stay.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HotelAvailability {
    pub hotel_id: HotelId,
    pub check_in: DateTime<Utc>,
    pub check_out: DateTime<Utc>,
    pub rooms: Vec<RoomAvailability>,
}

/// Computes per-room availability without locking.
#[derive(Debug, Clone)]
pub struct AvailabilityService {
    store: Arc<dyn BookingStore>,
}

impl AvailabilityService {
    /// Creates a new availability service.
    pub fn new(store: Arc<dyn BookingStore>) -> Self {
        Self { store }
    }

    /// Report booked and free units for the hotel's room types.
    ///
    /// A `room_id` that belongs to another hotel yields an empty list.
    pub async fn check_availability(&self, query: &AvailabilityQuery) -> AppResult<HotelAvailability> {
        if query.check_out <= query.check_in {
            return Err(AppError::bad_request("Check-out must be after check-in"));
        }
        if query.rooms < 1 {
            return Err(AppError::bad_request("Rooms must be at least 1"));
        }

        self.store
            .find_hotel(query.hotel_id)
            .await?
            .ok_or(BookingError::HotelNotFound)?;

        let mut rooms = self.store.rooms_for_hotel(query.hotel_id).await?;
        if let Some(room_id) = query.room_id {
            rooms.retain(|r| r.id == room_id);
        }

        let mut availability = Vec::with_capacity(rooms.len());
        for room in rooms {
            let booked = self
                .store
                .booked_rooms(room.id, query.check_in, query.check_out)
                .await?;
            let available = i64::from(room.total_rooms) - booked;

            availability.push(RoomAvailability {
                room_id: room.id,
                room_name: room.name,
                room_type: room.room_type,
                total_rooms: room.total_rooms,
                booked_rooms: booked,
                available_rooms: available.max(0),
                is_available: available >= i64::from(query.rooms),
                price_per_night: room.price_per_night,
                capacity: room.capacity,
            });
        }

        Ok(HotelAvailability {
            hotel_id: query.hotel_id,
            check_in: query.check_in,
            check_out: query.check_out,
            rooms: availability,
        })
    }
}
