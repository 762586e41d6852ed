//! Room type repository implementation.

use sqlx::PgPool;

use hotel_core::error::AppError;
use hotel_core::result::AppResult;
use hotel_core::types::{HotelId, RoomId};
use hotel_entity::room::Room;

const ROOM_COLUMNS: &str =
    "id, hotel_id, name, room_type, capacity, price_per_night, total_rooms, created_at";

/// Repository for room type lookups.
#[derive(Debug, Clone)]
pub struct RoomRepository {
    pool: PgPool,
}

impl RoomRepository {
    /// Create a new room repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a room type by ID.
    pub async fn find_by_id(&self, id: RoomId) -> AppResult<Option<Room>> {
        sqlx::query_as::<_, Room>(&format!("SELECT {ROOM_COLUMNS} FROM rooms WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::from_sqlx("Failed to find room", e))
    }

    /// List a hotel's room types, cheapest first.
    pub async fn find_by_hotel(&self, hotel_id: HotelId) -> AppResult<Vec<Room>> {
        sqlx::query_as::<_, Room>(&format!(
            "SELECT {ROOM_COLUMNS} FROM rooms WHERE hotel_id = $1 ORDER BY price_per_night ASC, name ASC"
        ))
        .bind(hotel_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::from_sqlx("Failed to list rooms", e))
    }
}
