//! Hotel repository implementation.

use sqlx::PgPool;

use hotel_core::error::AppError;
use hotel_core::result::AppResult;
use hotel_core::types::HotelId;
use hotel_entity::hotel::Hotel;

/// Repository for hotel lookups.
#[derive(Debug, Clone)]
pub struct HotelRepository {
    pool: PgPool,
}

impl HotelRepository {
    /// Create a new hotel repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a hotel by ID.
    pub async fn find_by_id(&self, id: HotelId) -> AppResult<Option<Hotel>> {
        sqlx::query_as::<_, Hotel>(
            "SELECT id, name, city, address, price_from, created_at FROM hotels WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::from_sqlx("Failed to find hotel", e))
    }
}
