//! Booking repository implementation.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use hotel_core::error::AppError;
use hotel_core::result::AppResult;
use hotel_core::types::{BookingId, PageRequest, PageResponse, RoomId};
use hotel_entity::booking::Booking;

use crate::store::BookingFilter;

/// Column list shared by every booking query.
pub(crate) const BOOKING_COLUMNS: &str = "id, user_id, hotel_id, room_id, check_in, check_out, \
     guests, rooms_count, total_amount, guest_name, guest_email, guest_phone, special_notes, \
     status, payment_status, created_at, updated_at";

/// Units held by active bookings of `$1` overlapping `[$2, $3)`.
///
/// Half-open: a stay ending on a day does not collide with one starting
/// that day.
pub(crate) const BOOKED_ROOMS_SQL: &str = "SELECT COALESCE(SUM(rooms_count), 0)::BIGINT \
     FROM bookings \
     WHERE room_id = $1 \
     AND status IN ('pending_payment', 'confirmed') \
     AND check_in < $3 \
     AND check_out > $2";

/// Repository for unlocked booking reads.
#[derive(Debug, Clone)]
pub struct BookingRepository {
    pool: PgPool,
}

impl BookingRepository {
    /// Create a new booking repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a booking by ID.
    pub async fn find_by_id(&self, id: BookingId) -> AppResult<Option<Booking>> {
        sqlx::query_as::<_, Booking>(&format!(
            "SELECT {BOOKING_COLUMNS} FROM bookings WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::from_sqlx("Failed to find booking", e))
    }

    /// List bookings matching `filter`, newest first.
    pub async fn find_page(
        &self,
        filter: &BookingFilter,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Booking>> {
        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM bookings \
             WHERE ($1::uuid IS NULL OR user_id = $1) \
             AND ($2::booking_status IS NULL OR status = $2)",
        )
        .bind(filter.user_id)
        .bind(filter.status)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::from_sqlx("Failed to count bookings", e))?;

        let items = sqlx::query_as::<_, Booking>(&format!(
            "SELECT {BOOKING_COLUMNS} FROM bookings \
             WHERE ($1::uuid IS NULL OR user_id = $1) \
             AND ($2::booking_status IS NULL OR status = $2) \
             ORDER BY created_at DESC, id DESC LIMIT $3 OFFSET $4"
        ))
        .bind(filter.user_id)
        .bind(filter.status)
        .bind(i64::try_from(page.limit()).unwrap_or(i64::MAX))
        .bind(i64::try_from(page.offset()).unwrap_or(i64::MAX))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::from_sqlx("Failed to list bookings", e))?;

        Ok(PageResponse::new(items, page, total.max(0) as u64))
    }

    /// Units held by active bookings overlapping the stay, without locking.
    pub async fn booked_rooms(
        &self,
        room_id: RoomId,
        check_in: DateTime<Utc>,
        check_out: DateTime<Utc>,
    ) -> AppResult<i64> {
        sqlx::query_scalar::<_, i64>(BOOKED_ROOMS_SQL)
            .bind(room_id)
            .bind(check_in)
            .bind(check_out)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::from_sqlx("Failed to count booked rooms", e))
    }
}
