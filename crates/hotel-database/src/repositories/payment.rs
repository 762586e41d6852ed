//! Payment repository implementation.

use sqlx::PgPool;

use hotel_core::error::AppError;
use hotel_core::result::AppResult;
use hotel_core::types::BookingId;
use hotel_entity::payment::Payment;

/// Repository for payment records.
#[derive(Debug, Clone)]
pub struct PaymentRepository {
    pool: PgPool,
}

impl PaymentRepository {
    /// Create a new payment repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// All payments recorded against a booking, oldest first.
    pub async fn find_by_booking(&self, booking_id: BookingId) -> AppResult<Vec<Payment>> {
        sqlx::query_as::<_, Payment>(
            "SELECT id, booking_id, provider, provider_ref, amount, currency, status, created_at \
             FROM payments WHERE booking_id = $1 ORDER BY created_at ASC",
        )
        .bind(booking_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::from_sqlx("Failed to list payments", e))
    }
}
