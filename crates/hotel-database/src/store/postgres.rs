//! PostgreSQL booking store.
//!
//! Admission locks the room row with `SELECT ... FOR UPDATE`, which
//! serializes every admission for that room type while leaving other room
//! types unaffected. The overlap sum and the insert run inside the same
//! transaction, so the lock is released on commit or on rollback.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::{debug, info};

use hotel_core::error::AppError;
use hotel_core::result::AppResult;
use hotel_core::types::{BookingId, HotelId, PageRequest, PageResponse, PaymentId, RoomId};
use hotel_entity::booking::{Booking, CreateBooking, PaymentStatus};
use hotel_entity::hotel::Hotel;
use hotel_entity::payment::{CreatePayment, Payment};
use hotel_entity::room::Room;

use super::{BookingFilter, BookingStore, ReserveOutcome};
use crate::repositories::booking::{BOOKED_ROOMS_SQL, BOOKING_COLUMNS};
use crate::repositories::{BookingRepository, HotelRepository, PaymentRepository, RoomRepository};

/// Booking store backed by PostgreSQL.
#[derive(Debug, Clone)]
pub struct PgBookingStore {
    pool: PgPool,
    hotels: HotelRepository,
    rooms: RoomRepository,
    bookings: BookingRepository,
    payments: PaymentRepository,
    /// Upper bound on waiting for the room lock, in milliseconds.
    lock_timeout_ms: u64,
}

impl PgBookingStore {
    /// Create a store over `pool`; `lock_timeout_ms` bounds lock waits.
    pub fn new(pool: PgPool, lock_timeout_ms: u64) -> Self {
        Self {
            hotels: HotelRepository::new(pool.clone()),
            rooms: RoomRepository::new(pool.clone()),
            bookings: BookingRepository::new(pool.clone()),
            payments: PaymentRepository::new(pool.clone()),
            pool,
            lock_timeout_ms,
        }
    }

    async fn begin(&self, context: &str) -> AppResult<sqlx::Transaction<'static, sqlx::Postgres>> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::from_sqlx(context, e))?;

        // Transaction-scoped; a lock wait past this fails with 55P03.
        sqlx::query("SELECT set_config('lock_timeout', $1, true)")
            .bind(format!("{}ms", self.lock_timeout_ms))
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::from_sqlx(context, e))?;

        Ok(tx)
    }
}

#[async_trait]
impl BookingStore for PgBookingStore {
    async fn find_hotel(&self, id: HotelId) -> AppResult<Option<Hotel>> {
        self.hotels.find_by_id(id).await
    }

    async fn find_room(&self, id: RoomId) -> AppResult<Option<Room>> {
        self.rooms.find_by_id(id).await
    }

    async fn rooms_for_hotel(&self, hotel_id: HotelId) -> AppResult<Vec<Room>> {
        self.rooms.find_by_hotel(hotel_id).await
    }

    async fn booked_rooms(
        &self,
        room_id: RoomId,
        check_in: DateTime<Utc>,
        check_out: DateTime<Utc>,
    ) -> AppResult<i64> {
        self.bookings.booked_rooms(room_id, check_in, check_out).await
    }

    async fn reserve_if_available(&self, data: &CreateBooking) -> AppResult<ReserveOutcome> {
        const CONTEXT: &str = "Failed to reserve rooms";
        let mut tx = self.begin(CONTEXT).await?;

        let total_rooms: Option<i32> =
            sqlx::query_scalar("SELECT total_rooms FROM rooms WHERE id = $1 FOR UPDATE")
                .bind(data.room_id)
                .fetch_optional(&mut *tx)
                .await
                .map_err(|e| AppError::from_sqlx(CONTEXT, e))?;

        let Some(total_rooms) = total_rooms else {
            return Err(AppError::not_found("Room not found"));
        };

        let booked: i64 = sqlx::query_scalar(BOOKED_ROOMS_SQL)
            .bind(data.room_id)
            .bind(data.check_in)
            .bind(data.check_out)
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| AppError::from_sqlx(CONTEXT, e))?;

        let available = i64::from(total_rooms) - booked;
        debug!(
            room_id = %data.room_id,
            total_rooms,
            booked,
            requested = data.rooms_count,
            "Room locked for admission"
        );

        if available < i64::from(data.rooms_count) {
            tx.rollback()
                .await
                .map_err(|e| AppError::from_sqlx(CONTEXT, e))?;
            return Ok(ReserveOutcome::Insufficient {
                available: available.max(0),
            });
        }

        let booking = sqlx::query_as::<_, Booking>(&format!(
            "INSERT INTO bookings (id, user_id, hotel_id, room_id, check_in, check_out, guests, \
             rooms_count, total_amount, guest_name, guest_email, guest_phone, special_notes, \
             status, payment_status) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, \
             'pending_payment', 'pending') \
             RETURNING {BOOKING_COLUMNS}"
        ))
        .bind(BookingId::new())
        .bind(data.user_id)
        .bind(data.hotel_id)
        .bind(data.room_id)
        .bind(data.check_in)
        .bind(data.check_out)
        .bind(data.guests)
        .bind(data.rooms_count)
        .bind(data.total_amount)
        .bind(&data.guest_name)
        .bind(&data.guest_email)
        .bind(&data.guest_phone)
        .bind(&data.special_notes)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| AppError::from_sqlx(CONTEXT, e))?;

        tx.commit()
            .await
            .map_err(|e| AppError::from_sqlx(CONTEXT, e))?;

        info!(
            booking_id = %booking.id,
            room_id = %booking.room_id,
            rooms_count = booking.rooms_count,
            "Rooms reserved"
        );
        Ok(ReserveOutcome::Reserved(booking))
    }

    async fn find_booking(&self, id: BookingId) -> AppResult<Option<Booking>> {
        self.bookings.find_by_id(id).await
    }

    async fn list_bookings(
        &self,
        filter: &BookingFilter,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Booking>> {
        self.bookings.find_page(filter, page).await
    }

    async fn payments_for(&self, booking_id: BookingId) -> AppResult<Vec<Payment>> {
        self.payments.find_by_booking(booking_id).await
    }

    async fn confirm_payment(
        &self,
        id: BookingId,
        payment: &CreatePayment,
    ) -> AppResult<Option<Booking>> {
        const CONTEXT: &str = "Failed to confirm payment";
        let mut tx = self.begin(CONTEXT).await?;

        let booking = sqlx::query_as::<_, Booking>(&format!(
            "UPDATE bookings SET status = 'confirmed', payment_status = 'paid', updated_at = NOW() \
             WHERE id = $1 AND status = 'pending_payment' \
             RETURNING {BOOKING_COLUMNS}"
        ))
        .bind(id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| AppError::from_sqlx(CONTEXT, e))?;

        let Some(booking) = booking else {
            tx.rollback()
                .await
                .map_err(|e| AppError::from_sqlx(CONTEXT, e))?;
            return Ok(None);
        };

        sqlx::query(
            "INSERT INTO payments (id, booking_id, provider, provider_ref, amount, currency, status) \
             VALUES ($1, $2, $3, $4, $5, $6, $7)",
        )
        .bind(PaymentId::new())
        .bind(id)
        .bind(&payment.provider)
        .bind(&payment.provider_ref)
        .bind(payment.amount)
        .bind(&payment.currency)
        .bind(PaymentStatus::Paid)
        .execute(&mut *tx)
        .await
        .map_err(|e| AppError::from_sqlx(CONTEXT, e))?;

        tx.commit()
            .await
            .map_err(|e| AppError::from_sqlx(CONTEXT, e))?;

        Ok(Some(booking))
    }

    async fn cancel(&self, id: BookingId) -> AppResult<Option<Booking>> {
        const CONTEXT: &str = "Failed to cancel booking";
        let mut tx = self.begin(CONTEXT).await?;

        let booking = sqlx::query_as::<_, Booking>(&format!(
            "UPDATE bookings SET status = 'cancelled', \
             payment_status = CASE WHEN payment_status = 'paid' \
                 THEN 'refunded'::payment_status ELSE payment_status END, \
             updated_at = NOW() \
             WHERE id = $1 AND status IN ('pending_payment', 'confirmed') \
             RETURNING {BOOKING_COLUMNS}"
        ))
        .bind(id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| AppError::from_sqlx(CONTEXT, e))?;

        if let Some(booking) = &booking
            && booking.payment_status == PaymentStatus::Refunded
        {
            sqlx::query(
                "UPDATE payments SET status = 'refunded' WHERE booking_id = $1 AND status = 'paid'",
            )
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::from_sqlx(CONTEXT, e))?;
        }

        tx.commit()
            .await
            .map_err(|e| AppError::from_sqlx(CONTEXT, e))?;

        Ok(booking)
    }

    async fn health_check(&self) -> AppResult<()> {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|_| ())
            .map_err(|e| AppError::from_sqlx("Database health check failed", e))
    }
}
