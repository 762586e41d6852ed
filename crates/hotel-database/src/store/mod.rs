//! Booking store abstraction.
//!
//! Admission is a single reserve-if-available step: the store counts the
//! units held by overlapping active bookings and inserts the new booking
//! under one exclusive section per room type. Two implementations:
//! - PostgreSQL, locking the room row inside a transaction
//! - In-memory, behind a Tokio mutex (tests and single-node demos)

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use hotel_core::result::AppResult;
use hotel_core::types::{BookingId, HotelId, PageRequest, PageResponse, RoomId, UserId};
use hotel_entity::booking::{Booking, BookingStatus, CreateBooking};
use hotel_entity::hotel::Hotel;
use hotel_entity::payment::{CreatePayment, Payment};
use hotel_entity::room::Room;

pub use memory::MemoryBookingStore;
pub use postgres::PgBookingStore;

/// Result of a reserve-if-available attempt.
#[derive(Debug, Clone)]
pub enum ReserveOutcome {
    /// The booking was inserted as `pending_payment`.
    Reserved(Booking),
    /// Not enough units remain; nothing was written.
    Insufficient {
        /// Units still free over the requested stay (never negative).
        available: i64,
    },
}

/// Optional predicates for booking listings.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct BookingFilter {
    /// Restrict to one user's bookings.
    pub user_id: Option<UserId>,
    /// Restrict to one lifecycle state.
    pub status: Option<BookingStatus>,
}

impl BookingFilter {
    /// Whether a booking satisfies every set predicate.
    pub fn matches(&self, booking: &Booking) -> bool {
        self.user_id.is_none_or(|u| booking.user_id == u)
            && self.status.is_none_or(|s| booking.status == s)
    }
}

/// Persistence for hotels, rooms, bookings, and payments.
///
/// Implementations must serialize [`BookingStore::reserve_if_available`]
/// calls for the same room so that concurrent admissions never hold more
/// units than the room type has. Transient failures (lock timeouts,
/// serialization failures, pool exhaustion) are reported as retryable
/// errors and leave no partial writes.
#[async_trait]
pub trait BookingStore: Send + Sync + std::fmt::Debug {
    /// Find a hotel by ID.
    async fn find_hotel(&self, id: HotelId) -> AppResult<Option<Hotel>>;

    /// Find a room type by ID.
    async fn find_room(&self, id: RoomId) -> AppResult<Option<Room>>;

    /// List the room types of a hotel.
    async fn rooms_for_hotel(&self, hotel_id: HotelId) -> AppResult<Vec<Room>>;

    /// Units held by active bookings overlapping `[check_in, check_out)`.
    ///
    /// Takes no lock; the figure is advisory.
    async fn booked_rooms(
        &self,
        room_id: RoomId,
        check_in: DateTime<Utc>,
        check_out: DateTime<Utc>,
    ) -> AppResult<i64>;

    /// Atomically check inventory and insert the booking if it fits.
    async fn reserve_if_available(&self, data: &CreateBooking) -> AppResult<ReserveOutcome>;

    /// Find a booking by ID.
    async fn find_booking(&self, id: BookingId) -> AppResult<Option<Booking>>;

    /// List bookings, newest first.
    async fn list_bookings(
        &self,
        filter: &BookingFilter,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Booking>>;

    /// Payments recorded against a booking.
    async fn payments_for(&self, booking_id: BookingId) -> AppResult<Vec<Payment>>;

    /// Move a `pending_payment` booking to `confirmed/paid` and record the
    /// payment in the same unit of work.
    ///
    /// Returns `None` when the booking is missing or no longer pending.
    async fn confirm_payment(
        &self,
        id: BookingId,
        payment: &CreatePayment,
    ) -> AppResult<Option<Booking>>;

    /// Move an active booking to `cancelled`, refunding it if paid.
    ///
    /// Returns `None` when the booking is missing or already terminal.
    async fn cancel(&self, id: BookingId) -> AppResult<Option<Booking>>;

    /// Verify the backing store is reachable.
    async fn health_check(&self) -> AppResult<()>;
}
