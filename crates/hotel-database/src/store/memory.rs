//! In-memory booking store using a Tokio mutex.
//!
//! Every operation takes the same lock, so admissions are serialized
//! across all rooms. Suitable for tests and single-node demos only.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::Mutex;
use tracing::info;

use hotel_core::error::AppError;
use hotel_core::result::AppResult;
use hotel_core::types::{BookingId, HotelId, PageRequest, PageResponse, PaymentId, RoomId};
use hotel_entity::booking::{Booking, BookingStatus, CreateBooking, PaymentStatus};
use hotel_entity::hotel::Hotel;
use hotel_entity::payment::{CreatePayment, Payment};
use hotel_entity::room::Room;

use super::{BookingFilter, BookingStore, ReserveOutcome};

#[derive(Debug, Default)]
struct InnerState {
    hotels: HashMap<HotelId, Hotel>,
    rooms: HashMap<RoomId, Room>,
    bookings: HashMap<BookingId, Booking>,
    payments: Vec<Payment>,
}

impl InnerState {
    fn booked_rooms(
        &self,
        room_id: RoomId,
        check_in: DateTime<Utc>,
        check_out: DateTime<Utc>,
    ) -> i64 {
        self.bookings
            .values()
            .filter(|b| b.room_id == room_id && b.holds_inventory())
            .filter(|b| b.overlaps(check_in, check_out))
            .map(|b| i64::from(b.rooms_count))
            .sum()
    }
}

/// Booking store held entirely in process memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryBookingStore {
    state: Arc<Mutex<InnerState>>,
}

impl MemoryBookingStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a hotel.
    pub async fn insert_hotel(&self, hotel: Hotel) {
        self.state.lock().await.hotels.insert(hotel.id, hotel);
    }

    /// Add or replace a room type.
    pub async fn insert_room(&self, room: Room) {
        self.state.lock().await.rooms.insert(room.id, room);
    }

    /// Add or replace a booking as-is, bypassing admission.
    pub async fn insert_booking(&self, booking: Booking) {
        self.state.lock().await.bookings.insert(booking.id, booking);
    }

    /// Total units held by active bookings of a room at `instant`.
    pub async fn occupancy_at(&self, room_id: RoomId, instant: DateTime<Utc>) -> i64 {
        let state = self.state.lock().await;
        state
            .bookings
            .values()
            .filter(|b| b.room_id == room_id && b.holds_inventory())
            .filter(|b| b.check_in <= instant && instant < b.check_out)
            .map(|b| i64::from(b.rooms_count))
            .sum()
    }
}

#[async_trait]
impl BookingStore for MemoryBookingStore {
    async fn find_hotel(&self, id: HotelId) -> AppResult<Option<Hotel>> {
        Ok(self.state.lock().await.hotels.get(&id).cloned())
    }

    async fn find_room(&self, id: RoomId) -> AppResult<Option<Room>> {
        Ok(self.state.lock().await.rooms.get(&id).cloned())
    }

    async fn rooms_for_hotel(&self, hotel_id: HotelId) -> AppResult<Vec<Room>> {
        let state = self.state.lock().await;
        let mut rooms: Vec<Room> = state
            .rooms
            .values()
            .filter(|r| r.belongs_to(hotel_id))
            .cloned()
            .collect();
        rooms.sort_by(|a, b| {
            a.price_per_night
                .cmp(&b.price_per_night)
                .then_with(|| a.name.cmp(&b.name))
        });
        Ok(rooms)
    }

    async fn booked_rooms(
        &self,
        room_id: RoomId,
        check_in: DateTime<Utc>,
        check_out: DateTime<Utc>,
    ) -> AppResult<i64> {
        Ok(self
            .state
            .lock()
            .await
            .booked_rooms(room_id, check_in, check_out))
    }

    async fn reserve_if_available(&self, data: &CreateBooking) -> AppResult<ReserveOutcome> {
        let mut state = self.state.lock().await;

        let total_rooms = state
            .rooms
            .get(&data.room_id)
            .map(|r| i64::from(r.total_rooms))
            .ok_or_else(|| AppError::not_found("Room not found"))?;

        let booked = state.booked_rooms(data.room_id, data.check_in, data.check_out);
        let available = total_rooms - booked;
        if available < i64::from(data.rooms_count) {
            return Ok(ReserveOutcome::Insufficient {
                available: available.max(0),
            });
        }

        let now = Utc::now();
        let booking = Booking {
            id: BookingId::new(),
            user_id: data.user_id,
            hotel_id: data.hotel_id,
            room_id: data.room_id,
            check_in: data.check_in,
            check_out: data.check_out,
            guests: data.guests,
            rooms_count: data.rooms_count,
            total_amount: data.total_amount,
            guest_name: data.guest_name.clone(),
            guest_email: data.guest_email.clone(),
            guest_phone: data.guest_phone.clone(),
            special_notes: data.special_notes.clone(),
            status: BookingStatus::PendingPayment,
            payment_status: PaymentStatus::Pending,
            created_at: now,
            updated_at: now,
        };
        state.bookings.insert(booking.id, booking.clone());

        info!(
            booking_id = %booking.id,
            room_id = %booking.room_id,
            rooms_count = booking.rooms_count,
            "Rooms reserved"
        );
        Ok(ReserveOutcome::Reserved(booking))
    }

    async fn find_booking(&self, id: BookingId) -> AppResult<Option<Booking>> {
        Ok(self.state.lock().await.bookings.get(&id).cloned())
    }

    async fn list_bookings(
        &self,
        filter: &BookingFilter,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Booking>> {
        let state = self.state.lock().await;
        let mut matching: Vec<&Booking> =
            state.bookings.values().filter(|b| filter.matches(b)).collect();
        matching.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });

        let total = matching.len() as u64;
        let items = matching
            .into_iter()
            .skip(usize::try_from(page.offset()).unwrap_or(usize::MAX))
            .take(usize::try_from(page.limit()).unwrap_or(usize::MAX))
            .cloned()
            .collect();
        Ok(PageResponse::new(items, page, total))
    }

    async fn payments_for(&self, booking_id: BookingId) -> AppResult<Vec<Payment>> {
        let state = self.state.lock().await;
        Ok(state
            .payments
            .iter()
            .filter(|p| p.booking_id == booking_id)
            .cloned()
            .collect())
    }

    async fn confirm_payment(
        &self,
        id: BookingId,
        payment: &CreatePayment,
    ) -> AppResult<Option<Booking>> {
        let mut state = self.state.lock().await;
        let now = Utc::now();

        let Some(booking) = state
            .bookings
            .get_mut(&id)
            .filter(|b| b.status == BookingStatus::PendingPayment)
        else {
            return Ok(None);
        };
        booking.status = BookingStatus::Confirmed;
        booking.payment_status = PaymentStatus::Paid;
        booking.updated_at = now;
        let confirmed = booking.clone();

        state.payments.push(Payment {
            id: PaymentId::new(),
            booking_id: id,
            provider: payment.provider.clone(),
            provider_ref: payment.provider_ref.clone(),
            amount: payment.amount,
            currency: payment.currency.clone(),
            status: PaymentStatus::Paid,
            created_at: now,
        });

        Ok(Some(confirmed))
    }

    async fn cancel(&self, id: BookingId) -> AppResult<Option<Booking>> {
        let mut state = self.state.lock().await;

        let Some(booking) = state.bookings.get_mut(&id).filter(|b| b.holds_inventory()) else {
            return Ok(None);
        };
        booking.status = BookingStatus::Cancelled;
        booking.payment_status = booking.payment_status.after_cancellation();
        booking.updated_at = Utc::now();
        let cancelled = booking.clone();

        if cancelled.payment_status == PaymentStatus::Refunded {
            for payment in state
                .payments
                .iter_mut()
                .filter(|p| p.booking_id == id && p.status == PaymentStatus::Paid)
            {
                payment.status = PaymentStatus::Refunded;
            }
        }

        Ok(Some(cancelled))
    }

    async fn health_check(&self) -> AppResult<()> {
        Ok(())
    }
}
