//! Booking workflow service.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use hotel_core::config::BookingConfig;
use hotel_core::error::AppError;
use hotel_core::result::AppResult;
use hotel_core::types::{BookingId, HotelId, PageRequest, PageResponse, RoomId};
use hotel_database::store::{BookingFilter, BookingStore, ReserveOutcome};
use hotel_entity::booking::{Booking, BookingStatus, CreateBooking};
use hotel_entity::payment::{CreatePayment, Payment};

use super::error::BookingError;
use super::policy::CancellationPolicy;
use super::pricing::{PriceBreakdown, PricingPolicy};
use super::stay::count_nights;
use crate::context::RequestContext;

/// A validated request to book a room type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewBooking {
    /// Hotel the room belongs to.
    pub hotel_id: HotelId,
    /// Room type to book.
    pub room_id: RoomId,
    /// Start of the stay.
    pub check_in: DateTime<Utc>,
    /// End of the stay (exclusive).
    pub check_out: DateTime<Utc>,
    /// Guests across all units.
    pub guests: i32,
    /// Units requested.
    pub rooms_count: i32,
    /// Lead guest name.
    pub guest_name: String,
    /// Lead guest email.
    pub guest_email: String,
    /// Lead guest phone.
    pub guest_phone: String,
    /// Free-form requests.
    pub special_notes: Option<String>,
}

/// A freshly admitted booking with its itemised price.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingWithPrice {
    /// The inserted booking.
    #[serde(flatten)]
    pub booking: Booking,
    /// How `total_amount` was derived.
    pub price_breakdown: PriceBreakdown,
}

/// A booking with its payment history.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingDetails {
    /// The booking.
    #[serde(flatten)]
    pub booking: Booking,
    /// Payments recorded against it.
    pub payments: Vec<Payment>,
}

/// Admits, confirms, cancels, and lists bookings.
#[derive(Debug, Clone)]
pub struct BookingService {
    store: Arc<dyn BookingStore>,
    pricing: PricingPolicy,
    cancellation: CancellationPolicy,
    config: BookingConfig,
}

impl BookingService {
    /// Creates a booking service over `store`.
    pub fn new(store: Arc<dyn BookingStore>, config: BookingConfig) -> Self {
        Self {
            store,
            pricing: PricingPolicy::from_config(&config),
            cancellation: CancellationPolicy::from_config(&config),
            config,
        }
    }

    /// Validate, price, and atomically reserve a booking.
    ///
    /// All precondition failures happen before the store is asked to lock
    /// anything. Transient store failures are retried with linear backoff
    /// up to `max_reserve_attempts` times.
    pub async fn attempt_booking(
        &self,
        ctx: &RequestContext,
        req: NewBooking,
    ) -> AppResult<BookingWithPrice> {
        if req.guests < 1 || req.rooms_count < 1 {
            return Err(BookingError::InvalidQuantity.into());
        }

        let room = self
            .store
            .find_room(req.room_id)
            .await?
            .ok_or(BookingError::RoomNotFound)?;

        if !room.belongs_to(req.hotel_id) {
            return Err(BookingError::RoomNotInHotel.into());
        }

        let max_guests = room.max_guests(req.rooms_count);
        if i64::from(req.guests) > max_guests {
            return Err(BookingError::CapacityExceeded {
                max_guests,
                rooms_count: req.rooms_count,
            }
            .into());
        }

        let nights = count_nights(req.check_in, req.check_out);
        if nights < 1 {
            return Err(BookingError::StayTooShort.into());
        }

        let price = self.pricing.quote(room.price_per_night, nights, req.rooms_count);

        let data = CreateBooking {
            user_id: ctx.user_id,
            hotel_id: req.hotel_id,
            room_id: req.room_id,
            check_in: req.check_in,
            check_out: req.check_out,
            guests: req.guests,
            rooms_count: req.rooms_count,
            total_amount: price.total,
            guest_name: req.guest_name,
            guest_email: req.guest_email,
            guest_phone: req.guest_phone,
            special_notes: req.special_notes,
        };

        match self.reserve_with_retry(&data).await? {
            ReserveOutcome::Reserved(booking) => {
                info!(
                    booking_id = %booking.id,
                    user_id = %ctx.user_id,
                    room_id = %booking.room_id,
                    nights,
                    total = %booking.total_amount,
                    "Booking created"
                );
                Ok(BookingWithPrice {
                    booking,
                    price_breakdown: price,
                })
            }
            ReserveOutcome::Insufficient { available } => {
                info!(
                    user_id = %ctx.user_id,
                    room_id = %data.room_id,
                    requested = data.rooms_count,
                    available,
                    "Booking rejected: insufficient inventory"
                );
                Err(BookingError::InsufficientRooms { available }.into())
            }
        }
    }

    async fn reserve_with_retry(&self, data: &CreateBooking) -> AppResult<ReserveOutcome> {
        let max_attempts = self.config.max_reserve_attempts.max(1);
        let mut attempt = 1u32;

        loop {
            match self.store.reserve_if_available(data).await {
                Err(err) if err.is_retryable() && attempt < max_attempts => {
                    warn!(
                        room_id = %data.room_id,
                        attempt,
                        max_attempts,
                        error = %err,
                        "Admission attempt failed, retrying"
                    );
                    let backoff = self.config.retry_backoff_ms * u64::from(attempt);
                    tokio::time::sleep(Duration::from_millis(backoff)).await;
                    attempt += 1;
                }
                Err(err) if err.is_retryable() => {
                    warn!(
                        room_id = %data.room_id,
                        attempts = attempt,
                        error = %err,
                        "Admission attempts exhausted"
                    );
                    return Err(err);
                }
                other => return other,
            }
        }
    }

    /// Fetch a booking with its payments.
    ///
    /// Bookings owned by someone else are reported as missing unless the
    /// caller is an admin.
    pub async fn get_booking(&self, ctx: &RequestContext, id: BookingId) -> AppResult<BookingDetails> {
        let booking = self.visible_booking(ctx, id).await?;
        let payments = self.store.payments_for(id).await?;
        Ok(BookingDetails { booking, payments })
    }

    /// The caller's bookings, newest first.
    pub async fn list_my_bookings(
        &self,
        ctx: &RequestContext,
        status: Option<BookingStatus>,
        page: PageRequest,
    ) -> AppResult<PageResponse<Booking>> {
        let filter = BookingFilter {
            user_id: Some(ctx.user_id),
            status,
        };
        self.store.list_bookings(&filter, &page).await
    }

    /// Every booking, newest first. Admin only.
    pub async fn list_all_bookings(
        &self,
        ctx: &RequestContext,
        status: Option<BookingStatus>,
        page: PageRequest,
    ) -> AppResult<PageResponse<Booking>> {
        require_admin(ctx)?;
        let filter = BookingFilter {
            user_id: None,
            status,
        };
        self.store.list_bookings(&filter, &page).await
    }

    /// Record a successful payment and confirm the booking.
    ///
    /// Only `pending_payment` bookings can be confirmed; a second
    /// confirmation is rejected.
    pub async fn confirm_payment(
        &self,
        ctx: &RequestContext,
        id: BookingId,
        payment_ref: &str,
    ) -> AppResult<Booking> {
        let payment_ref = payment_ref.trim();
        if payment_ref.is_empty() {
            return Err(BookingError::MissingPaymentRef.into());
        }

        let booking = self.visible_booking(ctx, id).await?;
        if booking.status != BookingStatus::PendingPayment {
            return Err(BookingError::NotPendingPayment {
                status: booking.status,
            }
            .into());
        }

        let payment = CreatePayment {
            provider: self.config.payment_provider.clone(),
            provider_ref: payment_ref.to_string(),
            amount: booking.total_amount,
            currency: self.config.currency.clone(),
        };

        match self.store.confirm_payment(id, &payment).await? {
            Some(confirmed) => {
                info!(
                    booking_id = %id,
                    user_id = %ctx.user_id,
                    amount = %payment.amount,
                    "Payment confirmed"
                );
                Ok(confirmed)
            }
            None => Err(self.lost_race_error(id, true).await),
        }
    }

    /// Cancel the caller's booking, subject to the cancellation window.
    pub async fn cancel(&self, ctx: &RequestContext, id: BookingId) -> AppResult<Booking> {
        let booking = self.visible_booking(ctx, id).await?;
        if let Some(err) = BookingError::for_cancel_from(booking.status) {
            return Err(err.into());
        }
        self.cancellation.check(booking.check_in, ctx.request_time)?;

        self.apply_cancel(ctx, id).await
    }

    /// Cancel any booking regardless of the cancellation window. Admin only.
    pub async fn admin_cancel(&self, ctx: &RequestContext, id: BookingId) -> AppResult<Booking> {
        require_admin(ctx)?;
        let booking = self
            .store
            .find_booking(id)
            .await?
            .ok_or(BookingError::BookingNotFound)?;
        if let Some(err) = BookingError::for_cancel_from(booking.status) {
            return Err(err.into());
        }

        self.apply_cancel(ctx, id).await
    }

    async fn apply_cancel(&self, ctx: &RequestContext, id: BookingId) -> AppResult<Booking> {
        match self.store.cancel(id).await? {
            Some(cancelled) => {
                info!(
                    booking_id = %id,
                    user_id = %ctx.user_id,
                    payment_status = %cancelled.payment_status,
                    "Booking cancelled"
                );
                Ok(cancelled)
            }
            None => Err(self.lost_race_error(id, false).await),
        }
    }

    async fn visible_booking(&self, ctx: &RequestContext, id: BookingId) -> AppResult<Booking> {
        self.store
            .find_booking(id)
            .await?
            .filter(|b| ctx.is_admin() || b.is_owned_by(ctx.user_id))
            .ok_or_else(|| BookingError::BookingNotFound.into())
    }

    /// Explain a conditional transition that matched no row.
    async fn lost_race_error(&self, id: BookingId, confirming: bool) -> AppError {
        let status = match self.store.find_booking(id).await {
            Ok(Some(b)) => b.status,
            Ok(None) => return BookingError::BookingNotFound.into(),
            Err(err) => return err,
        };
        if confirming {
            return BookingError::NotPendingPayment { status }.into();
        }
        match BookingError::for_cancel_from(status) {
            Some(err) => err.into(),
            None => AppError::conflict("Booking was modified concurrently"),
        }
    }
}

fn require_admin(ctx: &RequestContext) -> Result<(), BookingError> {
    if ctx.is_admin() {
        Ok(())
    } else {
        Err(BookingError::AdminRequired)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    use async_trait::async_trait;
    use chrono::{Duration as ChronoDuration, TimeZone};
    use hotel_core::error::ErrorKind;
    use hotel_core::types::UserId;
    use hotel_database::store::MemoryBookingStore;
    use hotel_entity::booking::PaymentStatus;
    use hotel_entity::hotel::Hotel;
    use hotel_entity::room::Room;
    use hotel_entity::user::UserRole;
    use rust_decimal_macros::dec;

    /// Delegates to a memory store, failing the first `failures` admissions
    /// with a retryable error.
    #[derive(Debug)]
    struct FlakyStore {
        inner: MemoryBookingStore,
        failures: u32,
        reserve_calls: AtomicU32,
    }

    impl FlakyStore {
        fn new(inner: MemoryBookingStore, failures: u32) -> Self {
            Self {
                inner,
                failures,
                reserve_calls: AtomicU32::new(0),
            }
        }

        fn calls(&self) -> u32 {
            self.reserve_calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl BookingStore for FlakyStore {
        async fn find_hotel(&self, id: HotelId) -> AppResult<Option<Hotel>> {
            self.inner.find_hotel(id).await
        }

        async fn find_room(&self, id: RoomId) -> AppResult<Option<Room>> {
            self.inner.find_room(id).await
        }

        async fn rooms_for_hotel(&self, hotel_id: HotelId) -> AppResult<Vec<Room>> {
            self.inner.rooms_for_hotel(hotel_id).await
        }

        async fn booked_rooms(
            &self,
            room_id: RoomId,
            check_in: DateTime<Utc>,
            check_out: DateTime<Utc>,
        ) -> AppResult<i64> {
            self.inner.booked_rooms(room_id, check_in, check_out).await
        }

        async fn reserve_if_available(&self, data: &CreateBooking) -> AppResult<ReserveOutcome> {
            let call = self.reserve_calls.fetch_add(1, Ordering::SeqCst);
            if call < self.failures {
                return Err(AppError::service_unavailable("lock timeout"));
            }
            self.inner.reserve_if_available(data).await
        }

        async fn find_booking(&self, id: BookingId) -> AppResult<Option<Booking>> {
            self.inner.find_booking(id).await
        }

        async fn list_bookings(
            &self,
            filter: &BookingFilter,
            page: &PageRequest,
        ) -> AppResult<PageResponse<Booking>> {
            self.inner.list_bookings(filter, page).await
        }

        async fn payments_for(&self, booking_id: BookingId) -> AppResult<Vec<Payment>> {
            self.inner.payments_for(booking_id).await
        }

        async fn confirm_payment(
            &self,
            id: BookingId,
            payment: &CreatePayment,
        ) -> AppResult<Option<Booking>> {
            self.inner.confirm_payment(id, payment).await
        }

        async fn cancel(&self, id: BookingId) -> AppResult<Option<Booking>> {
            self.inner.cancel(id).await
        }

        async fn health_check(&self) -> AppResult<()> {
            Ok(())
        }
    }

    struct Fixture {
        store: MemoryBookingStore,
        hotel_id: HotelId,
        room: Room,
    }

    async fn fixture(total_rooms: i32) -> Fixture {
        let store = MemoryBookingStore::new();
        let hotel_id = HotelId::new();
        store
            .insert_hotel(Hotel {
                id: hotel_id,
                name: "Grand Budapest".into(),
                city: "Zubrowka".into(),
                address: "1 Alpine Way".into(),
                price_from: dec!(100),
                created_at: Utc::now(),
            })
            .await;
        let room = Room {
            id: RoomId::new(),
            hotel_id,
            name: "Standard Double".into(),
            room_type: "double".into(),
            capacity: 2,
            price_per_night: dec!(100),
            total_rooms,
            created_at: Utc::now(),
        };
        store.insert_room(room.clone()).await;
        Fixture {
            store,
            hotel_id,
            room,
        }
    }

    fn guest() -> RequestContext {
        RequestContext::new(UserId::new(), UserRole::User, "guest@example.com")
    }

    fn admin() -> RequestContext {
        RequestContext::new(UserId::new(), UserRole::Admin, "admin@example.com")
    }

    fn stay_from(check_in: DateTime<Utc>, nights: i64) -> (DateTime<Utc>, DateTime<Utc>) {
        (check_in, check_in + ChronoDuration::days(nights))
    }

    fn new_booking(fx: &Fixture, check_in: DateTime<Utc>, check_out: DateTime<Utc>) -> NewBooking {
        NewBooking {
            hotel_id: fx.hotel_id,
            room_id: fx.room.id,
            check_in,
            check_out,
            guests: 2,
            rooms_count: 1,
            guest_name: "Zero Moustafa".into(),
            guest_email: "zero@example.com".into(),
            guest_phone: "+36 1 555 0100".into(),
            special_notes: None,
        }
    }

    fn june(day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2031, 6, day, 14, 0, 0).unwrap()
    }

    fn service_over(store: Arc<dyn BookingStore>) -> BookingService {
        BookingService::new(store, BookingConfig::default())
    }

    #[tokio::test]
    async fn test_booking_is_priced_and_pending() {
        let fx = fixture(5).await;
        let service = service_over(Arc::new(fx.store.clone()));
        let (check_in, check_out) = stay_from(june(1), 3);

        let created = service
            .attempt_booking(&guest(), new_booking(&fx, check_in, check_out))
            .await
            .unwrap();

        assert_eq!(created.price_breakdown.nights, 3);
        assert_eq!(created.price_breakdown.total, dec!(361));
        assert_eq!(created.booking.total_amount, dec!(361));
        assert_eq!(created.booking.status, BookingStatus::PendingPayment);
        assert_eq!(created.booking.payment_status, PaymentStatus::Pending);
    }

    #[tokio::test]
    async fn test_capacity_rejected_without_reserving() {
        let fx = fixture(5).await;
        let flaky = Arc::new(FlakyStore::new(fx.store.clone(), 0));
        let service = service_over(flaky.clone());
        let (check_in, check_out) = stay_from(june(1), 2);
        let mut req = new_booking(&fx, check_in, check_out);
        req.guests = 3;

        let err = service.attempt_booking(&guest(), req).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::BadRequest);
        assert_eq!(flaky.calls(), 0);
    }

    #[tokio::test]
    async fn test_room_from_other_hotel_rejected() {
        let fx = fixture(5).await;
        let service = service_over(Arc::new(fx.store.clone()));
        let (check_in, check_out) = stay_from(june(1), 2);
        let mut req = new_booking(&fx, check_in, check_out);
        req.hotel_id = HotelId::new();

        let err = service.attempt_booking(&guest(), req).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::BadRequest);
        assert_eq!(err.message, "Room does not belong to this hotel");
    }

    #[tokio::test]
    async fn test_unknown_room_not_found() {
        let fx = fixture(5).await;
        let service = service_over(Arc::new(fx.store.clone()));
        let (check_in, check_out) = stay_from(june(1), 2);
        let mut req = new_booking(&fx, check_in, check_out);
        req.room_id = RoomId::new();

        let err = service.attempt_booking(&guest(), req).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_sold_out_reports_zero_available() {
        let fx = fixture(1).await;
        let service = service_over(Arc::new(fx.store.clone()));
        let (check_in, check_out) = stay_from(june(1), 3);
        service
            .attempt_booking(&guest(), new_booking(&fx, check_in, check_out))
            .await
            .unwrap();

        let err = service
            .attempt_booking(&guest(), new_booking(&fx, june(2), june(3)))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Conflict);
        assert_eq!(err.details, Some(serde_json::json!({ "available": 0 })));
    }

    #[tokio::test(start_paused = true)]
    async fn test_transient_failures_are_retried() {
        let fx = fixture(1).await;
        let flaky = Arc::new(FlakyStore::new(fx.store.clone(), 2));
        let service = service_over(flaky.clone());
        let (check_in, check_out) = stay_from(june(1), 1);

        let created = service
            .attempt_booking(&guest(), new_booking(&fx, check_in, check_out))
            .await;
        assert!(created.is_ok());
        assert_eq!(flaky.calls(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_exhausted_retries_surface_as_unavailable() {
        let fx = fixture(1).await;
        let flaky = Arc::new(FlakyStore::new(fx.store.clone(), 10));
        let service = service_over(flaky.clone());
        let (check_in, check_out) = stay_from(june(1), 1);

        let err = service
            .attempt_booking(&guest(), new_booking(&fx, check_in, check_out))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::ServiceUnavailable);
        assert_eq!(flaky.calls(), BookingConfig::default().max_reserve_attempts);
        assert_eq!(fx.store.booked_rooms(fx.room.id, check_in, check_out).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_double_confirmation_rejected() {
        let fx = fixture(2).await;
        let service = service_over(Arc::new(fx.store.clone()));
        let ctx = guest();
        let (check_in, check_out) = stay_from(june(10), 2);
        let created = service
            .attempt_booking(&ctx, new_booking(&fx, check_in, check_out))
            .await
            .unwrap();
        let id = created.booking.id;

        let confirmed = service.confirm_payment(&ctx, id, "pi_3Nx").await.unwrap();
        assert_eq!(confirmed.status, BookingStatus::Confirmed);
        assert_eq!(confirmed.payment_status, PaymentStatus::Paid);

        let err = service.confirm_payment(&ctx, id, "pi_3Nx").await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Conflict);

        let details = service.get_booking(&ctx, id).await.unwrap();
        assert_eq!(details.payments.len(), 1);
        assert_eq!(details.payments[0].amount, created.booking.total_amount);
        assert_eq!(details.payments[0].currency, "USD");
        assert_eq!(details.payments[0].provider, "stripe");
    }

    #[tokio::test]
    async fn test_blank_payment_ref_rejected() {
        let fx = fixture(2).await;
        let service = service_over(Arc::new(fx.store.clone()));
        let err = service
            .confirm_payment(&guest(), BookingId::new(), "   ")
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::BadRequest);
    }

    async fn paid_booking(
        fx: &Fixture,
        ctx: &RequestContext,
        check_in: DateTime<Utc>,
    ) -> Booking {
        let booking = Booking {
            id: BookingId::new(),
            user_id: ctx.user_id,
            hotel_id: fx.hotel_id,
            room_id: fx.room.id,
            check_in,
            check_out: check_in + ChronoDuration::days(2),
            guests: 2,
            rooms_count: 1,
            total_amount: dec!(249),
            guest_name: "M. Gustave".into(),
            guest_email: "gustave@example.com".into(),
            guest_phone: "+36 1 555 0199".into(),
            special_notes: None,
            status: BookingStatus::PendingPayment,
            payment_status: PaymentStatus::Pending,
            created_at: ctx.request_time,
            updated_at: ctx.request_time,
        };
        fx.store.insert_booking(booking.clone()).await;
        fx.store
            .confirm_payment(
                booking.id,
                &CreatePayment {
                    provider: "stripe".into(),
                    provider_ref: "pi_seed".into(),
                    amount: booking.total_amount,
                    currency: "USD".into(),
                },
            )
            .await
            .unwrap()
            .unwrap()
    }

    #[tokio::test]
    async fn test_cancel_inside_cutoff_rejected() {
        let fx = fixture(2).await;
        let service = service_over(Arc::new(fx.store.clone()));
        let ctx = guest();
        let booking = paid_booking(&fx, &ctx, ctx.request_time + ChronoDuration::hours(23)).await;

        let err = service.cancel(&ctx, booking.id).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::BadRequest);
        let unchanged = fx.store.find_booking(booking.id).await.unwrap().unwrap();
        assert_eq!(unchanged.status, BookingStatus::Confirmed);
    }

    #[tokio::test]
    async fn test_cancel_outside_cutoff_refunds() {
        let fx = fixture(2).await;
        let service = service_over(Arc::new(fx.store.clone()));
        let ctx = guest();
        let booking = paid_booking(&fx, &ctx, ctx.request_time + ChronoDuration::hours(25)).await;

        let cancelled = service.cancel(&ctx, booking.id).await.unwrap();
        assert_eq!(cancelled.status, BookingStatus::Cancelled);
        assert_eq!(cancelled.payment_status, PaymentStatus::Refunded);

        let payments = fx.store.payments_for(booking.id).await.unwrap();
        assert!(payments.iter().all(|p| p.status == PaymentStatus::Refunded));

        let err = service.cancel(&ctx, booking.id).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Conflict);
        assert_eq!(err.message, "Booking is already cancelled");
    }

    #[tokio::test]
    async fn test_other_users_booking_is_not_found() {
        let fx = fixture(2).await;
        let service = service_over(Arc::new(fx.store.clone()));
        let owner = guest();
        let booking = paid_booking(&fx, &owner, owner.request_time + ChronoDuration::days(7)).await;

        let err = service.get_booking(&guest(), booking.id).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
        let err = service.cancel(&guest(), booking.id).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);

        assert!(service.get_booking(&admin(), booking.id).await.is_ok());
    }

    #[tokio::test]
    async fn test_admin_cancel_ignores_cutoff() {
        let fx = fixture(2).await;
        let service = service_over(Arc::new(fx.store.clone()));
        let owner = guest();
        let booking = paid_booking(&fx, &owner, owner.request_time + ChronoDuration::hours(2)).await;

        let err = service.admin_cancel(&owner, booking.id).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Forbidden);

        let cancelled = service.admin_cancel(&admin(), booking.id).await.unwrap();
        assert_eq!(cancelled.status, BookingStatus::Cancelled);
        assert_eq!(cancelled.payment_status, PaymentStatus::Refunded);
    }

    #[tokio::test]
    async fn test_list_all_requires_admin() {
        let fx = fixture(2).await;
        let service = service_over(Arc::new(fx.store.clone()));
        let err = service
            .list_all_bookings(&guest(), None, PageRequest::default())
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Forbidden);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 8)]
    async fn test_concurrent_attempts_admit_exactly_capacity() {
        let fx = fixture(4).await;
        let service = Arc::new(service_over(Arc::new(fx.store.clone())));
        let (check_in, check_out) = stay_from(june(20), 2);

        let handles: Vec<_> = (0..32)
            .map(|_| {
                let service = service.clone();
                let req = new_booking(&fx, check_in, check_out);
                tokio::spawn(async move { service.attempt_booking(&guest(), req).await })
            })
            .collect();

        let results = futures::future::join_all(handles).await;
        let admitted = results.iter().filter(|r| matches!(r, Ok(Ok(_)))).count();
        let conflicts = results
            .iter()
            .filter(|r| matches!(r, Ok(Err(e)) if e.kind == ErrorKind::Conflict))
            .count();

        assert_eq!(admitted, 4);
        assert_eq!(conflicts, 28);
        assert_eq!(fx.store.occupancy_at(fx.room.id, june(21)).await, 4);
    }
}
