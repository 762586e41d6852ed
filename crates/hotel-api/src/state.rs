//! Application state shared across all handlers and extractors.

use std::sync::Arc;

use hotel_auth::JwtDecoder;
use hotel_core::config::AppConfig;
use hotel_database::BookingStore;
use hotel_service::{AvailabilityService, BookingService};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    // ── Configuration ────────────────────────────────────────
    /// Application configuration
    pub config: Arc<AppConfig>,

    // ── Infrastructure ───────────────────────────────────────
    /// Booking store (PostgreSQL or in-memory)
    pub store: Arc<dyn BookingStore>,

    // ── Auth ─────────────────────────────────────────────────
    /// Access-token validator
    pub jwt_decoder: Arc<JwtDecoder>,

    // ── Services ─────────────────────────────────────────────
    /// Admission, payment, and cancellation
    pub booking_service: Arc<BookingService>,
    /// Read-only availability
    pub availability_service: Arc<AvailabilityService>,
}

impl AppState {
    /// Wire services over `store` from configuration.
    pub fn new(config: AppConfig, store: Arc<dyn BookingStore>) -> Self {
        let jwt_decoder = Arc::new(JwtDecoder::new(&config.auth));
        let booking_service = Arc::new(BookingService::new(
            Arc::clone(&store),
            config.booking.clone(),
        ));
        let availability_service = Arc::new(AvailabilityService::new(Arc::clone(&store)));

        Self {
            config: Arc::new(config),
            store,
            jwt_decoder,
            booking_service,
            availability_service,
        }
    }
}
