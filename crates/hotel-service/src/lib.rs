//! # hotel-service
//!
//! Business logic for the hotel booking backend: booking admission with
//! pricing, payment confirmation, cancellation policy, and read-only
//! availability.
//!
//! Services follow constructor injection; the [`hotel_database::BookingStore`]
//! is supplied as an `Arc<dyn BookingStore>` at construction time.

pub mod availability;
pub mod booking;
pub mod context;

pub use availability::{AvailabilityQuery, AvailabilityService, HotelAvailability, RoomAvailability};
pub use booking::{
    BookingDetails, BookingError, BookingService, BookingWithPrice, CancellationPolicy, NewBooking,
    PriceBreakdown, PricingPolicy,
};
pub use context::RequestContext;
