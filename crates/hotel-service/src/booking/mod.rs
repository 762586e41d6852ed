//! Booking admission, payment confirmation, and cancellation.

pub mod error;
pub mod policy;
pub mod pricing;
pub mod service;
pub mod stay;

pub use error::BookingError;
pub use policy::CancellationPolicy;
pub use pricing::{PriceBreakdown, PricingPolicy};
pub use service::{BookingDetails, BookingService, BookingWithPrice, NewBooking};
pub use stay::count_nights;
