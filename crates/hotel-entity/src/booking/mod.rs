//! Booking domain entities.

pub mod model;
pub mod status;

pub use model::{Booking, CreateBooking, ranges_overlap};
pub use status::{BookingStatus, PaymentStatus};
