//! Read-only room availability.

pub mod service;

pub use service::{AvailabilityQuery, AvailabilityService, HotelAvailability, RoomAvailability};
