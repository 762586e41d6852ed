//! Admin-only handlers.

pub mod bookings;
