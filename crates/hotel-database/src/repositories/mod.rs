//! Read-side repositories for hotels, rooms, bookings, and payments.
//!
//! Write paths that must run under a lock live in
//! [`crate::store::PgBookingStore`].

pub mod booking;
pub mod hotel;
pub mod payment;
pub mod room;

pub use booking::BookingRepository;
pub use hotel::HotelRepository;
pub use payment::PaymentRepository;
pub use room::RoomRepository;
