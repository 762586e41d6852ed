//! # hotel-database
//!
//! PostgreSQL connection management, migrations, row repositories, and the
//! [`BookingStore`] abstraction that serializes admission per room type.
//! An in-memory store backs tests and single-node demos.

pub mod connection;
pub mod migration;
pub mod repositories;
pub mod store;

pub use connection::DatabasePool;
pub use store::{BookingFilter, BookingStore, MemoryBookingStore, PgBookingStore, ReserveOutcome};
