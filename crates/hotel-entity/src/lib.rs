//! # hotel-entity
//!
//! Domain entity models for the hotel booking backend. Every struct in this
//! crate represents a database table row or a domain value object. All
//! entities derive `Debug`, `Clone`, `Serialize`, `Deserialize`, and
//! database entities additionally derive `sqlx::FromRow`.

pub mod booking;
pub mod hotel;
pub mod payment;
pub mod room;
pub mod user;
