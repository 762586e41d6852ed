//! Route handlers organized by domain.

pub mod admin;
pub mod booking;
pub mod health;
pub mod hotel;
