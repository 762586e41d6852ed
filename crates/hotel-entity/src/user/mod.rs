//! User identity types.
//!
//! Accounts live in the identity service; the booking backend only sees
//! the role carried in the access token.

pub mod role;

pub use role::UserRole;
