//! # hotel-auth
//!
//! Verification of access tokens issued by the identity service.
//!
//! ## Modules
//!
//! - `jwt`: claims payload and HS256 signature/expiry validation

pub mod jwt;

pub use jwt::{Claims, JwtDecoder};
