//! # hotel-api
//!
//! HTTP API layer for the hotel booking backend built on Axum.
//!
//! Exposes availability, booking, payment-confirmation, cancellation, and
//! admin booking endpoints, with bearer-token extraction, validated
//! request bodies, CORS, request logging, and error mapping.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::build_app;
pub use error::ApiError;
pub use state::AppState;
