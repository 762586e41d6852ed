//! Route definitions for the hotel booking HTTP API.
//!
//! All routes are organized by domain and mounted under `/api`.
//! The router receives `AppState` and passes it to all handlers via Axum's `State` extractor.

use axum::{
    Router, middleware as axum_middleware,
    routing::{get, patch, post},
};

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the Axum router with all routes and request logging.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(health_routes())
        .merge(hotel_routes())
        .merge(booking_routes())
        .merge(admin_routes());

    Router::new()
        .nest("/api", api_routes)
        .layer(axum_middleware::from_fn(middleware::logging::request_logging))
        .with_state(state)
}

fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health_check))
}

/// Public availability lookup
fn hotel_routes() -> Router<AppState> {
    Router::new().route(
        "/hotels/{id}/availability",
        get(handlers::hotel::availability),
    )
}

/// Guest booking lifecycle
fn booking_routes() -> Router<AppState> {
    Router::new()
        .route("/bookings", post(handlers::booking::create_booking))
        .route("/bookings/my", get(handlers::booking::my_bookings))
        .route("/bookings/{id}", get(handlers::booking::get_booking))
        .route(
            "/bookings/{id}/cancel",
            patch(handlers::booking::cancel_booking),
        )
        .route(
            "/bookings/{id}/confirm-payment",
            post(handlers::booking::confirm_payment),
        )
}

/// Admin booking management
fn admin_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/admin/bookings",
            get(handlers::admin::bookings::list_bookings),
        )
        .route(
            "/admin/bookings/{id}/cancel",
            patch(handlers::admin::bookings::cancel_booking),
        )
}
