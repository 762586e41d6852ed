//! Booking workflow failures.
//!
//! Every rejection the workflow can produce is a variant here, mapped to
//! `hotel_core::error::AppError` at the service boundary.

use hotel_core::error::AppError;
use hotel_entity::booking::BookingStatus;
use thiserror::Error;

/// Domain error for booking operations.
#[derive(Debug, Error)]
pub enum BookingError {
    // --- Lookup ---
    /// The room type does not exist.
    #[error("Room not found")]
    RoomNotFound,

    /// The hotel does not exist.
    #[error("Hotel not found")]
    HotelNotFound,

    /// The booking does not exist or is not visible to the caller.
    #[error("Booking not found")]
    BookingNotFound,

    // --- Request preconditions ---
    /// The room type is not part of the requested hotel.
    #[error("Room does not belong to this hotel")]
    RoomNotInHotel,

    /// Guest or room counts are not positive.
    #[error("Guests and rooms must both be at least 1")]
    InvalidQuantity,

    /// More guests than the requested units can hold.
    #[error("Room capacity exceeded. Max {max_guests} guests for {rooms_count} room(s)")]
    CapacityExceeded {
        /// Capacity of the requested units.
        max_guests: i64,
        /// Units requested.
        rooms_count: i32,
    },

    /// The stay is shorter than one night.
    #[error("Minimum stay is 1 night")]
    StayTooShort,

    /// A payment reference is required to confirm payment.
    #[error("Payment reference is required")]
    MissingPaymentRef,

    // --- Inventory ---
    /// Not enough units remain over the requested dates.
    #[error("Only {available} room(s) available for the selected dates")]
    InsufficientRooms {
        /// Units still free.
        available: i64,
    },

    // --- Lifecycle ---
    /// Payment can only be confirmed while the booking awaits it.
    #[error("Booking is not pending payment (current status: {status})")]
    NotPendingPayment {
        /// Current status.
        status: BookingStatus,
    },

    /// The booking was already cancelled.
    #[error("Booking is already cancelled")]
    AlreadyCancelled,

    /// Completed stays cannot be cancelled.
    #[error("Cannot cancel a completed booking")]
    AlreadyCompleted,

    /// Too close to check-in to cancel.
    #[error("Cannot cancel within {cutoff_hours} hours of check-in")]
    CancellationWindowClosed {
        /// Configured cutoff.
        cutoff_hours: i64,
    },

    // --- Access ---
    /// The operation is restricted to administrators.
    #[error("Admin access required")]
    AdminRequired,
}

impl BookingError {
    /// The rejection for cancelling a booking in `status`, if any.
    pub fn for_cancel_from(status: BookingStatus) -> Option<Self> {
        match status {
            BookingStatus::Cancelled => Some(Self::AlreadyCancelled),
            BookingStatus::Completed => Some(Self::AlreadyCompleted),
            BookingStatus::PendingPayment | BookingStatus::Confirmed => None,
        }
    }
}

impl From<BookingError> for AppError {
    fn from(err: BookingError) -> Self {
        match &err {
            BookingError::RoomNotFound
            | BookingError::HotelNotFound
            | BookingError::BookingNotFound => AppError::not_found(err.to_string()),
            BookingError::RoomNotInHotel
            | BookingError::InvalidQuantity
            | BookingError::CapacityExceeded { .. }
            | BookingError::StayTooShort
            | BookingError::MissingPaymentRef
            | BookingError::CancellationWindowClosed { .. } => {
                AppError::bad_request(err.to_string())
            }
            BookingError::InsufficientRooms { available } => AppError::conflict(err.to_string())
                .with_details(serde_json::json!({ "available": available })),
            BookingError::NotPendingPayment { .. }
            | BookingError::AlreadyCancelled
            | BookingError::AlreadyCompleted => AppError::conflict(err.to_string()),
            BookingError::AdminRequired => AppError::forbidden(err.to_string()),
        }
    }
}
