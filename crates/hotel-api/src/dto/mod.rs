//! Request and response data transfer objects.

pub mod request;
pub mod response;

pub use request::{AvailabilityParams, ConfirmPaymentRequest, CreateBookingRequest};
pub use response::{ApiResponse, Pagination};
