//! Custom Axum extractors.

pub mod auth;
pub mod pagination;
pub mod path;
pub mod validated;

pub use auth::AuthUser;
pub use pagination::BookingListParams;
pub use path::{ApiPath, ApiQuery};
pub use validated::ValidatedJson;
