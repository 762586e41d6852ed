//! Payment entities.

pub mod model;

pub use model::{CreatePayment, Payment};
