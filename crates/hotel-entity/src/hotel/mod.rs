//! Hotel domain entities.

pub mod model;

pub use model::Hotel;
