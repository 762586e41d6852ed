//! Hotel entity model.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use hotel_core::types::HotelId;

/// A hotel listing. Room inventory hangs off [`crate::room::Room`].
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Hotel {
    /// Unique hotel identifier.
    pub id: HotelId,
    /// Display name.
    pub name: String,
    /// City used for search.
    pub city: String,
    /// Street address.
    pub address: String,
    /// Cheapest nightly rate across the hotel's rooms.
    pub price_from: Decimal,
    /// When the hotel was created.
    pub created_at: DateTime<Utc>,
}
