//! Payment record model.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use hotel_core::types::{BookingId, PaymentId};

use crate::booking::PaymentStatus;

/// A payment captured by the external provider for a booking.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    /// Unique payment identifier.
    pub id: PaymentId,
    /// The booking this payment settles.
    pub booking_id: BookingId,
    /// Provider name (e.g. "stripe").
    pub provider: String,
    /// Provider-side reference for the charge.
    pub provider_ref: String,
    /// Amount charged.
    pub amount: Decimal,
    /// ISO currency code.
    pub currency: String,
    /// Payment state; flips to `refunded` when the booking is cancelled.
    pub status: PaymentStatus,
    /// When the payment was recorded.
    pub created_at: DateTime<Utc>,
}

/// Data required to record a payment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePayment {
    /// Provider name.
    pub provider: String,
    /// Provider-side reference.
    pub provider_ref: String,
    /// Amount charged.
    pub amount: Decimal,
    /// ISO currency code.
    pub currency: String,
}
