//! Booking and payment status enumerations.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use hotel_core::AppError;

/// Lifecycle state of a booking.
///
/// ```text
/// pending_payment ──confirm──▶ confirmed ──(external)──▶ completed
///        │                         │
///        └────────cancel───────────┴──▶ cancelled
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "booking_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    /// Inventory is held; waiting for the guest to pay.
    PendingPayment,
    /// Paid and confirmed.
    Confirmed,
    /// Cancelled by the guest or an admin; inventory released.
    Cancelled,
    /// Stay finished.
    Completed,
}

impl BookingStatus {
    /// Statuses whose bookings count against room inventory.
    pub const HOLDING_INVENTORY: [BookingStatus; 2] = [Self::PendingPayment, Self::Confirmed];

    /// Whether a booking in this state occupies room units.
    pub fn holds_inventory(&self) -> bool {
        Self::HOLDING_INVENTORY.contains(self)
    }

    /// Whether no further transitions are possible.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Cancelled | Self::Completed)
    }

    /// Return the status as its wire/database string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PendingPayment => "pending_payment",
            Self::Confirmed => "confirmed",
            Self::Cancelled => "cancelled",
            Self::Completed => "completed",
        }
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for BookingStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending_payment" => Ok(Self::PendingPayment),
            "confirmed" => Ok(Self::Confirmed),
            "cancelled" => Ok(Self::Cancelled),
            "completed" => Ok(Self::Completed),
            _ => Err(AppError::bad_request(format!(
                "Invalid booking status: '{s}'. Expected one of: \
                 pending_payment, confirmed, cancelled, completed"
            ))),
        }
    }
}

/// Payment state of a booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "payment_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    /// Nothing captured yet.
    Pending,
    /// Captured by the provider.
    Paid,
    /// Returned to the guest after cancellation.
    Refunded,
    /// Capture failed.
    Failed,
}

impl PaymentStatus {
    /// Return the status as its wire/database string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Paid => "paid",
            Self::Refunded => "refunded",
            Self::Failed => "failed",
        }
    }

    /// Payment status after the booking is cancelled: paid money is refunded.
    pub fn after_cancellation(self) -> Self {
        match self {
            Self::Paid => Self::Refunded,
            other => other,
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
