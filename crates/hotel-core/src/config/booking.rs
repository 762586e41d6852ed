//! Booking pricing and admission policy configuration.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Longest cancellation cutoff accepted, one year in hours.
pub const MAX_CUTOFF_HOURS: i64 = 24 * 365;

/// Pricing, cancellation, and admission-retry policy.
///
/// Monetary values are decimals; write them as strings in TOML
/// (`tax_rate = "0.12"`) to avoid a float round-trip.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingConfig {
    /// Tax rate applied to the room subtotal (0.12 = 12%).
    #[serde(default = "default_tax_rate")]
    pub tax_rate: Decimal,
    /// Flat service fee added to every booking.
    #[serde(default = "default_service_fee")]
    pub service_fee: Decimal,
    /// ISO currency code recorded on payments.
    #[serde(default = "default_currency")]
    pub currency: String,
    /// Payment provider name recorded on payments.
    #[serde(default = "default_payment_provider")]
    pub payment_provider: String,
    /// Guests may cancel only while at least this many hours remain before check-in.
    #[serde(default = "default_cutoff_hours")]
    pub cancellation_cutoff_hours: i64,
    /// Total admission attempts when the store reports a transient failure.
    #[serde(default = "default_max_attempts")]
    pub max_reserve_attempts: u32,
    /// Base backoff between admission attempts, multiplied by the attempt number.
    #[serde(default = "default_backoff")]
    pub retry_backoff_ms: u64,
}

impl Default for BookingConfig {
    fn default() -> Self {
        Self {
            tax_rate: default_tax_rate(),
            service_fee: default_service_fee(),
            currency: default_currency(),
            payment_provider: default_payment_provider(),
            cancellation_cutoff_hours: default_cutoff_hours(),
            max_reserve_attempts: default_max_attempts(),
            retry_backoff_ms: default_backoff(),
        }
    }
}

impl BookingConfig {
    /// Reject policies that would make admission or pricing meaningless.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.tax_rate.is_sign_negative() {
            return Err(AppError::configuration("booking.tax_rate must not be negative"));
        }
        if self.service_fee.is_sign_negative() {
            return Err(AppError::configuration(
                "booking.service_fee must not be negative",
            ));
        }
        if self.max_reserve_attempts == 0 {
            return Err(AppError::configuration(
                "booking.max_reserve_attempts must be at least 1",
            ));
        }
        if !(0..=MAX_CUTOFF_HOURS).contains(&self.cancellation_cutoff_hours) {
            return Err(AppError::configuration(format!(
                "booking.cancellation_cutoff_hours must be between 0 and {MAX_CUTOFF_HOURS}"
            )));
        }
        Ok(())
    }
}

fn default_tax_rate() -> Decimal {
    Decimal::new(12, 2)
}

fn default_service_fee() -> Decimal {
    Decimal::new(25, 0)
}

fn default_currency() -> String {
    "USD".to_string()
}

fn default_payment_provider() -> String {
    "stripe".to_string()
}

fn default_cutoff_hours() -> i64 {
    24
}

fn default_max_attempts() -> u32 {
    3
}

fn default_backoff() -> u64 {
    50
}
