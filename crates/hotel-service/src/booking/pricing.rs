//! Booking price computation.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use hotel_core::config::BookingConfig;

/// Itemised price returned with a new booking.
///
/// Amounts serialize as decimal strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceBreakdown {
    /// Nightly rate of one unit.
    pub room_rate: Decimal,
    /// Billable nights.
    pub nights: i64,
    /// Units booked.
    pub rooms_count: i32,
    /// `room_rate × nights × rooms_count`.
    pub subtotal: Decimal,
    /// `subtotal × tax_rate`.
    pub taxes: Decimal,
    /// Flat fee.
    pub service_fee: Decimal,
    /// `subtotal + taxes + service_fee`.
    pub total: Decimal,
}

/// Tax rate and service fee applied to every booking.
#[derive(Debug, Clone, Copy)]
pub struct PricingPolicy {
    tax_rate: Decimal,
    service_fee: Decimal,
}

impl PricingPolicy {
    /// Policy with explicit rates.
    pub fn new(tax_rate: Decimal, service_fee: Decimal) -> Self {
        Self {
            tax_rate,
            service_fee,
        }
    }

    /// Policy from booking configuration.
    pub fn from_config(config: &BookingConfig) -> Self {
        Self::new(config.tax_rate, config.service_fee)
    }

    /// Price `rooms_count` units at `room_rate` for `nights`.
    pub fn quote(&self, room_rate: Decimal, nights: i64, rooms_count: i32) -> PriceBreakdown {
        let subtotal = money(room_rate * Decimal::from(nights) * Decimal::from(rooms_count));
        let taxes = money(subtotal * self.tax_rate);
        let service_fee = money(self.service_fee);

        PriceBreakdown {
            room_rate,
            nights,
            rooms_count,
            subtotal,
            taxes,
            service_fee,
            total: subtotal + taxes + service_fee,
        }
    }
}

/// Round to cents, half away from zero.
fn money(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}
