//! Guest cancellation window.

use chrono::{DateTime, Duration, Utc};

use hotel_core::config::BookingConfig;

use super::error::BookingError;

/// Guests may cancel only while at least `cutoff` remains before check-in.
#[derive(Debug, Clone, Copy)]
pub struct CancellationPolicy {
    cutoff_hours: i64,
}

impl CancellationPolicy {
    /// Policy with the given cutoff in hours.
    pub fn new(cutoff_hours: i64) -> Self {
        Self { cutoff_hours }
    }

    /// Policy from booking configuration.
    pub fn from_config(config: &BookingConfig) -> Self {
        Self::new(config.cancellation_cutoff_hours)
    }

    /// Reject when less than the cutoff remains before `check_in` at `now`.
    pub fn check(&self, check_in: DateTime<Utc>, now: DateTime<Utc>) -> Result<(), BookingError> {
        let cutoff = Duration::try_hours(self.cutoff_hours).unwrap_or(Duration::MAX);
        if check_in - now < cutoff {
            return Err(BookingError::CancellationWindowClosed {
                cutoff_hours: self.cutoff_hours,
            });
        }
        Ok(())
    }
}
