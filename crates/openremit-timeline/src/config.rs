//! Timeline configuration
//!
//! Base delivery durations per rail (bank transfers banded by region) and
//! the delay threshold. Defaults are the published delivery promises.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Delivery timeframe configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimelineConfig {
    /// Elapsed time beyond which a pending order counts as delayed
    /// (strictly greater than, in whole minutes)
    #[serde(with = "humantime_serde")]
    pub delay_threshold: Duration,

    /// Bank transfer to a Gulf destination
    #[serde(with = "humantime_serde")]
    pub bank_gulf: Duration,
    /// Bank transfer to a South Asia destination
    #[serde(with = "humantime_serde")]
    pub bank_south_asia: Duration,
    /// Bank transfer to a Western destination
    #[serde(with = "humantime_serde")]
    pub bank_western: Duration,
    /// Bank transfer anywhere else
    #[serde(with = "humantime_serde")]
    pub bank_other: Duration,

    /// Cash pickup, any destination
    #[serde(with = "humantime_serde")]
    pub cash_pickup: Duration,
    /// Mobile wallet, any destination
    #[serde(with = "humantime_serde")]
    pub mobile_wallet: Duration,
    /// UPI, any destination
    #[serde(with = "humantime_serde")]
    pub upi: Duration,
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self {
            delay_threshold: Duration::from_secs(10 * 60), // 10 minutes
            bank_gulf: Duration::from_secs(60 * 60),       // 1 hour
            bank_south_asia: Duration::from_secs(2 * 60 * 60), // 2 hours
            bank_western: Duration::from_secs(4 * 60 * 60), // 4 hours
            bank_other: Duration::from_secs(6 * 60 * 60),  // 6 hours
            cash_pickup: Duration::from_secs(30 * 60),     // 30 minutes
            mobile_wallet: Duration::from_secs(15 * 60),   // 15 minutes
            upi: Duration::from_secs(5 * 60),              // 5 minutes
        }
    }
}

impl TimelineConfig {
    /// Create configuration from environment variables
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(raw) = std::env::var("OPENREMIT_DELAY_THRESHOLD_SECS") {
            if let Ok(secs) = raw.parse::<u64>() {
                config.delay_threshold = Duration::from_secs(secs);
            }
        }

        config
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        let durations = [
            ("delay threshold", self.delay_threshold),
            ("gulf bank duration", self.bank_gulf),
            ("south asia bank duration", self.bank_south_asia),
            ("western bank duration", self.bank_western),
            ("other bank duration", self.bank_other),
            ("cash pickup duration", self.cash_pickup),
            ("mobile wallet duration", self.mobile_wallet),
            ("upi duration", self.upi),
        ];
        for (name, duration) in durations {
            if duration.is_zero() {
                errors.push(format!("{name} must be greater than zero"));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
