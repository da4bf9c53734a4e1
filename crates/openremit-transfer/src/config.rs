//! Transfer execution configuration
//!
//! Platform-wide limits and the fee schedule. Defaults reflect current
//! operating policy; every figure can be overridden through configuration
//! or the environment.

use openremit_types::CurrencyCode;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Flat-rate fee schedule with a floor and a cap.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeeSchedule {
    /// Fraction of the send amount charged as fee
    pub rate: Decimal,
    /// Floor applied after the rate
    pub minimum: Decimal,
    /// Cap applied after the rate
    pub maximum: Decimal,
}

impl Default for FeeSchedule {
    fn default() -> Self {
        Self {
            rate: dec!(0.01), // 1%
            minimum: dec!(5.00),
            maximum: dec!(50.00),
        }
    }
}

/// Transfer execution configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransferConfig {
    /// Per-transfer ceiling on the send amount (home currency)
    pub send_limit: Decimal,
    /// Currency customers fund transfers in
    pub home_currency: CurrencyCode,
    /// Destination currency quoted during discovery
    pub reference_currency: CurrencyCode,
    /// Fee schedule applied on execution
    pub fees: FeeSchedule,
    /// Amounts offered during discovery
    pub suggested_amounts: Vec<Decimal>,
    /// Base URL payment links are rendered under
    pub payment_base_url: String,
}

impl Default for TransferConfig {
    fn default() -> Self {
        Self {
            send_limit: dec!(50_000),
            home_currency: CurrencyCode::new("USD"),
            reference_currency: CurrencyCode::new("INR"),
            fees: FeeSchedule::default(),
            suggested_amounts: vec![dec!(100), dec!(500), dec!(1000), dec!(2000), dec!(5000)],
            payment_base_url: "https://pay.openremit.example".to_string(),
        }
    }
}

impl TransferConfig {
    /// Create configuration from environment variables
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(raw) = std::env::var("OPENREMIT_SEND_LIMIT") {
            if let Ok(limit) = raw.parse::<Decimal>() {
                config.send_limit = limit;
            }
        }
        if let Ok(url) = std::env::var("OPENREMIT_PAYMENT_BASE_URL") {
            config.payment_base_url = url;
        }

        config
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if self.send_limit <= Decimal::ZERO {
            errors.push("send limit must be positive".to_string());
        }
        if self.fees.rate <= Decimal::ZERO {
            errors.push("fee rate must be positive".to_string());
        }
        if self.fees.minimum < Decimal::ZERO {
            errors.push("fee minimum must not be negative".to_string());
        }
        if self.fees.minimum > self.fees.maximum {
            errors.push("fee minimum must not exceed fee maximum".to_string());
        }
        if self.payment_base_url.is_empty() {
            errors.push("payment base URL must be set".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = TransferConfig::default();
        assert_eq!(config.send_limit, dec!(50_000));
        assert_eq!(config.fees.rate, dec!(0.01));
        assert_eq!(config.fees.minimum, dec!(5.00));
        assert_eq!(config.fees.maximum, dec!(50.00));
        assert_eq!(config.home_currency, CurrencyCode::new("USD"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_rejects_inverted_fee_band() {
        let mut config = TransferConfig::default();
        config.fees.minimum = dec!(60);
        let errors = config.validate().unwrap_err();
        assert!(errors.iter().any(|e| e.contains("fee minimum")));
    }

    #[test]
    fn test_validation_rejects_nonpositive_limit() {
        let mut config = TransferConfig::default();
        config.send_limit = Decimal::ZERO;
        assert!(config.validate().is_err());
    }
}
