//! Verification configuration
//!
//! Session lifetime is the single knob here. The default mirrors the
//! operational policy that a verified caller must re-verify after five
//! minutes of session age, regardless of activity.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Verification and session-issuance configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyConfig {
    /// How long a verification session stays active after a successful
    /// challenge. Absolute lifetime, no sliding extension.
    #[serde(with = "humantime_serde")]
    pub session_ttl: Duration,
}

impl Default for VerifyConfig {
    fn default() -> Self {
        Self {
            session_ttl: Duration::from_secs(5 * 60), // 5 minutes
        }
    }
}

impl VerifyConfig {
    /// Create configuration from environment variables
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(raw) = std::env::var("OPENREMIT_SESSION_TTL_SECS") {
            if let Ok(secs) = raw.parse::<u64>() {
                config.session_ttl = Duration::from_secs(secs);
            }
        }

        config
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if self.session_ttl.is_zero() {
            errors.push("session TTL must be greater than zero".to_string());
        }
        if self.session_ttl > Duration::from_secs(60 * 60) {
            errors.push("session TTL should not exceed one hour".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
