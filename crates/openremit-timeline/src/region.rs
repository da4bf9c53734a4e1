//! Destination region bands.
//!
//! Bank-transfer settlement speed tracks the destination's banking
//! corridor, not the individual country, so countries collapse into four
//! bands. The lists cover the corridors the platform actually serves;
//! anything unlisted gets the conservative band.

use openremit_types::CountryCode;
use serde::{Deserialize, Serialize};

const GULF: &[&str] = &["AE", "SA", "KW", "QA", "BH", "OM"];
const SOUTH_ASIA: &[&str] = &["IN", "PK", "BD", "LK", "NP"];
const WESTERN: &[&str] = &[
    "US", "GB", "CA", "AU", "NZ", "DE", "FR", "IT", "ES", "NL", "IE",
];

/// Settlement-speed band of a destination country.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Region {
    Gulf,
    SouthAsia,
    Western,
    Other,
}

impl Region {
    /// Band for a destination country code.
    pub fn classify(country: &CountryCode) -> Self {
        let code = country.as_str();
        if GULF.contains(&code) {
            Self::Gulf
        } else if SOUTH_ASIA.contains(&code) {
            Self::SouthAsia
        } else if WESTERN.contains(&code) {
            Self::Western
        } else {
            Self::Other
        }
    }
}
