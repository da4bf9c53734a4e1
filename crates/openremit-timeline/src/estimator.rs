//! Arrival estimation and delay classification.
//!
//! `estimate_arrival` answers two independent questions about a pending
//! order: when should the money land (`expected_at`), and has the order
//! been pending long enough to call it delayed. The inquiry disposition
//! then maps the estimate and the customer's inquiry history onto the
//! response posture the conversational layer should take.

use chrono::{DateTime, Datelike, Duration, Utc, Weekday};
use serde::Serialize;

use openremit_types::{TransferMode, TransferOrder};

use crate::config::TimelineConfig;
use crate::region::Region;

/// Arrival estimate for one order at a point in time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArrivalEstimate {
    /// When the funds should land
    pub expected_at: DateTime<Utc>,
    /// Whether the order has been pending past the delay threshold
    pub is_delayed: bool,
    /// Whole minutes since creation when delayed, 0 otherwise
    pub delay_minutes: i64,
}

/// How the caller-facing layer should respond to a delivery inquiry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InquiryDisposition {
    /// On track; report the timeframe plainly
    NotDelayed,
    /// Delayed, first or second contact
    DelayedFirstInquiry,
    /// Delayed, the customer keeps asking
    DelayedRepeatInquiry,
    /// Delayed and asked often enough that a human should take over
    Escalate,
}

impl InquiryDisposition {
    /// Pick the posture from the estimate and the inquiry count recorded
    /// against the order.
    pub fn select(estimate: &ArrivalEstimate, inquiry_count: u32) -> Self {
        if !estimate.is_delayed {
            Self::NotDelayed
        } else if inquiry_count <= 1 {
            Self::DelayedFirstInquiry
        } else if inquiry_count <= 3 {
            Self::DelayedRepeatInquiry
        } else {
            Self::Escalate
        }
    }
}

fn base_duration(order: &TransferOrder, config: &TimelineConfig) -> std::time::Duration {
    match order.transfer_mode {
        TransferMode::BankTransfer => match Region::classify(&order.country) {
            Region::Gulf => config.bank_gulf,
            Region::SouthAsia => config.bank_south_asia,
            Region::Western => config.bank_western,
            Region::Other => config.bank_other,
        },
        TransferMode::CashPickup => config.cash_pickup,
        TransferMode::MobileWallet => config.mobile_wallet,
        TransferMode::Upi => config.upi,
    }
}

fn to_chrono(duration: std::time::Duration) -> Duration {
    Duration::seconds(duration.as_secs() as i64)
}

/// Settlement does not run on weekends: a Saturday landing slips two days,
/// a Sunday landing slips one. The pushed date is always a weekday.
fn push_off_weekend(expected: DateTime<Utc>) -> DateTime<Utc> {
    match expected.weekday() {
        Weekday::Sat => expected + Duration::days(2),
        Weekday::Sun => expected + Duration::days(1),
        _ => expected,
    }
}

/// Estimate the arrival of an order as of `now`.
pub fn estimate_arrival(
    order: &TransferOrder,
    now: DateTime<Utc>,
    config: &TimelineConfig,
) -> ArrivalEstimate {
    let expected_at = push_off_weekend(order.created_at + to_chrono(base_duration(order, config)));

    let elapsed_minutes = (now - order.created_at).num_minutes();
    let threshold_minutes = config.delay_threshold.as_secs() as i64 / 60;
    let is_delayed = elapsed_minutes > threshold_minutes;

    ArrivalEstimate {
        expected_at,
        is_delayed,
        delay_minutes: if is_delayed { elapsed_minutes } else { 0 },
    }
}
