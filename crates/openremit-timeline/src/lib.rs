//! Delay & Timeframe Estimator for OpenRemit
//!
//! Pure, synchronous arrival estimation: base duration by delivery rail
//! (bank transfers banded by destination region), a weekend push for
//! settlement-closed days, and a fixed elapsed-time threshold that
//! classifies a pending order as delayed. Nothing here touches storage or
//! the clock; callers pass `now` in.

pub mod config;
pub mod estimator;
pub mod region;

pub use config::TimelineConfig;
pub use estimator::{estimate_arrival, ArrivalEstimate, InquiryDisposition};
pub use region::Region;
