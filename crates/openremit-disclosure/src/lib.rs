//! Status Disclosure Engine for OpenRemit
//!
//! Owns the dual-status policy end to end: settlement notifications write
//! the true outcome and move the customer-facing status to the
//! completed-but-unconfirmed marker (or a forced terminal display state),
//! and only an explicit refresh under an active verification session ever
//! copies the true outcome into view. The inquiry/escalation tracker in
//! the same crate counts every customer read and records escalations.

pub mod engine;
pub mod escalation;

pub use engine::{DisclosureEngine, DisclosureResult, StatusView};
pub use escalation::{EscalationLevel, EscalationTicket, EscalationTracker};
