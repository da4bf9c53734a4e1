//! Identity verification for OpenRemit
//!
//! Challenges a customer on the last four digits and expiry date of an
//! identity document on file, and on success opens a short-lived
//! [`openremit_types::VerificationSession`]. Everything downstream that
//! discloses order detail demands an active session from here.

pub mod config;
pub mod service;

pub use config::VerifyConfig;
pub use service::VerificationService;
