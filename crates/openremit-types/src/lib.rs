//! OpenRemit Types - Canonical domain types for agent-brokered remittance
//!
//! This crate contains all foundational types for OpenRemit with zero
//! dependencies on other openremit crates. It defines the type system for:
//!
//! - Identity newtypes (UserId, OrderNumber, BeneficiaryId)
//! - Currency/country codes and money rounding
//! - Transfer orders with dual customer-facing/true status
//! - Verification sessions and identity records
//! - The shared error taxonomy and the operation result envelope
//!
//! # Architectural Invariants
//!
//! These types support the core OpenRemit disclosure invariants:
//!
//! 1. `true_status` is written only by the settlement-notification path
//! 2. `displayed_status` mirrors `true_status` only through an explicit,
//!    authorized refresh, never automatically
//! 3. At most one active verification session per user at any time
//! 4. Expected business conditions are values, never panics

pub mod beneficiary;
pub mod envelope;
pub mod error;
pub mod ids;
pub mod money;
pub mod order;
pub mod verification;

pub use beneficiary::*;
pub use envelope::*;
pub use error::*;
pub use ids::*;
pub use money::*;
pub use order::*;
pub use verification::*;

/// Version of the OpenRemit types schema
pub const TYPES_VERSION: &str = "0.1.0";
