//! Transfer Execution Engine for OpenRemit
//!
//! One logical send-money operation with two outcomes: **discovery** (the
//! caller has not supplied execution parameters yet; return beneficiaries,
//! suggested amounts, and a reference quote) and **execution** (resolve the
//! beneficiary, apply the fee schedule and exchange rate, persist a new
//! order). No order is ever created on the discovery path.

pub mod config;
pub mod engine;
pub mod fees;
pub mod order_number;

pub use config::{FeeSchedule, TransferConfig};
pub use engine::{
    RateQuote, TransferEngine, TransferIntent, TransferOptions, TransferOutcome, TransferReceipt,
};
pub use fees::transfer_fee;
pub use order_number::{generate_order_number, generate_payment_reference};
