//! Order-number and payment-reference generation
//!
//! Order numbers are `TRF-<YYYYMMDDHHMMSS>-<6 uppercase alphanumerics>`:
//! the timestamp prefix keeps listings roughly chronological, the random
//! suffix disambiguates orders created in the same second. Uniqueness, not
//! unpredictability, is the contract; the store rejects the rare collision
//! on insert.

use chrono::{DateTime, Utc};
use rand::Rng;

use openremit_types::OrderNumber;

const ORDER_PREFIX: &str = "TRF";
const SUFFIX_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
const SUFFIX_LEN: usize = 6;
const PAYMENT_REF_LEN: usize = 10;

fn random_suffix(len: usize) -> String {
    let mut rng = rand::thread_rng();
    (0..len)
        .map(|_| SUFFIX_ALPHABET[rng.gen_range(0..SUFFIX_ALPHABET.len())] as char)
        .collect()
}

/// Generate a fresh order number stamped at `now`.
pub fn generate_order_number(now: DateTime<Utc>) -> OrderNumber {
    OrderNumber::new(format!(
        "{ORDER_PREFIX}-{}-{}",
        now.format("%Y%m%d%H%M%S"),
        random_suffix(SUFFIX_LEN)
    ))
}

/// Generate a payment-initiation reference for funding an order.
pub fn generate_payment_reference() -> String {
    format!("PAY-{}", random_suffix(PAYMENT_REF_LEN))
}
