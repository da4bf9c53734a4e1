//! Exchange-rate lookups.
//!
//! Rates are treated as a snapshot table: lookups return `Ok(None)` when a
//! pair is missing, and the execution engine turns that into a
//! rate-unavailable rejection. The table is read-mostly, so a
//! `parking_lot::RwLock` over a plain map is enough.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::RwLock;
use rust_decimal::Decimal;

use openremit_types::{CurrencyCode, Result};

/// Lookup seam for source→destination exchange rates.
#[async_trait]
pub trait RateSource: Send + Sync {
    /// The current rate for the pair, or `None` when it is not quoted.
    async fn rate(&self, from: &CurrencyCode, to: &CurrencyCode) -> Result<Option<Decimal>>;
}

/// In-memory rate table keyed by currency pair.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRateSource {
    rates: Arc<RwLock<HashMap<(CurrencyCode, CurrencyCode), Decimal>>>,
}

impl InMemoryRateSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_rate(&self, from: CurrencyCode, to: CurrencyCode, rate: Decimal) {
        self.rates.write().insert((from, to), rate);
    }

    pub fn remove_rate(&self, from: &CurrencyCode, to: &CurrencyCode) {
        self.rates.write().remove(&(from.clone(), to.clone()));
    }
}

#[async_trait]
impl RateSource for InMemoryRateSource {
    async fn rate(&self, from: &CurrencyCode, to: &CurrencyCode) -> Result<Option<Decimal>> {
        Ok(self
            .rates
            .read()
            .get(&(from.clone(), to.clone()))
            .copied())
    }
}
