//! Transfer Execution Engine
//!
//! `handle` is the single logical send-money operation. The presence of
//! execution parameters selects the branch: a beneficiary selector plus a
//! positive amount executes, anything less is discovery. Discovery is a
//! pure read; execution persists exactly one new order and returns the
//! funding receipt.

use std::sync::Arc;

use chrono::Utc;
use rust_decimal::Decimal;

use openremit_store::{BeneficiaryDirectory, OrderStore, RateSource};
use openremit_types::{
    round_money, Beneficiary, CurrencyCode, RemitError, Result, TransferOrder, UserId,
};

use crate::config::TransferConfig;
use crate::fees::transfer_fee;
use crate::order_number::{generate_order_number, generate_payment_reference};

/// What the caller asked for, as extracted by the conversational layer.
#[derive(Debug, Clone, Default)]
pub struct TransferIntent {
    /// Beneficiary selector: numeric id or (partial) display name
    pub beneficiary: Option<String>,
    /// Send amount in the home currency
    pub amount: Option<Decimal>,
}

/// Reference exchange-rate quote shown during discovery.
#[derive(Debug, Clone, PartialEq)]
pub struct RateQuote {
    pub from: CurrencyCode,
    pub to: CurrencyCode,
    pub rate: Decimal,
}

/// Discovery payload: everything the caller needs to pick a transfer.
#[derive(Debug, Clone)]
pub struct TransferOptions {
    pub beneficiaries: Vec<Beneficiary>,
    pub suggested_amounts: Vec<Decimal>,
    /// Representative quote for the reference pair; absent when no rate
    /// is loaded (discovery never fails on a missing reference rate)
    pub reference_quote: Option<RateQuote>,
}

/// Execution payload: the persisted order plus its funding link.
#[derive(Debug, Clone)]
pub struct TransferReceipt {
    pub order: TransferOrder,
    pub payment_link: String,
}

/// Result of one `handle` call.
#[derive(Debug, Clone)]
pub enum TransferOutcome {
    /// Discovery branch, nothing was created
    Options(TransferOptions),
    /// Execution branch, a new order exists
    Receipt(TransferReceipt),
}

/// Transfer discovery/execution engine.
#[derive(Clone)]
pub struct TransferEngine {
    beneficiaries: Arc<dyn BeneficiaryDirectory>,
    rates: Arc<dyn RateSource>,
    orders: Arc<dyn OrderStore>,
    config: TransferConfig,
}

impl TransferEngine {
    /// Create a new transfer engine
    pub fn new(
        beneficiaries: Arc<dyn BeneficiaryDirectory>,
        rates: Arc<dyn RateSource>,
        orders: Arc<dyn OrderStore>,
        config: TransferConfig,
    ) -> Self {
        Self {
            beneficiaries,
            rates,
            orders,
            config,
        }
    }

    /// Handle one transfer intent for a verified caller.
    ///
    /// Resubmitting the same execution parameters creates a second,
    /// distinct order; there is no idempotency key.
    pub async fn handle(&self, user_id: &UserId, intent: TransferIntent) -> Result<TransferOutcome> {
        let selector = intent
            .beneficiary
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty());

        match (selector, intent.amount) {
            (Some(selector), Some(amount)) if amount > Decimal::ZERO => self
                .execute(user_id, selector, amount)
                .await
                .map(TransferOutcome::Receipt),
            (Some(_), Some(_)) => Err(RemitError::invalid_input(
                "send amount must be greater than zero",
            )),
            _ => self.discover(user_id).await.map(TransferOutcome::Options),
        }
    }

    async fn discover(&self, user_id: &UserId) -> Result<TransferOptions> {
        let beneficiaries = self.beneficiaries.list_active(user_id).await?;
        let reference_quote = self
            .rates
            .rate(&self.config.home_currency, &self.config.reference_currency)
            .await?
            .map(|rate| RateQuote {
                from: self.config.home_currency.clone(),
                to: self.config.reference_currency.clone(),
                rate,
            });

        tracing::debug!(
            user_id = %user_id,
            beneficiaries = beneficiaries.len(),
            "transfer discovery"
        );

        Ok(TransferOptions {
            beneficiaries,
            suggested_amounts: self.config.suggested_amounts.clone(),
            reference_quote,
        })
    }

    async fn execute(
        &self,
        user_id: &UserId,
        selector: &str,
        amount: Decimal,
    ) -> Result<TransferReceipt> {
        let beneficiaries = self.beneficiaries.list_active(user_id).await?;
        let beneficiary = beneficiaries
            .iter()
            .find(|b| b.matches(selector))
            .ok_or_else(|| RemitError::beneficiary_not_found(selector))?;

        if amount > self.config.send_limit {
            return Err(RemitError::AmountExceedsLimit {
                amount,
                limit: self.config.send_limit,
            });
        }

        let rate = self
            .rates
            .rate(&self.config.home_currency, &beneficiary.currency)
            .await?
            .ok_or_else(|| RemitError::RateUnavailable {
                from: self.config.home_currency.to_string(),
                to: beneficiary.currency.to_string(),
            })?;

        let fee = transfer_fee(amount, &self.config.fees);
        let total = round_money(amount + fee);
        let received = round_money(amount * rate);

        let now = Utc::now();
        let payment_reference = generate_payment_reference();
        let order = TransferOrder::builder(generate_order_number(now), user_id.clone())
            .amounts(amount, fee, total, rate, received)
            .routing(
                beneficiary.transfer_mode,
                beneficiary.country.clone(),
                beneficiary.currency.clone(),
            )
            .beneficiary_reference(beneficiary.display_name.clone())
            .payment_reference(payment_reference.clone())
            .created_at(now)
            .build();

        self.orders.insert(order.clone()).await?;

        tracing::info!(
            order_number = %order.order_number,
            user_id = %user_id,
            send_amount = %amount,
            fee_amount = %fee,
            mode = %order.transfer_mode,
            "transfer order created"
        );

        let payment_link = format!("{}/{}", self.config.payment_base_url, payment_reference);
        Ok(TransferReceipt {
            order,
            payment_link,
        })
    }
}
