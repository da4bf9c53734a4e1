//! Transfer order types for OpenRemit
//!
//! A `TransferOrder` is the one record per initiated transfer. It carries a
//! **dual status**: `displayed_status` is what the customer-facing layer may
//! see, `true_status` is the ground-truth settlement outcome. The true
//! outcome is written only by the settlement-notification path and becomes
//! visible only through an explicit, authorized refresh.

use crate::{CountryCode, CurrencyCode, OrderNumber, UserId};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// How the funds reach the beneficiary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransferMode {
    BankTransfer,
    CashPickup,
    MobileWallet,
    Upi,
}

impl TransferMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BankTransfer => "BANK_TRANSFER",
            Self::CashPickup => "CASH_PICKUP",
            Self::MobileWallet => "MOBILE_WALLET",
            Self::Upi => "UPI",
        }
    }
}

impl fmt::Display for TransferMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Transfer status vocabulary shared by both status fields.
///
/// `Completed` is the designated "completed-but-unconfirmed" display
/// marker: the settlement ran, the concrete outcome is available on
/// authorized request. It never appears as a `true_status`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransferStatus {
    Pending,
    Completed,
    Success,
    Failed,
    Cancelled,
    AmlHold,
}

impl TransferStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Completed => "COMPLETED",
            Self::Success => "SUCCESS",
            Self::Failed => "FAILED",
            Self::Cancelled => "CANCELLED",
            Self::AmlHold => "AML_HOLD",
        }
    }

    /// Terminal states are never left again.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::Success | Self::Failed | Self::Cancelled | Self::AmlHold
        )
    }

    /// The completed-but-unconfirmed display marker.
    pub fn is_completed_marker(&self) -> bool {
        matches!(self, Self::Completed)
    }
}

impl fmt::Display for TransferStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Outcome supplied by the external settlement notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SettlementOutcome {
    Success,
    Failed,
    Cancelled,
    AmlHold,
}

impl SettlementOutcome {
    /// The true status this outcome resolves to.
    pub fn status(&self) -> TransferStatus {
        match self {
            Self::Success => TransferStatus::Success,
            Self::Failed => TransferStatus::Failed,
            Self::Cancelled => TransferStatus::Cancelled,
            Self::AmlHold => TransferStatus::AmlHold,
        }
    }

    /// Cancelled/AML-hold outcomes surface immediately as display states;
    /// Success/Failed hide behind the completed marker until refreshed.
    pub fn is_forced_display(&self) -> bool {
        matches!(self, Self::Cancelled | Self::AmlHold)
    }
}

/// Who caused a status-history entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusActor {
    Customer,
    System,
    Settlement,
    Support,
}

/// One audit-trail entry on an order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusHistoryEntry {
    pub status: TransferStatus,
    pub timestamp: DateTime<Utc>,
    pub reason: String,
    pub actor: StatusActor,
}

impl StatusHistoryEntry {
    pub fn new(
        status: TransferStatus,
        reason: impl Into<String>,
        actor: StatusActor,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            status,
            timestamp,
            reason: reason.into(),
            actor,
        }
    }
}

/// One record per initiated transfer. Never deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransferOrder {
    /// Globally unique order number
    pub order_number: OrderNumber,
    /// Customer the order belongs to
    pub user_id: UserId,

    /// Amount the customer sends (home currency)
    pub send_amount: Decimal,
    /// Platform fee charged on top
    pub fee_amount: Decimal,
    /// `send_amount + fee_amount`
    pub total_amount: Decimal,
    /// Applied home→destination exchange rate
    pub exchange_rate: Decimal,
    /// Amount arriving in the destination currency
    pub received_amount: Decimal,

    /// Delivery rail
    pub transfer_mode: TransferMode,
    /// Destination country
    pub country: CountryCode,
    /// Destination currency
    pub currency: CurrencyCode,
    /// Display name/account of the resolved beneficiary
    pub beneficiary_reference: String,
    /// Payment-initiation reference handed to the caller for funding
    pub payment_reference: String,

    /// Customer-visible status
    pub displayed_status: TransferStatus,
    /// Ground-truth settlement outcome
    pub true_status: TransferStatus,
    /// Stored on FAILED settlement, surfaced only by authorized refresh
    pub failure_reason: Option<String>,

    pub created_at: DateTime<Utc>,
    /// Ordered audit trail of every status event
    pub status_history: Vec<StatusHistoryEntry>,

    /// Customer-service metadata
    pub inquiry_count: u32,
    pub last_inquiry_at: Option<DateTime<Utc>>,
    /// 0 = not escalated, 1-3 = escalation severity
    pub escalation_level: u8,
    pub escalation_reason: Option<String>,
    pub conversation_summary: Option<String>,
}

impl TransferOrder {
    pub fn builder(order_number: OrderNumber, user_id: UserId) -> TransferOrderBuilder {
        TransferOrderBuilder::new(order_number, user_id)
    }

    /// Append an audit-trail entry.
    pub fn push_history(&mut self, entry: StatusHistoryEntry) {
        self.status_history.push(entry);
    }

    /// Count one customer inquiry against this order.
    pub fn record_inquiry(&mut self, at: DateTime<Utc>) {
        self.inquiry_count += 1;
        self.last_inquiry_at = Some(at);
    }
}

/// Builder for new transfer orders.
///
/// `build` fills the lifecycle defaults: both statuses `Pending`, a
/// creation audit entry, and zeroed customer-service counters.
#[derive(Debug, Clone)]
pub struct TransferOrderBuilder {
    order_number: OrderNumber,
    user_id: UserId,
    send_amount: Decimal,
    fee_amount: Decimal,
    total_amount: Decimal,
    exchange_rate: Decimal,
    received_amount: Decimal,
    transfer_mode: TransferMode,
    country: CountryCode,
    currency: CurrencyCode,
    beneficiary_reference: String,
    payment_reference: String,
    created_at: Option<DateTime<Utc>>,
}

impl TransferOrderBuilder {
    pub fn new(order_number: OrderNumber, user_id: UserId) -> Self {
        Self {
            order_number,
            user_id,
            send_amount: Decimal::ZERO,
            fee_amount: Decimal::ZERO,
            total_amount: Decimal::ZERO,
            exchange_rate: Decimal::ZERO,
            received_amount: Decimal::ZERO,
            transfer_mode: TransferMode::BankTransfer,
            country: CountryCode::new("AE"),
            currency: CurrencyCode::new("AED"),
            beneficiary_reference: String::new(),
            payment_reference: String::new(),
            created_at: None,
        }
    }

    pub fn amounts(
        mut self,
        send: Decimal,
        fee: Decimal,
        total: Decimal,
        rate: Decimal,
        received: Decimal,
    ) -> Self {
        self.send_amount = send;
        self.fee_amount = fee;
        self.total_amount = total;
        self.exchange_rate = rate;
        self.received_amount = received;
        self
    }

    pub fn routing(
        mut self,
        mode: TransferMode,
        country: CountryCode,
        currency: CurrencyCode,
    ) -> Self {
        self.transfer_mode = mode;
        self.country = country;
        self.currency = currency;
        self
    }

    pub fn beneficiary_reference(mut self, reference: impl Into<String>) -> Self {
        self.beneficiary_reference = reference.into();
        self
    }

    pub fn payment_reference(mut self, reference: impl Into<String>) -> Self {
        self.payment_reference = reference.into();
        self
    }

    pub fn created_at(mut self, at: DateTime<Utc>) -> Self {
        self.created_at = Some(at);
        self
    }

    pub fn build(self) -> TransferOrder {
        let created_at = self.created_at.unwrap_or_else(Utc::now);
        TransferOrder {
            order_number: self.order_number,
            user_id: self.user_id,
            send_amount: self.send_amount,
            fee_amount: self.fee_amount,
            total_amount: self.total_amount,
            exchange_rate: self.exchange_rate,
            received_amount: self.received_amount,
            transfer_mode: self.transfer_mode,
            country: self.country,
            currency: self.currency,
            beneficiary_reference: self.beneficiary_reference,
            payment_reference: self.payment_reference,
            displayed_status: TransferStatus::Pending,
            true_status: TransferStatus::Pending,
            failure_reason: None,
            created_at,
            status_history: vec![StatusHistoryEntry::new(
                TransferStatus::Pending,
                "transfer order created",
                StatusActor::Customer,
                created_at,
            )],
            inquiry_count: 0,
            last_inquiry_at: None,
            escalation_level: 0,
            escalation_reason: None,
            conversation_summary: None,
        }
    }
}
