//! Status Disclosure Engine
//!
//! `refresh` is the only path from `true_status` to `displayed_status`.
//! It demands a live verification session belonging to the order's owner,
//! counts the contact as an inquiry whatever branch follows, and reveals
//! the settled outcome only from the completed-but-unconfirmed marker.
//! `apply_settlement` is the inbound notification entry point; it records
//! the true outcome without ever exposing it.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use openremit_store::OrderStore;
use openremit_types::{
    OrderNumber, RemitError, Result, SettlementOutcome, StatusActor, StatusHistoryEntry,
    TransferOrder, TransferStatus, VerificationSession,
};

/// History reason recorded when a refresh reveals the settled outcome.
const REVEAL_REASON: &str = "refreshed on customer inquiry";

/// What an authorized refresh shows the customer.
#[derive(Debug, Clone, Serialize)]
pub struct DisclosureResult {
    pub order_number: OrderNumber,
    pub status: TransferStatus,
    pub send_amount: Decimal,
    /// Set only when the reveal surfaced a failed settlement
    pub failure_reason: Option<String>,
    /// Whether this refresh revealed the settled outcome
    pub revealed: bool,
}

impl DisclosureResult {
    fn still_pending(order: &TransferOrder) -> Self {
        Self {
            order_number: order.order_number.clone(),
            status: order.displayed_status,
            send_amount: order.send_amount,
            failure_reason: None,
            revealed: false,
        }
    }

    fn from_reveal(order: &TransferOrder) -> Self {
        let failure_reason = if order.displayed_status == TransferStatus::Failed {
            order.failure_reason.clone()
        } else {
            None
        };
        Self {
            order_number: order.order_number.clone(),
            status: order.displayed_status,
            send_amount: order.send_amount,
            failure_reason,
            revealed: true,
        }
    }
}

/// Minimal customer-visible projection of an order.
#[derive(Debug, Clone, Serialize)]
pub struct StatusView {
    pub order_number: OrderNumber,
    pub displayed_status: TransferStatus,
    pub send_amount: Decimal,
    pub created_at: DateTime<Utc>,
}

/// Dual-status disclosure engine.
#[derive(Clone)]
pub struct DisclosureEngine {
    orders: Arc<dyn OrderStore>,
}

impl DisclosureEngine {
    /// Create a new disclosure engine
    pub fn new(orders: Arc<dyn OrderStore>) -> Self {
        Self { orders }
    }

    /// Authorized status refresh.
    ///
    /// Counts an inquiry on every session-authorized read of an existing
    /// order, then: still-pending orders disclose nothing beyond the
    /// pending display, marker orders reveal the settled outcome exactly
    /// once, everything else is not refreshable.
    pub async fn refresh(
        &self,
        session: &VerificationSession,
        order_number: &OrderNumber,
    ) -> Result<DisclosureResult> {
        let now = Utc::now();
        let order = self.authorized_inquiry(session, order_number, now).await?;

        match order.displayed_status {
            TransferStatus::Pending => Ok(DisclosureResult::still_pending(&order)),
            // A marker order whose true status never left Pending is only
            // constructible by writing the store directly; err toward
            // non-disclosure.
            TransferStatus::Completed if order.true_status == TransferStatus::Pending => {
                Ok(DisclosureResult::still_pending(&order))
            }
            TransferStatus::Completed => {
                let revealed = self
                    .orders
                    .reveal_true_status(
                        order_number,
                        TransferStatus::Completed,
                        REVEAL_REASON,
                        StatusActor::System,
                        now,
                    )
                    .await?;
                tracing::info!(
                    order_number = %revealed.order_number,
                    status = %revealed.displayed_status,
                    "settlement outcome revealed on refresh"
                );
                Ok(DisclosureResult::from_reveal(&revealed))
            }
            other => Err(RemitError::not_refreshable(
                order_number.as_str(),
                other.as_str(),
            )),
        }
    }

    /// Minimal status projection; counts an inquiry like any other read.
    pub async fn status_view(
        &self,
        session: &VerificationSession,
        order_number: &OrderNumber,
    ) -> Result<StatusView> {
        let order = self
            .authorized_inquiry(session, order_number, Utc::now())
            .await?;
        Ok(StatusView {
            order_number: order.order_number.clone(),
            displayed_status: order.displayed_status,
            send_amount: order.send_amount,
            created_at: order.created_at,
        })
    }

    /// Ingest a settlement notification for an order.
    ///
    /// Success/Failed stay hidden behind the completed marker until a
    /// refresh; Cancelled/AML-hold become the display state immediately.
    /// One-shot per order.
    pub async fn apply_settlement(
        &self,
        order_number: &OrderNumber,
        outcome: SettlementOutcome,
        failure_reason: Option<String>,
    ) -> Result<TransferOrder> {
        let true_status = outcome.status();
        let displayed_status = if outcome.is_forced_display() {
            true_status
        } else {
            TransferStatus::Completed
        };
        let failure_reason = match outcome {
            SettlementOutcome::Failed => failure_reason,
            _ => None,
        };

        let entry = StatusHistoryEntry::new(
            true_status,
            "settlement notification received",
            StatusActor::Settlement,
            Utc::now(),
        );
        let order = self
            .orders
            .apply_settlement(
                order_number,
                true_status,
                displayed_status,
                failure_reason,
                entry,
            )
            .await?;

        tracing::info!(
            order_number = %order.order_number,
            displayed = %order.displayed_status,
            "settlement recorded"
        );
        Ok(order)
    }

    /// Session + ownership gate shared by the customer-facing reads;
    /// counts the inquiry once both pass.
    async fn authorized_inquiry(
        &self,
        session: &VerificationSession,
        order_number: &OrderNumber,
        now: DateTime<Utc>,
    ) -> Result<TransferOrder> {
        if !session.is_active_at(now) {
            return Err(RemitError::VerificationRequired);
        }
        if self
            .orders
            .find_for_user(&session.user_id, order_number)
            .await?
            .is_none()
        {
            return Err(RemitError::order_not_found(order_number.as_str()));
        }
        self.orders.record_inquiry(order_number, now).await
    }
}
