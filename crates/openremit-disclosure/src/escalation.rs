//! Customer-inquiry escalation tracking.
//!
//! Escalations ride on the order record itself: the stored level only
//! ever climbs, and each escalation leaves a Support entry in the status
//! history. SLA wording depends on the effective level.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;

use openremit_store::OrderStore;
use openremit_types::{OrderNumber, RemitError, Result, TransferOrder, UserId};

/// Escalation severity, 1 (lowest) to 3 (highest).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum EscalationLevel {
    L1 = 1,
    L2 = 2,
    L3 = 3,
}

impl EscalationLevel {
    pub fn from_u8(level: u8) -> Result<Self> {
        match level {
            1 => Ok(Self::L1),
            2 => Ok(Self::L2),
            3 => Ok(Self::L3),
            other => Err(RemitError::invalid_input(format!(
                "escalation level must be 1-3, got {other}"
            ))),
        }
    }

    pub fn as_u8(&self) -> u8 {
        *self as u8
    }

    /// Response-time commitment quoted back to the customer.
    pub fn sla(&self) -> &'static str {
        match self {
            Self::L3 => "within 1 hour",
            _ => "within 2-4 hours",
        }
    }
}

/// Acknowledgement returned to the caller after an escalation is filed.
#[derive(Debug, Clone, Serialize)]
pub struct EscalationTicket {
    pub order_number: OrderNumber,
    pub level: u8,
    pub reason: String,
    pub sla: String,
    pub escalated_at: DateTime<Utc>,
}

/// Files escalations and counts customer inquiries against orders.
#[derive(Clone)]
pub struct EscalationTracker {
    orders: Arc<dyn OrderStore>,
}

impl EscalationTracker {
    pub fn new(orders: Arc<dyn OrderStore>) -> Self {
        Self { orders }
    }

    /// Escalate an order on the customer's behalf.
    ///
    /// The stored level never goes down: asking for a lower level than
    /// the order already carries re-files at the current level.
    pub async fn escalate(
        &self,
        user_id: &UserId,
        order_number: &OrderNumber,
        level: EscalationLevel,
        reason: &str,
        summary: &str,
    ) -> Result<EscalationTicket> {
        let now = Utc::now();
        let current = self
            .orders
            .find_for_user(user_id, order_number)
            .await?
            .ok_or_else(|| RemitError::order_not_found(order_number.as_str()))?;

        let effective = if current.escalation_level > level.as_u8() {
            EscalationLevel::from_u8(current.escalation_level)?
        } else {
            level
        };

        let order = self
            .orders
            .record_escalation(order_number, effective.as_u8(), reason, summary, now)
            .await?;

        tracing::warn!(
            order_number = %order.order_number,
            level = effective.as_u8(),
            reason = %reason,
            "order escalated"
        );

        Ok(EscalationTicket {
            order_number: order.order_number.clone(),
            level: effective.as_u8(),
            reason: reason.to_string(),
            sla: effective.sla().to_string(),
            escalated_at: now,
        })
    }

    /// Count a customer inquiry against an order the caller owns.
    pub async fn record_inquiry(
        &self,
        user_id: &UserId,
        order_number: &OrderNumber,
    ) -> Result<TransferOrder> {
        if self
            .orders
            .find_for_user(user_id, order_number)
            .await?
            .is_none()
        {
            return Err(RemitError::order_not_found(order_number.as_str()));
        }
        self.orders.record_inquiry(order_number, Utc::now()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use openremit_store::InMemoryOrderStore;
    use openremit_types::{
        CountryCode, CurrencyCode, StatusActor, TransferMode, TransferOrder, TransferStatus,
    };
    use rust_decimal_macros::dec;

    fn tracker() -> (EscalationTracker, InMemoryOrderStore) {
        let store = InMemoryOrderStore::new();
        (EscalationTracker::new(Arc::new(store.clone())), store)
    }

    async fn seed_order(store: &InMemoryOrderStore, number: &str, user: &str) -> OrderNumber {
        let order_number = OrderNumber::new(number);
        let order = TransferOrder::builder(order_number.clone(), UserId::new(user))
            .amounts(dec!(500), dec!(5), dec!(505), dec!(3.67), dec!(1835))
            .routing(
                TransferMode::CashPickup,
                CountryCode::new("AE"),
                CurrencyCode::new("AED"),
            )
            .beneficiary_reference("Ayesha Khan")
            .payment_reference("PAY-TEST")
            .build();
        store.insert(order).await.unwrap();
        order_number
    }

    #[test]
    fn test_level_parsing() {
        assert_eq!(EscalationLevel::from_u8(1).unwrap(), EscalationLevel::L1);
        assert_eq!(EscalationLevel::from_u8(3).unwrap(), EscalationLevel::L3);
        assert_eq!(
            EscalationLevel::from_u8(0).unwrap_err().error_code(),
            "INVALID_INPUT"
        );
        assert_eq!(
            EscalationLevel::from_u8(4).unwrap_err().error_code(),
            "INVALID_INPUT"
        );
    }

    #[test]
    fn test_sla_wording() {
        assert_eq!(EscalationLevel::L1.sla(), "within 2-4 hours");
        assert_eq!(EscalationLevel::L2.sla(), "within 2-4 hours");
        assert_eq!(EscalationLevel::L3.sla(), "within 1 hour");
    }

    #[tokio::test]
    async fn test_escalate_records_on_order() {
        let (tracker, store) = tracker();
        let number = seed_order(&store, "TRF-1", "user-1").await;

        let ticket = tracker
            .escalate(
                &UserId::new("user-1"),
                &number,
                EscalationLevel::L2,
                "transfer delayed beyond estimate",
                "customer called twice about a delayed pickup",
            )
            .await
            .unwrap();

        assert_eq!(ticket.level, 2);
        assert_eq!(ticket.sla, "within 2-4 hours");

        let stored = store.find(&number).await.unwrap().unwrap();
        assert_eq!(stored.escalation_level, 2);
        assert_eq!(
            stored.escalation_reason.as_deref(),
            Some("transfer delayed beyond estimate")
        );
        assert!(stored.conversation_summary.is_some());
        let last = stored.status_history.last().unwrap();
        assert_eq!(last.actor, StatusActor::Support);
        assert_eq!(
            last.reason,
            "escalated to level 2: transfer delayed beyond estimate"
        );
        assert_eq!(last.status, TransferStatus::Pending);
    }

    #[tokio::test]
    async fn test_level_never_goes_down() {
        let (tracker, store) = tracker();
        let number = seed_order(&store, "TRF-1", "user-1").await;
        let user = UserId::new("user-1");

        tracker
            .escalate(&user, &number, EscalationLevel::L3, "urgent", "s1")
            .await
            .unwrap();
        let ticket = tracker
            .escalate(&user, &number, EscalationLevel::L1, "follow-up", "s2")
            .await
            .unwrap();

        assert_eq!(ticket.level, 3);
        assert_eq!(ticket.sla, "within 1 hour");
        let stored = store.find(&number).await.unwrap().unwrap();
        assert_eq!(stored.escalation_level, 3);
        assert_eq!(stored.escalation_reason.as_deref(), Some("follow-up"));
    }

    #[tokio::test]
    async fn test_escalate_foreign_order_not_found() {
        let (tracker, store) = tracker();
        let number = seed_order(&store, "TRF-1", "user-1").await;

        let err = tracker
            .escalate(
                &UserId::new("user-2"),
                &number,
                EscalationLevel::L1,
                "reason",
                "summary",
            )
            .await
            .unwrap_err();
        assert_eq!(err.error_code(), "ORDER_NOT_FOUND");

        let stored = store.find(&number).await.unwrap().unwrap();
        assert_eq!(stored.escalation_level, 0);
    }

    #[tokio::test]
    async fn test_record_inquiry_scoped_to_owner() {
        let (tracker, store) = tracker();
        let number = seed_order(&store, "TRF-1", "user-1").await;

        let updated = tracker
            .record_inquiry(&UserId::new("user-1"), &number)
            .await
            .unwrap();
        assert_eq!(updated.inquiry_count, 1);

        let err = tracker
            .record_inquiry(&UserId::new("user-2"), &number)
            .await
            .unwrap_err();
        assert_eq!(err.error_code(), "ORDER_NOT_FOUND");

        let stored = store.find(&number).await.unwrap().unwrap();
        assert_eq!(stored.inquiry_count, 1);
    }
}
