//! Transfer-order persistence.
//!
//! Orders are never deleted. Every mutating operation is an atomic
//! read-modify-write against a single record; the in-memory store holds
//! the record's `DashMap` entry guard for the whole mutation.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;

use openremit_types::{
    OrderNumber, RemitError, Result, StatusActor, StatusHistoryEntry, TransferOrder,
    TransferStatus, UserId,
};

/// Persistence seam for transfer orders.
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Insert a new order; the order number must be unused.
    async fn insert(&self, order: TransferOrder) -> Result<()>;

    /// Fetch an order by number.
    async fn find(&self, order_number: &OrderNumber) -> Result<Option<TransferOrder>>;

    /// Fetch an order by number, scoped to its owner.
    async fn find_for_user(
        &self,
        user_id: &UserId,
        order_number: &OrderNumber,
    ) -> Result<Option<TransferOrder>>;

    /// Count one customer inquiry against the order; returns the updated
    /// record.
    async fn record_inquiry(
        &self,
        order_number: &OrderNumber,
        at: DateTime<Utc>,
    ) -> Result<TransferOrder>;

    /// Apply a settlement notification: set the true status (and failure
    /// reason), move the displayed status as instructed, append the audit
    /// entry. Settlement is one-shot: rejected once the true status has
    /// left `Pending`.
    async fn apply_settlement(
        &self,
        order_number: &OrderNumber,
        true_status: TransferStatus,
        displayed_status: TransferStatus,
        failure_reason: Option<String>,
        entry: StatusHistoryEntry,
    ) -> Result<TransferOrder>;

    /// Copy the true status into the displayed status and append the
    /// reveal audit entry. Guarded: performed only while the displayed
    /// status still equals `expected_displayed`.
    async fn reveal_true_status(
        &self,
        order_number: &OrderNumber,
        expected_displayed: TransferStatus,
        reason: &str,
        actor: StatusActor,
        at: DateTime<Utc>,
    ) -> Result<TransferOrder>;

    /// Set the escalation fields and append the audit entry.
    async fn record_escalation(
        &self,
        order_number: &OrderNumber,
        level: u8,
        reason: &str,
        summary: &str,
        at: DateTime<Utc>,
    ) -> Result<TransferOrder>;
}

/// In-memory order store keyed by order number.
#[derive(Debug, Clone, Default)]
pub struct InMemoryOrderStore {
    orders: Arc<DashMap<OrderNumber, TransferOrder>>,
}

impl InMemoryOrderStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }
}

#[async_trait]
impl OrderStore for InMemoryOrderStore {
    async fn insert(&self, order: TransferOrder) -> Result<()> {
        match self.orders.entry(order.order_number.clone()) {
            dashmap::mapref::entry::Entry::Occupied(_) => Err(RemitError::storage(format!(
                "order number {} already exists",
                order.order_number
            ))),
            dashmap::mapref::entry::Entry::Vacant(slot) => {
                slot.insert(order);
                Ok(())
            }
        }
    }

    async fn find(&self, order_number: &OrderNumber) -> Result<Option<TransferOrder>> {
        Ok(self.orders.get(order_number).map(|r| r.value().clone()))
    }

    async fn find_for_user(
        &self,
        user_id: &UserId,
        order_number: &OrderNumber,
    ) -> Result<Option<TransferOrder>> {
        Ok(self.orders.get(order_number).and_then(|r| {
            if &r.value().user_id == user_id {
                Some(r.value().clone())
            } else {
                None
            }
        }))
    }

    async fn record_inquiry(
        &self,
        order_number: &OrderNumber,
        at: DateTime<Utc>,
    ) -> Result<TransferOrder> {
        let mut record = self
            .orders
            .get_mut(order_number)
            .ok_or_else(|| RemitError::order_not_found(order_number.as_str()))?;
        record.value_mut().record_inquiry(at);
        Ok(record.value().clone())
    }

    async fn apply_settlement(
        &self,
        order_number: &OrderNumber,
        true_status: TransferStatus,
        displayed_status: TransferStatus,
        failure_reason: Option<String>,
        entry: StatusHistoryEntry,
    ) -> Result<TransferOrder> {
        let mut record = self
            .orders
            .get_mut(order_number)
            .ok_or_else(|| RemitError::order_not_found(order_number.as_str()))?;
        let order = record.value_mut();

        // One-shot: the true outcome never changes once recorded.
        if order.true_status != TransferStatus::Pending {
            return Err(RemitError::not_refreshable(
                order_number.as_str(),
                order.true_status.as_str(),
            ));
        }

        order.true_status = true_status;
        order.displayed_status = displayed_status;
        if failure_reason.is_some() {
            order.failure_reason = failure_reason;
        }
        order.push_history(entry);
        Ok(order.clone())
    }

    async fn reveal_true_status(
        &self,
        order_number: &OrderNumber,
        expected_displayed: TransferStatus,
        reason: &str,
        actor: StatusActor,
        at: DateTime<Utc>,
    ) -> Result<TransferOrder> {
        let mut record = self
            .orders
            .get_mut(order_number)
            .ok_or_else(|| RemitError::order_not_found(order_number.as_str()))?;
        let order = record.value_mut();

        if order.displayed_status != expected_displayed {
            return Err(RemitError::not_refreshable(
                order_number.as_str(),
                order.displayed_status.as_str(),
            ));
        }

        order.displayed_status = order.true_status;
        let entry = StatusHistoryEntry::new(order.true_status, reason, actor, at);
        order.push_history(entry);
        Ok(order.clone())
    }

    async fn record_escalation(
        &self,
        order_number: &OrderNumber,
        level: u8,
        reason: &str,
        summary: &str,
        at: DateTime<Utc>,
    ) -> Result<TransferOrder> {
        let mut record = self
            .orders
            .get_mut(order_number)
            .ok_or_else(|| RemitError::order_not_found(order_number.as_str()))?;
        let order = record.value_mut();

        order.escalation_level = level;
        order.escalation_reason = Some(reason.to_string());
        order.conversation_summary = Some(summary.to_string());
        let entry = StatusHistoryEntry::new(
            order.displayed_status,
            format!("escalated to level {level}: {reason}"),
            StatusActor::Support,
            at,
        );
        order.push_history(entry);
        Ok(order.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use openremit_types::{CountryCode, CurrencyCode, TransferMode};
    use rust_decimal_macros::dec;

    fn order(number: &str, user: &str) -> TransferOrder {
        TransferOrder::builder(OrderNumber::new(number), UserId::new(user))
            .amounts(dec!(1000), dec!(10), dec!(1010), dec!(3.67), dec!(3670))
            .routing(
                TransferMode::BankTransfer,
                CountryCode::new("AE"),
                CurrencyCode::new("AED"),
            )
            .build()
    }

    #[tokio::test]
    async fn test_insert_and_find() {
        let store = InMemoryOrderStore::new();
        store.insert(order("TRF-1", "user-1")).await.unwrap();

        let found = store.find(&OrderNumber::new("TRF-1")).await.unwrap();
        assert!(found.is_some());
        assert!(store
            .find(&OrderNumber::new("TRF-2"))
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_duplicate_order_number_rejected() {
        let store = InMemoryOrderStore::new();
        store.insert(order("TRF-1", "user-1")).await.unwrap();
        let err = store.insert(order("TRF-1", "user-2")).await.unwrap_err();
        assert_eq!(err.error_code(), "SYSTEM_ERROR");
    }

    #[tokio::test]
    async fn test_find_for_user_scopes_by_owner() {
        let store = InMemoryOrderStore::new();
        store.insert(order("TRF-1", "user-1")).await.unwrap();

        let n = OrderNumber::new("TRF-1");
        assert!(store
            .find_for_user(&UserId::new("user-1"), &n)
            .await
            .unwrap()
            .is_some());
        assert!(store
            .find_for_user(&UserId::new("user-2"), &n)
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_concurrent_inquiries_never_lose_updates() {
        let store = InMemoryOrderStore::new();
        store.insert(order("TRF-1", "user-1")).await.unwrap();

        let mut handles = Vec::new();
        for _ in 0..50 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                store
                    .record_inquiry(&OrderNumber::new("TRF-1"), Utc::now())
                    .await
                    .unwrap();
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        let updated = store
            .find(&OrderNumber::new("TRF-1"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.inquiry_count, 50);
    }

    #[tokio::test]
    async fn test_settlement_is_one_shot() {
        let store = InMemoryOrderStore::new();
        store.insert(order("TRF-1", "user-1")).await.unwrap();
        let n = OrderNumber::new("TRF-1");
        let now = Utc::now();

        let entry = StatusHistoryEntry::new(
            TransferStatus::Success,
            "settlement notification received",
            StatusActor::Settlement,
            now,
        );
        let updated = store
            .apply_settlement(
                &n,
                TransferStatus::Success,
                TransferStatus::Completed,
                None,
                entry.clone(),
            )
            .await
            .unwrap();
        assert_eq!(updated.true_status, TransferStatus::Success);
        assert_eq!(updated.displayed_status, TransferStatus::Completed);

        let err = store
            .apply_settlement(
                &n,
                TransferStatus::Failed,
                TransferStatus::Completed,
                None,
                entry,
            )
            .await
            .unwrap_err();
        assert_eq!(err.error_code(), "NOT_REFRESHABLE");
    }

    #[tokio::test]
    async fn test_reveal_guard_and_copy() {
        let store = InMemoryOrderStore::new();
        store.insert(order("TRF-1", "user-1")).await.unwrap();
        let n = OrderNumber::new("TRF-1");
        let now = Utc::now();

        // Still pending: the guard refuses.
        let err = store
            .reveal_true_status(
                &n,
                TransferStatus::Completed,
                "refreshed on customer inquiry",
                StatusActor::System,
                now,
            )
            .await
            .unwrap_err();
        assert_eq!(err.error_code(), "NOT_REFRESHABLE");

        store
            .apply_settlement(
                &n,
                TransferStatus::Failed,
                TransferStatus::Completed,
                Some("beneficiary account closed".to_string()),
                StatusHistoryEntry::new(
                    TransferStatus::Failed,
                    "settlement notification received",
                    StatusActor::Settlement,
                    now,
                ),
            )
            .await
            .unwrap();

        let revealed = store
            .reveal_true_status(
                &n,
                TransferStatus::Completed,
                "refreshed on customer inquiry",
                StatusActor::System,
                now,
            )
            .await
            .unwrap();
        assert_eq!(revealed.displayed_status, TransferStatus::Failed);
        let last = revealed.status_history.last().unwrap();
        assert_eq!(last.actor, StatusActor::System);
        assert_eq!(last.reason, "refreshed on customer inquiry");
    }

    #[tokio::test]
    async fn test_record_escalation_sets_fields() {
        let store = InMemoryOrderStore::new();
        store.insert(order("TRF-1", "user-1")).await.unwrap();

        let updated = store
            .record_escalation(
                &OrderNumber::new("TRF-1"),
                2,
                "transfer delayed",
                "customer called twice about a delayed transfer",
                Utc::now(),
            )
            .await
            .unwrap();
        assert_eq!(updated.escalation_level, 2);
        assert_eq!(updated.escalation_reason.as_deref(), Some("transfer delayed"));
        assert!(updated.conversation_summary.is_some());
        assert_eq!(updated.status_history.last().unwrap().actor, StatusActor::Support);
    }
}
