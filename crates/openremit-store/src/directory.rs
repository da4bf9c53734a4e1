//! Identity and beneficiary directories.
//!
//! Reference data written rarely and read on every verification or
//! transfer, so both directories sit behind `parking_lot::RwLock`ed
//! vectors that preserve registration order.

use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::RwLock;

use openremit_types::{Beneficiary, IdentityRecord, Result, UserId};

/// Lookup seam for identity documents on file.
#[async_trait]
pub trait IdentityDirectory: Send + Sync {
    /// All of the user's documents whose number ends in `-<last_four>`,
    /// in registration order.
    async fn find_by_suffix(&self, user_id: &UserId, last_four: &str)
        -> Result<Vec<IdentityRecord>>;
}

/// Lookup seam for registered payout destinations.
#[async_trait]
pub trait BeneficiaryDirectory: Send + Sync {
    /// The user's active beneficiaries, in registration order.
    async fn list_active(&self, user_id: &UserId) -> Result<Vec<Beneficiary>>;
}

/// In-memory directory backing both lookup seams.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDirectory {
    identities: Arc<RwLock<Vec<IdentityRecord>>>,
    beneficiaries: Arc<RwLock<Vec<Beneficiary>>>,
}

impl InMemoryDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_identity(&self, record: IdentityRecord) {
        self.identities.write().push(record);
    }

    pub fn add_beneficiary(&self, beneficiary: Beneficiary) {
        self.beneficiaries.write().push(beneficiary);
    }
}

#[async_trait]
impl IdentityDirectory for InMemoryDirectory {
    async fn find_by_suffix(
        &self,
        user_id: &UserId,
        last_four: &str,
    ) -> Result<Vec<IdentityRecord>> {
        Ok(self
            .identities
            .read()
            .iter()
            .filter(|r| r.user_id == *user_id && r.suffix_matches(last_four))
            .cloned()
            .collect())
    }
}

#[async_trait]
impl BeneficiaryDirectory for InMemoryDirectory {
    async fn list_active(&self, user_id: &UserId) -> Result<Vec<Beneficiary>> {
        Ok(self
            .beneficiaries
            .read()
            .iter()
            .filter(|b| b.user_id == *user_id && b.is_active)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use openremit_types::{
        BeneficiaryId, CountryCode, CurrencyCode, DocumentKind, TransferMode,
    };

    fn identity(user: &str, number: &str) -> IdentityRecord {
        IdentityRecord::new(
            UserId::new(user),
            DocumentKind::NationalId,
            "Ayesha Khan",
            number,
            NaiveDate::from_ymd_opt(2030, 6, 15).unwrap(),
        )
    }

    fn beneficiary(user: &str, id: i64, name: &str, active: bool) -> Beneficiary {
        Beneficiary {
            id: BeneficiaryId::new(id),
            user_id: UserId::new(user),
            display_name: name.to_string(),
            country: CountryCode::new("IN"),
            currency: CurrencyCode::new("INR"),
            transfer_mode: TransferMode::BankTransfer,
            account_reference: format!("acct-{id}"),
            is_active: active,
        }
    }

    #[tokio::test]
    async fn test_find_by_suffix_scopes_to_user() {
        let dir = InMemoryDirectory::new();
        dir.add_identity(identity("user-1", "784-1990-55667-4321"));
        dir.add_identity(identity("user-2", "784-1985-11223-4321"));

        let found = dir
            .find_by_suffix(&UserId::new("user-1"), "4321")
            .await
            .unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].user_id, UserId::new("user-1"));
    }

    #[tokio::test]
    async fn test_find_by_suffix_returns_all_matches_in_order() {
        let dir = InMemoryDirectory::new();
        dir.add_identity(identity("user-1", "784-1990-55667-4321"));
        dir.add_identity(identity("user-1", "P-99887-4321"));
        dir.add_identity(identity("user-1", "784-1990-55667-9999"));

        let found = dir
            .find_by_suffix(&UserId::new("user-1"), "4321")
            .await
            .unwrap();
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].id_number, "784-1990-55667-4321");
        assert_eq!(found[1].id_number, "P-99887-4321");
    }

    #[tokio::test]
    async fn test_list_active_excludes_inactive_and_other_users() {
        let dir = InMemoryDirectory::new();
        dir.add_beneficiary(beneficiary("user-1", 1, "Rahul Sharma", true));
        dir.add_beneficiary(beneficiary("user-1", 2, "Priya Patel", false));
        dir.add_beneficiary(beneficiary("user-2", 3, "Omar Farouk", true));

        let listed = dir.list_active(&UserId::new("user-1")).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].display_name, "Rahul Sharma");
    }
}
