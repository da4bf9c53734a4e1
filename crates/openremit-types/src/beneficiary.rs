//! Registered beneficiaries.
//!
//! Beneficiary resolution during transfer execution is deliberately
//! conversational: exact numeric id or case-insensitive name substring,
//! scoped to the caller's active beneficiaries.

use crate::{BeneficiaryId, CountryCode, CurrencyCode, TransferMode, UserId};
use serde::{Deserialize, Serialize};

/// A payout destination registered by a customer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Beneficiary {
    pub id: BeneficiaryId,
    pub user_id: UserId,
    pub display_name: String,
    pub country: CountryCode,
    pub currency: CurrencyCode,
    pub transfer_mode: TransferMode,
    /// Account/wallet/pickup reference at the payout partner
    pub account_reference: String,
    pub is_active: bool,
}

impl Beneficiary {
    /// Exact-id-or-fuzzy-name match used by transfer execution.
    ///
    /// A selector that parses as a number matches on id; any selector also
    /// matches as a case-insensitive substring of the display name.
    pub fn matches(&self, selector: &str) -> bool {
        let selector = selector.trim();
        if selector.is_empty() {
            return false;
        }
        if let Ok(id) = selector.parse::<i64>() {
            if self.id.value() == id {
                return true;
            }
        }
        self.display_name
            .to_lowercase()
            .contains(&selector.to_lowercase())
    }
}
