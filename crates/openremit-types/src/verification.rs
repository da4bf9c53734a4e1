//! Identity verification types for OpenRemit
//!
//! A `VerificationSession` is a short-lived proof that the caller passed an
//! identity challenge for a given user. Sensitive disclosures are gated on
//! an active session; activity is a wall-clock comparison, never a timer.

use crate::UserId;
use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Kind of identity document on file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    NationalId,
    Passport,
    ResidencePermit,
}

impl DocumentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NationalId => "national ID",
            Self::Passport => "passport",
            Self::ResidencePermit => "residence permit",
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One identity document on file for a user.
///
/// `id_number` is stored in dash-delimited groups; the final group is the
/// four digits the customer is challenged on.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentityRecord {
    pub id: Uuid,
    pub user_id: UserId,
    pub kind: DocumentKind,
    pub holder_name: String,
    pub id_number: String,
    pub expires_on: NaiveDate,
}

impl IdentityRecord {
    pub fn new(
        user_id: UserId,
        kind: DocumentKind,
        holder_name: impl Into<String>,
        id_number: impl Into<String>,
        expires_on: NaiveDate,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            kind,
            holder_name: holder_name.into(),
            id_number: id_number.into(),
            expires_on,
        }
    }

    /// Whether the stored number ends in `-<last_four>`.
    pub fn suffix_matches(&self, last_four: &str) -> bool {
        self.id_number.ends_with(&format!("-{last_four}"))
    }

    /// The stored number with every digit except the final four masked.
    pub fn masked_number(&self) -> String {
        let digit_count = self
            .id_number
            .chars()
            .filter(|c| c.is_ascii_digit())
            .count();
        let mask_until = digit_count.saturating_sub(4);
        let mut seen = 0usize;
        self.id_number
            .chars()
            .map(|c| {
                if c.is_ascii_digit() {
                    seen += 1;
                    if seen > mask_until {
                        c
                    } else {
                        'X'
                    }
                } else {
                    c
                }
            })
            .collect()
    }
}

/// Proof that the caller passed an identity check for a given user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationSession {
    pub id: Uuid,
    pub user_id: UserId,
    /// Id of the identity record that was verified
    pub subject_reference: String,
    pub verified_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub is_active: bool,
}

impl VerificationSession {
    /// Open a fresh session at `now` with the given time-to-live.
    pub fn open(
        user_id: UserId,
        subject_reference: impl Into<String>,
        now: DateTime<Utc>,
        ttl: Duration,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            subject_reference: subject_reference.into(),
            verified_at: now,
            expires_at: now + ttl,
            is_active: true,
        }
    }

    /// Active means not deactivated and not past expiry at `now`.
    pub fn is_active_at(&self, now: DateTime<Utc>) -> bool {
        self.is_active && now < self.expires_at
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    pub fn deactivate(&mut self) {
        self.is_active = false;
    }
}

/// Masked identity summary returned on successful verification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifiedIdentity {
    pub subject_reference: String,
    pub holder_name: String,
    pub document_kind: DocumentKind,
    pub id_number_masked: String,
    pub session_expires_at: DateTime<Utc>,
}
