//! Verification Service
//!
//! Runs the two-factor document challenge: the last four digits of an
//! identity number plus its expiry date in DD/MM/YYYY form. Check order is
//! fixed (shape, suffix match, supplied-expiry match, then credential
//! freshness) so the caller always learns the earliest failing check and
//! nothing beyond it.

use std::sync::Arc;

use chrono::{DateTime, Duration, NaiveDate, Utc};

use openremit_store::{IdentityDirectory, SessionStore};
use openremit_types::{
    RemitError, Result, UserId, VerificationSession, VerifiedIdentity,
};

use crate::config::VerifyConfig;

const EXPIRY_FORMAT: &str = "%d/%m/%Y";

/// Identity verification service.
#[derive(Clone)]
pub struct VerificationService {
    directory: Arc<dyn IdentityDirectory>,
    sessions: Arc<dyn SessionStore>,
    config: VerifyConfig,
}

impl VerificationService {
    /// Create a new verification service
    pub fn new(
        directory: Arc<dyn IdentityDirectory>,
        sessions: Arc<dyn SessionStore>,
        config: VerifyConfig,
    ) -> Self {
        Self {
            directory,
            sessions,
            config,
        }
    }

    /// Run the document challenge for a user.
    ///
    /// On success a fresh session replaces any prior one for the user, and
    /// the returned summary only ever carries the masked document number.
    pub async fn verify(
        &self,
        user_id: &UserId,
        last_four: &str,
        expiry_raw: &str,
    ) -> Result<VerifiedIdentity> {
        let last_four = last_four.trim();
        if last_four.len() != 4 || !last_four.chars().all(|c| c.is_ascii_digit()) {
            return Err(RemitError::invalid_input(
                "last four digits must be exactly four digits",
            ));
        }

        let supplied_expiry = NaiveDate::parse_from_str(expiry_raw.trim(), EXPIRY_FORMAT)
            .map_err(|_| {
                RemitError::invalid_input("expiry date must be a valid date in DD/MM/YYYY form")
            })?;

        let matches = self.directory.find_by_suffix(user_id, last_four).await?;
        let record = match matches.as_slice() {
            [] => return Err(RemitError::NoMatch),
            [record] => record,
            _ => {
                tracing::warn!(
                    user_id = %user_id,
                    count = matches.len(),
                    "multiple identity records share a digit suffix"
                );
                return Err(RemitError::AmbiguousMatch);
            }
        };

        // Day, month, and year must all agree with the record.
        if record.expires_on != supplied_expiry {
            return Err(RemitError::ExpiryMismatch);
        }

        let now = Utc::now();
        if record.expires_on < now.date_naive() {
            return Err(RemitError::CredentialExpired);
        }

        let ttl = Duration::seconds(self.config.session_ttl.as_secs() as i64);
        let session = VerificationSession::open(user_id.clone(), record.id.to_string(), now, ttl);
        let session = self.sessions.create_exclusive(session).await?;

        tracing::info!(
            user_id = %user_id,
            session_id = %session.id,
            expires_at = %session.expires_at,
            "identity verified, session opened"
        );

        Ok(VerifiedIdentity {
            subject_reference: session.subject_reference.clone(),
            holder_name: record.holder_name.clone(),
            document_kind: record.kind,
            id_number_masked: record.masked_number(),
            session_expires_at: session.expires_at,
        })
    }

    /// The caller's active session, or a verification-required rejection.
    pub async fn require_active(&self, user_id: &UserId) -> Result<VerificationSession> {
        self.active_session_at(user_id, Utc::now()).await
    }

    /// Same as [`Self::require_active`] with an explicit clock.
    pub async fn active_session_at(
        &self,
        user_id: &UserId,
        now: DateTime<Utc>,
    ) -> Result<VerificationSession> {
        self.sessions
            .find_active(user_id, now)
            .await?
            .ok_or(RemitError::VerificationRequired)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;
    use openremit_store::{InMemoryDirectory, InMemorySessionStore};
    use openremit_types::{DocumentKind, IdentityRecord};

    fn future_date() -> NaiveDate {
        let today = Utc::now().date_naive();
        NaiveDate::from_ymd_opt(today.year() + 2, 6, 15).unwrap()
    }

    fn service_with(records: Vec<IdentityRecord>) -> VerificationService {
        let directory = InMemoryDirectory::new();
        for record in records {
            directory.add_identity(record);
        }
        VerificationService::new(
            Arc::new(directory),
            Arc::new(InMemorySessionStore::new()),
            VerifyConfig::default(),
        )
    }

    fn record(user: &str, number: &str, expires_on: NaiveDate) -> IdentityRecord {
        IdentityRecord::new(
            UserId::new(user),
            DocumentKind::NationalId,
            "Ayesha Khan",
            number,
            expires_on,
        )
    }

    #[tokio::test]
    async fn test_verify_happy_path_masks_number() {
        let expiry = future_date();
        let service = service_with(vec![record("user-1", "784-1990-55667-4321", expiry)]);

        let verified = service
            .verify(
                &UserId::new("user-1"),
                "4321",
                &expiry.format("%d/%m/%Y").to_string(),
            )
            .await
            .unwrap();

        assert_eq!(verified.holder_name, "Ayesha Khan");
        assert_eq!(verified.id_number_masked, "XXX-XXXX-XXXXX-4321");
        assert!(verified.session_expires_at > Utc::now());
    }

    #[tokio::test]
    async fn test_verify_opens_active_session() {
        let expiry = future_date();
        let service = service_with(vec![record("user-1", "784-1990-55667-4321", expiry)]);

        service
            .verify(
                &UserId::new("user-1"),
                "4321",
                &expiry.format("%d/%m/%Y").to_string(),
            )
            .await
            .unwrap();

        let session = service.require_active(&UserId::new("user-1")).await.unwrap();
        assert!(session.is_active_at(Utc::now()));
    }

    #[tokio::test]
    async fn test_malformed_digits_rejected_before_lookup() {
        let service = service_with(vec![]);

        for bad in ["123", "12345", "43a1", ""] {
            let err = service
                .verify(&UserId::new("user-1"), bad, "15/06/2030")
                .await
                .unwrap_err();
            assert_eq!(err.error_code(), "INVALID_INPUT");
        }
    }

    #[tokio::test]
    async fn test_malformed_expiry_rejected() {
        let expiry = future_date();
        let service = service_with(vec![record("user-1", "784-1990-55667-4321", expiry)]);

        for bad in ["2030-06-15", "15/13/2030", "31/02/2030", "June 15 2030"] {
            let err = service
                .verify(&UserId::new("user-1"), "4321", bad)
                .await
                .unwrap_err();
            assert_eq!(err.error_code(), "INVALID_INPUT");
        }
    }

    #[tokio::test]
    async fn test_no_match_when_suffix_unknown() {
        let service = service_with(vec![record(
            "user-1",
            "784-1990-55667-4321",
            future_date(),
        )]);

        let err = service
            .verify(&UserId::new("user-1"), "9999", "15/06/2030")
            .await
            .unwrap_err();
        assert_eq!(err.error_code(), "NO_MATCH");
    }

    #[tokio::test]
    async fn test_ambiguous_when_two_records_share_suffix() {
        let expiry = future_date();
        let service = service_with(vec![
            record("user-1", "784-1990-55667-4321", expiry),
            record("user-1", "P-99887-4321", expiry),
        ]);

        let err = service
            .verify(
                &UserId::new("user-1"),
                "4321",
                &expiry.format("%d/%m/%Y").to_string(),
            )
            .await
            .unwrap_err();
        assert_eq!(err.error_code(), "AMBIGUOUS_MATCH");
    }

    #[tokio::test]
    async fn test_expiry_mismatch_wins_over_expired_credential() {
        // Record expired long ago; the caller also supplies the wrong date.
        let service = service_with(vec![record(
            "user-1",
            "784-1990-55667-4321",
            NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
        )]);

        let err = service
            .verify(&UserId::new("user-1"), "4321", "02/01/2020")
            .await
            .unwrap_err();
        assert_eq!(err.error_code(), "EXPIRY_MISMATCH");
    }

    #[tokio::test]
    async fn test_expired_credential_with_correct_date() {
        let service = service_with(vec![record(
            "user-1",
            "784-1990-55667-4321",
            NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
        )]);

        let err = service
            .verify(&UserId::new("user-1"), "4321", "01/01/2020")
            .await
            .unwrap_err();
        assert_eq!(err.error_code(), "CREDENTIAL_EXPIRED");
    }

    #[tokio::test]
    async fn test_require_active_without_session() {
        let service = service_with(vec![]);
        let err = service
            .require_active(&UserId::new("user-1"))
            .await
            .unwrap_err();
        assert_eq!(err.error_code(), "VERIFICATION_REQUIRED");
    }

    #[tokio::test]
    async fn test_reverifying_replaces_the_session() {
        let expiry = future_date();
        let service = service_with(vec![record("user-1", "784-1990-55667-4321", expiry)]);
        let date_arg = expiry.format("%d/%m/%Y").to_string();

        service
            .verify(&UserId::new("user-1"), "4321", &date_arg)
            .await
            .unwrap();
        let first = service.require_active(&UserId::new("user-1")).await.unwrap();

        service
            .verify(&UserId::new("user-1"), "4321", &date_arg)
            .await
            .unwrap();
        let second = service.require_active(&UserId::new("user-1")).await.unwrap();

        assert_ne!(first.id, second.id);
    }
}
