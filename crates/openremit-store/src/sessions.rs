//! Verification-session persistence.
//!
//! The one-active-session-per-user invariant is enforced here: creating a
//! session deactivates every prior session for that user inside a single
//! write-lock acquisition. Expiry is a wall-clock comparison; reads
//! deactivate lapsed sessions lazily and `sweep_expired` does the same in
//! bulk for hosts that schedule it.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use openremit_types::{Result, UserId, VerificationSession};

/// Persistence seam for verification sessions.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Persist a new session, deactivating every prior session for the
    /// same user in the same operation.
    async fn create_exclusive(&self, session: VerificationSession) -> Result<VerificationSession>;

    /// The user's active session at `now`, if any.
    async fn find_active(
        &self,
        user_id: &UserId,
        now: DateTime<Utc>,
    ) -> Result<Option<VerificationSession>>;

    /// Deactivate every session past expiry; returns how many were swept.
    async fn sweep_expired(&self, now: DateTime<Utc>) -> Result<usize>;
}

/// In-memory session store keyed by session id.
#[derive(Debug, Clone, Default)]
pub struct InMemorySessionStore {
    sessions: Arc<RwLock<HashMap<Uuid, VerificationSession>>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn create_exclusive(&self, session: VerificationSession) -> Result<VerificationSession> {
        let mut sessions = self.sessions.write().await;
        for existing in sessions.values_mut() {
            if existing.user_id == session.user_id && existing.is_active {
                existing.deactivate();
            }
        }
        sessions.insert(session.id, session.clone());
        Ok(session)
    }

    async fn find_active(
        &self,
        user_id: &UserId,
        now: DateTime<Utc>,
    ) -> Result<Option<VerificationSession>> {
        let mut sessions = self.sessions.write().await;

        // Lazy sweep for this user before answering.
        for session in sessions.values_mut() {
            if session.user_id == *user_id && session.is_active && session.is_expired_at(now) {
                session.deactivate();
            }
        }

        Ok(sessions
            .values()
            .filter(|s| s.user_id == *user_id && s.is_active_at(now))
            .max_by_key(|s| s.expires_at)
            .cloned())
    }

    async fn sweep_expired(&self, now: DateTime<Utc>) -> Result<usize> {
        let mut sessions = self.sessions.write().await;
        let mut swept = 0;
        for session in sessions.values_mut() {
            if session.is_active && session.is_expired_at(now) {
                session.deactivate();
                swept += 1;
            }
        }
        Ok(swept)
    }
}
