//! OpenRemit Agent - caller-facing operation surface
//!
//! Wires the verification, transfer, timeline, and disclosure engines
//! into the five operations an AI support agent calls. Every operation
//! returns the `{ok: true, data}` / `{ok: false, errorKind, message}`
//! envelope: expected business conditions travel as values, never as
//! panics or transport faults.
//!
//! # Quick Start
//!
//! ```ignore
//! use openremit_agent::{RemitAgent, VerifyRequest};
//!
//! #[tokio::main]
//! async fn main() {
//!     let (agent, backends) = RemitAgent::in_memory();
//!     // seed backends.directory / backends.rates here
//!
//!     let outcome = agent
//!         .verify_identity(VerifyRequest {
//!             user_id: "user-1".into(),
//!             last_four_digits: "4321".into(),
//!             expiry_date: "15/06/2028".into(),
//!         })
//!         .await;
//!     assert!(outcome.ok);
//! }
//! ```

pub mod dto;

pub use dto::{
    BeneficiaryDto, DeliveryEstimateDto, EscalateRequest, EscalationTicketDto, OrderQueryRequest,
    OrderReceiptDto, RateQuoteDto, StatusRefreshDto, TransferOptionsDto, TransferReply,
    TransferRequest, VerifiedIdentityDto, VerifyRequest,
};
pub use openremit_types::*;

use std::sync::Arc;

use chrono::Utc;

use openremit_disclosure::{DisclosureEngine, EscalationLevel, EscalationTracker};
use openremit_store::{
    BeneficiaryDirectory, IdentityDirectory, InMemoryDirectory, InMemoryOrderStore,
    InMemoryRateSource, InMemorySessionStore, OrderStore, RateSource, SessionStore,
};
use openremit_timeline::{estimate_arrival, InquiryDisposition, TimelineConfig};
use openremit_transfer::{TransferConfig, TransferEngine};
use openremit_verify::{VerificationService, VerifyConfig};

/// Bundled configuration for the whole surface.
#[derive(Debug, Clone, Default)]
pub struct AgentConfig {
    pub verify: VerifyConfig,
    pub transfer: TransferConfig,
    pub timeline: TimelineConfig,
}

impl AgentConfig {
    /// Defaults overlaid with every `OPENREMIT_*` environment override.
    pub fn from_env() -> Self {
        Self {
            verify: VerifyConfig::from_env(),
            transfer: TransferConfig::from_env(),
            timeline: TimelineConfig::from_env(),
        }
    }

    /// Collect violations across all sub-configs.
    pub fn validate(&self) -> std::result::Result<(), Vec<String>> {
        let mut errors = Vec::new();
        for result in [
            self.verify.validate(),
            self.transfer.validate(),
            self.timeline.validate(),
        ] {
            if let Err(mut sub) = result {
                errors.append(&mut sub);
            }
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// The persistence and lookup ports the agent runs against.
#[derive(Clone)]
pub struct AgentBackends {
    pub identities: Arc<dyn IdentityDirectory>,
    pub sessions: Arc<dyn SessionStore>,
    pub beneficiaries: Arc<dyn BeneficiaryDirectory>,
    pub rates: Arc<dyn RateSource>,
    pub orders: Arc<dyn OrderStore>,
}

/// Concrete in-memory backends, kept so demos and tests can seed
/// records and drive settlement directly.
#[derive(Debug, Clone, Default)]
pub struct InMemoryBackends {
    pub directory: InMemoryDirectory,
    pub sessions: InMemorySessionStore,
    pub orders: InMemoryOrderStore,
    pub rates: InMemoryRateSource,
}

impl InMemoryBackends {
    pub fn ports(&self) -> AgentBackends {
        AgentBackends {
            identities: Arc::new(self.directory.clone()),
            sessions: Arc::new(self.sessions.clone()),
            beneficiaries: Arc::new(self.directory.clone()),
            rates: Arc::new(self.rates.clone()),
            orders: Arc::new(self.orders.clone()),
        }
    }
}

/// The agent-facing remittance surface.
#[derive(Clone)]
pub struct RemitAgent {
    verification: VerificationService,
    transfers: TransferEngine,
    disclosure: DisclosureEngine,
    escalations: EscalationTracker,
    timeline: TimelineConfig,
}

impl RemitAgent {
    /// Wire the engines over the supplied backends.
    pub fn new(backends: AgentBackends, config: AgentConfig) -> Self {
        let verification = VerificationService::new(
            backends.identities.clone(),
            backends.sessions.clone(),
            config.verify,
        );
        let transfers = TransferEngine::new(
            backends.beneficiaries.clone(),
            backends.rates.clone(),
            backends.orders.clone(),
            config.transfer,
        );
        let disclosure = DisclosureEngine::new(backends.orders.clone());
        let escalations = EscalationTracker::new(backends.orders);
        Self {
            verification,
            transfers,
            disclosure,
            escalations,
            timeline: config.timeline,
        }
    }

    /// Fully in-memory stack with default configuration. Returns the
    /// concrete backends alongside the agent for seeding.
    pub fn in_memory() -> (Self, InMemoryBackends) {
        let backends = InMemoryBackends::default();
        let agent = Self::new(backends.ports(), AgentConfig::default());
        (agent, backends)
    }

    /// Identity verification: last-four digits plus expiry date.
    pub async fn verify_identity(&self, request: VerifyRequest) -> ToolOutcome<VerifiedIdentityDto> {
        ToolOutcome::from_result(self.verify_flow(request).await)
    }

    /// Transfer discovery or execution, depending on how much of the
    /// request is filled in. Requires an active verification session.
    pub async fn transfer(&self, request: TransferRequest) -> ToolOutcome<TransferReply> {
        ToolOutcome::from_result(self.transfer_flow(request).await)
    }

    /// Authorized status refresh; the only path that reveals a settled
    /// outcome. Requires an active verification session.
    pub async fn refresh_status(&self, request: OrderQueryRequest) -> ToolOutcome<StatusRefreshDto> {
        ToolOutcome::from_result(self.refresh_flow(request).await)
    }

    /// Arrival estimate plus delay standing; counts as a customer
    /// inquiry.
    pub async fn delivery_estimate(
        &self,
        request: OrderQueryRequest,
    ) -> ToolOutcome<DeliveryEstimateDto> {
        ToolOutcome::from_result(self.estimate_flow(request).await)
    }

    /// File or raise an escalation for an order the caller owns.
    pub async fn escalate(&self, request: EscalateRequest) -> ToolOutcome<EscalationTicketDto> {
        ToolOutcome::from_result(self.escalate_flow(request).await)
    }

    /// Inbound settlement notification. Back-office entry point, not an
    /// agent tool; business conditions surface as plain errors here.
    pub async fn apply_settlement(
        &self,
        order_number: &str,
        outcome: SettlementOutcome,
        failure_reason: Option<String>,
    ) -> Result<TransferOrder> {
        let order_number = parse_order_number(order_number)?;
        self.disclosure
            .apply_settlement(&order_number, outcome, failure_reason)
            .await
    }

    async fn verify_flow(&self, request: VerifyRequest) -> Result<VerifiedIdentityDto> {
        let user_id = parse_user_id(&request.user_id)?;
        let identity = self
            .verification
            .verify(&user_id, &request.last_four_digits, &request.expiry_date)
            .await?;
        Ok(VerifiedIdentityDto::from(identity))
    }

    async fn transfer_flow(&self, request: TransferRequest) -> Result<TransferReply> {
        let user_id = parse_user_id(&request.user_id)?;
        self.verification.require_active(&user_id).await?;
        let outcome = self.transfers.handle(&user_id, request.intent()).await?;
        Ok(match outcome {
            openremit_transfer::TransferOutcome::Options(options) => {
                TransferReply::Options(TransferOptionsDto::from(options))
            }
            openremit_transfer::TransferOutcome::Receipt(receipt) => {
                TransferReply::Receipt(OrderReceiptDto::from(receipt))
            }
        })
    }

    async fn refresh_flow(&self, request: OrderQueryRequest) -> Result<StatusRefreshDto> {
        let user_id = parse_user_id(&request.user_id)?;
        let order_number = parse_order_number(&request.order_number)?;
        let session = self.verification.require_active(&user_id).await?;
        let result = self.disclosure.refresh(&session, &order_number).await?;
        Ok(StatusRefreshDto::from(result))
    }

    async fn estimate_flow(&self, request: OrderQueryRequest) -> Result<DeliveryEstimateDto> {
        let user_id = parse_user_id(&request.user_id)?;
        let order_number = parse_order_number(&request.order_number)?;
        let order = self
            .escalations
            .record_inquiry(&user_id, &order_number)
            .await?;
        let estimate = estimate_arrival(&order, Utc::now(), &self.timeline);
        let disposition = InquiryDisposition::select(&estimate, order.inquiry_count);
        Ok(DeliveryEstimateDto::assemble(&order, &estimate, disposition))
    }

    async fn escalate_flow(&self, request: EscalateRequest) -> Result<EscalationTicketDto> {
        let user_id = parse_user_id(&request.user_id)?;
        let order_number = parse_order_number(&request.order_number)?;
        let level = EscalationLevel::from_u8(request.level)?;
        let ticket = self
            .escalations
            .escalate(
                &user_id,
                &order_number,
                level,
                &request.reason,
                &request.conversation_summary,
            )
            .await?;
        Ok(EscalationTicketDto::from(ticket))
    }
}

fn parse_user_id(raw: &str) -> Result<UserId> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(RemitError::invalid_input("userId must not be blank"));
    }
    Ok(UserId::new(trimmed))
}

fn parse_order_number(raw: &str) -> Result<OrderNumber> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(RemitError::invalid_input("orderNumber must not be blank"));
    }
    Ok(OrderNumber::new(trimmed))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_validate_aggregates_violations() {
        let mut config = AgentConfig::default();
        assert!(config.validate().is_ok());

        config.verify.session_ttl = std::time::Duration::ZERO;
        config.timeline.delay_threshold = std::time::Duration::ZERO;
        let errors = config.validate().unwrap_err();
        assert!(errors.len() >= 2);
    }

    #[test]
    fn test_blank_identifiers_rejected() {
        assert!(parse_user_id("  ").is_err());
        assert!(parse_order_number("").is_err());
        assert_eq!(parse_user_id(" user-1 ").unwrap(), UserId::new("user-1"));
    }

    #[tokio::test]
    async fn test_unverified_caller_gets_envelope_error() {
        let (agent, _backends) = RemitAgent::in_memory();
        let outcome = agent
            .transfer(TransferRequest {
                user_id: "user-1".to_string(),
                ..Default::default()
            })
            .await;
        assert!(!outcome.ok);
        assert_eq!(outcome.error_kind.as_deref(), Some("VERIFICATION_REQUIRED"));
    }
}
