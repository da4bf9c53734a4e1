//! Tool-boundary data shapes.
//!
//! Everything crossing the agent boundary is camelCase JSON. These DTOs
//! re-project the domain types so the wire contract can hold still while
//! the engines evolve.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use openremit_disclosure::{DisclosureResult, EscalationTicket};
use openremit_timeline::{ArrivalEstimate, InquiryDisposition};
use openremit_transfer::{RateQuote, TransferIntent, TransferOptions, TransferReceipt};
use openremit_types::{
    Beneficiary, CountryCode, CurrencyCode, DocumentKind, TransferMode, TransferOrder,
    TransferStatus, VerifiedIdentity,
};

/// `verify_identity` request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyRequest {
    pub user_id: String,
    pub last_four_digits: String,
    /// DD/MM/YYYY
    pub expiry_date: String,
}

/// `transfer` request. Leaving both fields out asks for discovery;
/// filling both executes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferRequest {
    pub user_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub beneficiary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<Decimal>,
}

impl TransferRequest {
    pub fn intent(&self) -> TransferIntent {
        TransferIntent {
            beneficiary: self.beneficiary.clone(),
            amount: self.amount,
        }
    }
}

/// Order lookup request shared by `refresh_status` and
/// `delivery_estimate`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderQueryRequest {
    pub user_id: String,
    pub order_number: String,
}

/// `escalate` request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EscalateRequest {
    pub user_id: String,
    pub order_number: String,
    pub level: u8,
    pub reason: String,
    #[serde(default)]
    pub conversation_summary: String,
}

/// Masked identity summary returned by `verify_identity`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifiedIdentityDto {
    pub subject_reference: String,
    pub holder_name: String,
    pub document_kind: DocumentKind,
    pub id_number_masked: String,
    pub session_expires_at: DateTime<Utc>,
}

impl From<VerifiedIdentity> for VerifiedIdentityDto {
    fn from(identity: VerifiedIdentity) -> Self {
        Self {
            subject_reference: identity.subject_reference,
            holder_name: identity.holder_name,
            document_kind: identity.document_kind,
            id_number_masked: identity.id_number_masked,
            session_expires_at: identity.session_expires_at,
        }
    }
}

/// Payout destination as shown during transfer discovery.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BeneficiaryDto {
    pub id: i64,
    pub display_name: String,
    pub country: CountryCode,
    pub currency: CurrencyCode,
    pub transfer_mode: TransferMode,
    pub account_reference: String,
}

impl From<Beneficiary> for BeneficiaryDto {
    fn from(beneficiary: Beneficiary) -> Self {
        Self {
            id: beneficiary.id.value(),
            display_name: beneficiary.display_name,
            country: beneficiary.country,
            currency: beneficiary.currency,
            transfer_mode: beneficiary.transfer_mode,
            account_reference: beneficiary.account_reference,
        }
    }
}

/// Indicative exchange rate shown during discovery.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateQuoteDto {
    pub from: CurrencyCode,
    pub to: CurrencyCode,
    pub rate: Decimal,
}

impl From<RateQuote> for RateQuoteDto {
    fn from(quote: RateQuote) -> Self {
        Self {
            from: quote.from,
            to: quote.to,
            rate: quote.rate,
        }
    }
}

/// Discovery payload: what the customer can do next.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferOptionsDto {
    pub beneficiaries: Vec<BeneficiaryDto>,
    pub suggested_amounts: Vec<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_rate: Option<RateQuoteDto>,
}

impl From<TransferOptions> for TransferOptionsDto {
    fn from(options: TransferOptions) -> Self {
        Self {
            beneficiaries: options
                .beneficiaries
                .into_iter()
                .map(BeneficiaryDto::from)
                .collect(),
            suggested_amounts: options.suggested_amounts,
            reference_rate: options.reference_quote.map(RateQuoteDto::from),
        }
    }
}

/// Execution payload: the created order plus its funding link.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderReceiptDto {
    pub order_number: String,
    pub status: TransferStatus,
    pub beneficiary: String,
    pub send_amount: Decimal,
    pub fee_amount: Decimal,
    pub total_amount: Decimal,
    pub exchange_rate: Decimal,
    pub received_amount: Decimal,
    pub currency: CurrencyCode,
    pub country: CountryCode,
    pub transfer_mode: TransferMode,
    pub payment_link: String,
    pub created_at: DateTime<Utc>,
}

impl From<TransferReceipt> for OrderReceiptDto {
    fn from(receipt: TransferReceipt) -> Self {
        let order = receipt.order;
        Self {
            order_number: order.order_number.as_str().to_string(),
            status: order.displayed_status,
            beneficiary: order.beneficiary_reference,
            send_amount: order.send_amount,
            fee_amount: order.fee_amount,
            total_amount: order.total_amount,
            exchange_rate: order.exchange_rate,
            received_amount: order.received_amount,
            currency: order.currency,
            country: order.country,
            transfer_mode: order.transfer_mode,
            payment_link: receipt.payment_link,
            created_at: order.created_at,
        }
    }
}

/// The `transfer` operation answers with one of two shapes, discriminated
/// by `kind`.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransferReply {
    Options(TransferOptionsDto),
    Receipt(OrderReceiptDto),
}

/// Result of an authorized status refresh.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusRefreshDto {
    pub order_number: String,
    pub status: TransferStatus,
    pub send_amount: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failure_reason: Option<String>,
    pub revealed: bool,
}

impl From<DisclosureResult> for StatusRefreshDto {
    fn from(result: DisclosureResult) -> Self {
        Self {
            order_number: result.order_number.as_str().to_string(),
            status: result.status,
            send_amount: result.send_amount,
            failure_reason: result.failure_reason,
            revealed: result.revealed,
        }
    }
}

/// Arrival estimate plus the inquiry-handling hint for the conversation
/// layer.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryEstimateDto {
    pub order_number: String,
    pub status: TransferStatus,
    pub transfer_mode: TransferMode,
    pub country: CountryCode,
    pub expected_arrival: DateTime<Utc>,
    pub is_delayed: bool,
    pub delay_minutes: i64,
    pub inquiry_count: u32,
    pub disposition: InquiryDisposition,
}

impl DeliveryEstimateDto {
    pub fn assemble(
        order: &TransferOrder,
        estimate: &ArrivalEstimate,
        disposition: InquiryDisposition,
    ) -> Self {
        Self {
            order_number: order.order_number.as_str().to_string(),
            status: order.displayed_status,
            transfer_mode: order.transfer_mode,
            country: order.country.clone(),
            expected_arrival: estimate.expected_at,
            is_delayed: estimate.is_delayed,
            delay_minutes: estimate.delay_minutes,
            inquiry_count: order.inquiry_count,
            disposition,
        }
    }
}

/// Acknowledgement returned by `escalate`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EscalationTicketDto {
    pub order_number: String,
    pub level: u8,
    pub reason: String,
    pub sla: String,
    pub escalated_at: DateTime<Utc>,
}

impl From<EscalationTicket> for EscalationTicketDto {
    fn from(ticket: EscalationTicket) -> Self {
        Self {
            order_number: ticket.order_number.as_str().to_string(),
            level: ticket.level,
            reason: ticket.reason,
            sla: ticket.sla,
            escalated_at: ticket.escalated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use openremit_types::{BeneficiaryId, UserId};
    use rust_decimal_macros::dec;

    fn beneficiary() -> Beneficiary {
        Beneficiary {
            id: BeneficiaryId::new(7),
            user_id: UserId::new("user-1"),
            display_name: "Rahul Sharma".to_string(),
            country: CountryCode::new("IN"),
            currency: CurrencyCode::new("INR"),
            transfer_mode: TransferMode::BankTransfer,
            account_reference: "HDFC ****2211".to_string(),
            is_active: true,
        }
    }

    #[test]
    fn test_options_reply_serializes_camel_case_with_kind() {
        let reply = TransferReply::Options(TransferOptionsDto {
            beneficiaries: vec![BeneficiaryDto::from(beneficiary())],
            suggested_amounts: vec![dec!(100), dec!(500)],
            reference_rate: Some(RateQuoteDto {
                from: CurrencyCode::new("USD"),
                to: CurrencyCode::new("INR"),
                rate: dec!(83.20),
            }),
        });

        let value = serde_json::to_value(&reply).unwrap();
        assert_eq!(value["kind"], "OPTIONS");
        assert_eq!(value["beneficiaries"][0]["displayName"], "Rahul Sharma");
        assert_eq!(value["beneficiaries"][0]["transferMode"], "BANK_TRANSFER");
        assert_eq!(value["referenceRate"]["rate"], "83.20");
    }

    #[test]
    fn test_refresh_dto_omits_absent_failure_reason() {
        let dto = StatusRefreshDto {
            order_number: "TRF-20250114-AB12CD".to_string(),
            status: TransferStatus::Success,
            send_amount: dec!(1000),
            failure_reason: None,
            revealed: true,
        };
        let value = serde_json::to_value(&dto).unwrap();
        assert_eq!(value["status"], "SUCCESS");
        assert!(value.get("failureReason").is_none());
    }
}
