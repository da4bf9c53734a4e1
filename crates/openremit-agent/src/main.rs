//! OpenRemit walkthrough binary.
//!
//! Builds the fully in-memory stack, seeds one customer with an identity
//! document, two beneficiaries, and a small rate table, then walks the
//! whole conversation: verify, discover, execute, estimate, settle,
//! refresh, escalate. Every operation envelope is printed as JSON.

use chrono::NaiveDate;
use rust_decimal_macros::dec;
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use openremit_agent::{
    Beneficiary, BeneficiaryId, CountryCode, CurrencyCode, DocumentKind, EscalateRequest,
    IdentityRecord, OrderQueryRequest, RemitAgent, SettlementOutcome, ToolOutcome, TransferMode,
    TransferReply, TransferRequest, UserId, VerifyRequest,
};

const DEMO_USER: &str = "demo-maya";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    tracing::info!("starting OpenRemit walkthrough");

    let (agent, backends) = RemitAgent::in_memory();

    // One customer, one document, two payout destinations.
    backends.directory.add_identity(IdentityRecord::new(
        UserId::new(DEMO_USER),
        DocumentKind::NationalId,
        "Maya Pillai",
        "784-1992-5566778-4321",
        NaiveDate::from_ymd_opt(2031, 6, 15).unwrap(),
    ));
    backends.directory.add_beneficiary(Beneficiary {
        id: BeneficiaryId::new(1),
        user_id: UserId::new(DEMO_USER),
        display_name: "Rahul Sharma".to_string(),
        country: CountryCode::new("IN"),
        currency: CurrencyCode::new("INR"),
        transfer_mode: TransferMode::BankTransfer,
        account_reference: "HDFC ****2211".to_string(),
        is_active: true,
    });
    backends.directory.add_beneficiary(Beneficiary {
        id: BeneficiaryId::new(2),
        user_id: UserId::new(DEMO_USER),
        display_name: "Ayesha Khan".to_string(),
        country: CountryCode::new("AE"),
        currency: CurrencyCode::new("AED"),
        transfer_mode: TransferMode::CashPickup,
        account_reference: "Lulu Exchange, Deira".to_string(),
        is_active: true,
    });
    backends
        .rates
        .set_rate(CurrencyCode::new("USD"), CurrencyCode::new("INR"), dec!(83.20));
    backends
        .rates
        .set_rate(CurrencyCode::new("USD"), CurrencyCode::new("AED"), dec!(3.67));

    // A wrong guess at the document challenge, then the real answer.
    let denied = agent
        .verify_identity(VerifyRequest {
            user_id: DEMO_USER.to_string(),
            last_four_digits: "9999".to_string(),
            expiry_date: "15/06/2031".to_string(),
        })
        .await;
    render("verify_identity (wrong digits)", &denied)?;

    let verified = agent
        .verify_identity(VerifyRequest {
            user_id: DEMO_USER.to_string(),
            last_four_digits: "4321".to_string(),
            expiry_date: "15/06/2031".to_string(),
        })
        .await;
    render("verify_identity", &verified)?;

    // Empty request: discovery.
    let discovery = agent
        .transfer(TransferRequest {
            user_id: DEMO_USER.to_string(),
            ..Default::default()
        })
        .await;
    render("transfer (discovery)", &discovery)?;

    // Beneficiary plus amount: execution.
    let execution = agent
        .transfer(TransferRequest {
            user_id: DEMO_USER.to_string(),
            beneficiary: Some("rahul".to_string()),
            amount: Some(dec!(1000)),
        })
        .await;
    render("transfer (execution)", &execution)?;

    let Some(TransferReply::Receipt(receipt)) = execution.data else {
        anyhow::bail!("transfer execution did not return a receipt");
    };
    let order_number = receipt.order_number;

    let estimate = agent
        .delivery_estimate(OrderQueryRequest {
            user_id: DEMO_USER.to_string(),
            order_number: order_number.clone(),
        })
        .await;
    render("delivery_estimate", &estimate)?;

    // The settlement rail reports failure; the customer-visible status
    // keeps its marker until an authorized refresh.
    let settled = agent
        .apply_settlement(
            &order_number,
            SettlementOutcome::Failed,
            Some("beneficiary bank rejected the credit".to_string()),
        )
        .await?;
    tracing::info!(
        order_number = %settled.order_number,
        displayed = %settled.displayed_status,
        "settlement ingested"
    );

    let refreshed = agent
        .refresh_status(OrderQueryRequest {
            user_id: DEMO_USER.to_string(),
            order_number: order_number.clone(),
        })
        .await;
    render("refresh_status", &refreshed)?;

    let escalated = agent
        .escalate(EscalateRequest {
            user_id: DEMO_USER.to_string(),
            order_number,
            level: 2,
            reason: "transfer failed after funding".to_string(),
            conversation_summary: "customer funded promptly; settlement failed at the beneficiary bank"
                .to_string(),
        })
        .await;
    render("escalate", &escalated)?;

    tracing::info!("walkthrough complete");
    Ok(())
}

fn render<T: Serialize>(label: &str, outcome: &ToolOutcome<T>) -> anyhow::Result<()> {
    println!("── {label}");
    println!("{}", serde_json::to_string_pretty(outcome)?);
    println!();
    Ok(())
}
