//! Error taxonomy for OpenRemit
//!
//! Expected business conditions are values, never panics: every operation
//! returns `Result<T, RemitError>` and the caller-facing layer converts the
//! error into the result envelope. Verification failures stay coarse: the
//! reason code says which check failed, never how close the guess was.

use rust_decimal::Decimal;
use thiserror::Error;

/// Result type for OpenRemit operations
pub type Result<T> = std::result::Result<T, RemitError>;

/// OpenRemit error taxonomy
#[derive(Debug, Clone, Error)]
pub enum RemitError {
    // ========================================================================
    // Validation (malformed caller input)
    // ========================================================================

    /// Input failed shape validation
    #[error("invalid input: {message}")]
    InvalidInput { message: String },

    // ========================================================================
    // Identity verification (recoverable with correct credentials)
    // ========================================================================

    /// No identity record matches the supplied digits
    #[error("identity verification failed: no matching record")]
    NoMatch,

    /// More than one identity record matches, a data-integrity condition
    #[error("identity verification failed: multiple records match")]
    AmbiguousMatch,

    /// Supplied expiry date does not match the record
    #[error("identity verification failed: expiry date does not match")]
    ExpiryMismatch,

    /// The matched credential itself has expired
    #[error("identity verification failed: credential has expired")]
    CredentialExpired,

    /// Operation requires an active verification session
    #[error("identity verification required")]
    VerificationRequired,

    // ========================================================================
    // Business rules (well-formed request that cannot be satisfied)
    // ========================================================================

    /// No active beneficiary matches the selector
    #[error("no active beneficiary matches '{query}'")]
    BeneficiaryNotFound { query: String },

    /// Send amount is above the per-transfer ceiling
    #[error("send amount {amount} exceeds the transfer limit of {limit}")]
    AmountExceedsLimit { amount: Decimal, limit: Decimal },

    /// No exchange rate loaded for the currency pair
    #[error("no exchange rate available for {from}->{to}")]
    RateUnavailable { from: String, to: String },

    /// Order is not in a refreshable display state
    #[error("order {order_number} is not refreshable in status {status}")]
    NotRefreshable {
        order_number: String,
        status: String,
    },

    /// Order does not exist (or does not belong to the caller)
    #[error("order {order_number} not found")]
    OrderNotFound { order_number: String },

    // ========================================================================
    // System (never exposes internal detail to the caller)
    // ========================================================================

    /// Persistence layer failure
    #[error("storage failure: {message}")]
    Storage { message: String },
}

/// Coarse taxonomy bucket, mainly for logging and metrics labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Verification,
    BusinessRule,
    System,
}

impl ErrorCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::Verification => "verification",
            Self::BusinessRule => "business_rule",
            Self::System => "system",
        }
    }
}

impl RemitError {
    /// Create a validation error
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    /// Create a storage error
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    /// Create a beneficiary-not-found error
    pub fn beneficiary_not_found(query: impl Into<String>) -> Self {
        Self::BeneficiaryNotFound {
            query: query.into(),
        }
    }

    /// Create an order-not-found error
    pub fn order_not_found(order_number: impl Into<String>) -> Self {
        Self::OrderNotFound {
            order_number: order_number.into(),
        }
    }

    /// Create a not-refreshable error
    pub fn not_refreshable(order_number: impl Into<String>, status: impl Into<String>) -> Self {
        Self::NotRefreshable {
            order_number: order_number.into(),
            status: status.into(),
        }
    }

    /// Which taxonomy bucket this error belongs to
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidInput { .. } => ErrorCategory::Validation,
            Self::NoMatch
            | Self::AmbiguousMatch
            | Self::ExpiryMismatch
            | Self::CredentialExpired
            | Self::VerificationRequired => ErrorCategory::Verification,
            Self::BeneficiaryNotFound { .. }
            | Self::AmountExceedsLimit { .. }
            | Self::RateUnavailable { .. }
            | Self::NotRefreshable { .. }
            | Self::OrderNotFound { .. } => ErrorCategory::BusinessRule,
            Self::Storage { .. } => ErrorCategory::System,
        }
    }

    /// Error code carried as `errorKind` in the result envelope
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidInput { .. } => "INVALID_INPUT",
            Self::NoMatch => "NO_MATCH",
            Self::AmbiguousMatch => "AMBIGUOUS_MATCH",
            Self::ExpiryMismatch => "EXPIRY_MISMATCH",
            Self::CredentialExpired => "CREDENTIAL_EXPIRED",
            Self::VerificationRequired => "VERIFICATION_REQUIRED",
            Self::BeneficiaryNotFound { .. } => "BENEFICIARY_NOT_FOUND",
            Self::AmountExceedsLimit { .. } => "AMOUNT_EXCEEDS_LIMIT",
            Self::RateUnavailable { .. } => "RATE_UNAVAILABLE",
            Self::NotRefreshable { .. } => "NOT_REFRESHABLE",
            Self::OrderNotFound { .. } => "ORDER_NOT_FOUND",
            Self::Storage { .. } => "SYSTEM_ERROR",
        }
    }

    /// Check if retrying the same request may succeed later
    pub fn is_retriable(&self) -> bool {
        matches!(self, Self::RateUnavailable { .. } | Self::Storage { .. })
    }

    /// Message safe to return to the caller.
    ///
    /// System errors carry internal detail for the log only; the caller
    /// gets a generic failure.
    pub fn public_message(&self) -> String {
        match self {
            Self::Storage { .. } => "a system error occurred, please try again later".to_string(),
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_error_codes() {
        assert_eq!(RemitError::NoMatch.error_code(), "NO_MATCH");
        assert_eq!(
            RemitError::AmountExceedsLimit {
                amount: dec!(60000),
                limit: dec!(50000),
            }
            .error_code(),
            "AMOUNT_EXCEEDS_LIMIT"
        );
        assert_eq!(RemitError::storage("db down").error_code(), "SYSTEM_ERROR");
    }

    #[test]
    fn test_categories() {
        assert_eq!(
            RemitError::AmbiguousMatch.category(),
            ErrorCategory::Verification
        );
        assert_eq!(
            RemitError::order_not_found("TRF-1").category(),
            ErrorCategory::BusinessRule
        );
        assert_eq!(
            RemitError::invalid_input("bad date").category(),
            ErrorCategory::Validation
        );
    }

    #[test]
    fn test_retriable_errors() {
        assert!(RemitError::storage("timeout").is_retriable());
        assert!(RemitError::RateUnavailable {
            from: "USD".to_string(),
            to: "INR".to_string(),
        }
        .is_retriable());
        assert!(!RemitError::NoMatch.is_retriable());
        assert!(!RemitError::not_refreshable("TRF-1", "SUCCESS").is_retriable());
    }

    #[test]
    fn test_storage_detail_never_reaches_public_message() {
        let err = RemitError::storage("connection refused on replica 3");
        assert!(!err.public_message().contains("replica"));
        assert!(err.to_string().contains("replica"));
    }
}
