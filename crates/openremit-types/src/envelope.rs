//! Operation result envelope.
//!
//! Every caller-facing operation returns a discriminated result, `{ok:
//! true, data}` or `{ok: false, errorKind, message}`, suitable for direct
//! JSON serialization. Business conditions travel inside the envelope;
//! nothing at that boundary is a panic or a transport fault.

use crate::RemitError;
use serde::{Deserialize, Serialize};

/// Discriminated operation result for the caller-facing layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolOutcome<T> {
    pub ok: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ToolOutcome<T> {
    /// Successful outcome carrying data.
    pub fn ok(data: T) -> Self {
        Self {
            ok: true,
            data: Some(data),
            error_kind: None,
            message: None,
        }
    }

    /// Failed outcome carrying the error code and a safe message.
    pub fn reject(error: &RemitError) -> Self {
        Self {
            ok: false,
            data: None,
            error_kind: Some(error.error_code().to_string()),
            message: Some(error.public_message()),
        }
    }

    /// Fold a core result into the envelope.
    pub fn from_result(result: crate::Result<T>) -> Self {
        match result {
            Ok(data) => Self::ok(data),
            Err(err) => Self::reject(&err),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.ok
    }

    pub fn into_data(self) -> Option<T> {
        self.data
    }
}
