//! Request and response bodies for the finance API.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::transaction::TransactionType;

/// A username and password, sent as JSON to register and as a form to log in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// The token returned by a successful log in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccessToken {
    pub access_token: String,
    #[serde(default)]
    pub token_type: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewCategory {
    pub name: String,
    #[serde(rename = "type")]
    pub type_: TransactionType,
}

/// How many records an import added.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportSummary {
    #[serde(default)]
    pub imported_transactions: u64,
    #[serde(default)]
    pub imported_categories: u64,
}

/// The body of an error response, e.g. `{"detail": "Transaction not found"}`.
///
/// Validation errors use a list of objects for `detail`, so it is kept as raw JSON.
#[derive(Debug, Deserialize)]
pub(super) struct ErrorBody {
    pub detail: Value,
}

impl ErrorBody {
    pub(super) fn message(self) -> String {
        match self.detail {
            Value::String(message) => message,
            other => other.to_string(),
        }
    }
}
