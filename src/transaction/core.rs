//! The transaction record owned by the finance API and the decoding rules for
//! transaction lists.

use std::fmt::Display;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use time::Date;

/// The ID the finance API assigns to a transaction.
pub type TransactionId = i64;

/// Whether money came in or went out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    /// The value used on the wire and in form fields.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }

    /// The human readable name.
    pub fn label(self) -> &'static str {
        match self {
            Self::Income => "Income",
            Self::Expense => "Expense",
        }
    }
}

impl Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single dated income or expense record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: TransactionId,
    #[serde(rename = "type")]
    pub type_: TransactionType,
    pub description: String,
    pub amount: f64,
    pub category: String,
    pub date: Date,
}

impl Transaction {
    /// The mutable fields of this transaction, e.g. for copying it.
    pub fn to_new(&self) -> NewTransaction {
        NewTransaction {
            type_: self.type_,
            description: self.description.clone(),
            amount: self.amount,
            category: self.category.clone(),
            date: self.date,
        }
    }
}

/// The fields sent to the finance API to create or replace a transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewTransaction {
    #[serde(rename = "type")]
    pub type_: TransactionType,
    pub description: String,
    pub amount: f64,
    pub category: String,
    pub date: Date,
}

/// Decode a transaction list returned by the finance API.
///
/// A payload that is not a JSON array is treated as an empty list and entries
/// that do not decode as a [Transaction] are skipped. Both cases are logged as
/// warnings so that bad upstream data never reaches the filter or the views.
pub fn decode_transactions(payload: Value) -> Vec<Transaction> {
    let Value::Array(items) = payload else {
        tracing::warn!(
            "Expected a list of transactions but got {}, treating it as empty",
            json_kind(&payload)
        );
        return Vec::new();
    };

    items
        .into_iter()
        .filter_map(|item| {
            serde_json::from_value::<Transaction>(item)
                .inspect_err(|error| tracing::warn!("Skipping malformed transaction: {error}"))
                .ok()
        })
        .collect()
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
