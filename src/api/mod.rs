//! Access to the remote finance API that stores users, transactions and categories.

mod client;
mod error;
mod models;

pub use client::ApiClient;
pub use error::ApiError;
pub use models::{AccessToken, Credentials, ImportSummary, NewCategory};
