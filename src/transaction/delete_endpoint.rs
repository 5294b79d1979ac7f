use axum::{
    Extension,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_htmx::HX_TRIGGER;

use crate::{Error, api::ApiClient, auth::Session, transaction::core::TransactionId};

/// The htmx event sent after the user's transactions change, so that pages
/// showing totals can refresh themselves.
pub const TRANSACTIONS_CHANGED_EVENT: &str = "transactions-changed";

/// A route handler for deleting a transaction.
///
/// Responds with an empty body so htmx removes the table row, or with an alert on failure.
pub async fn delete_transaction_endpoint(
    State(api): State<ApiClient>,
    Extension(session): Extension<Session>,
    Path(transaction_id): Path<TransactionId>,
) -> Response {
    match api
        .delete_transaction(&session.access_token, transaction_id)
        .await
    {
        // The status code has to be 200 OK or htmx will not delete the table row.
        Ok(()) => (StatusCode::OK, [(HX_TRIGGER, TRANSACTIONS_CHANGED_EVENT)]).into_response(),
        Err(error) => {
            tracing::error!("Could not delete transaction {transaction_id}: {error}");
            Error::from(error).into_alert_response()
        }
    }
}
