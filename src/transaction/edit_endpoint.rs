//! Defines the endpoint for replacing an existing transaction.

use axum::{
    Extension,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_extra::extract::Form;
use axum_htmx::HxRedirect;

use crate::{
    Error,
    api::ApiClient,
    auth::Session,
    endpoints,
    transaction::{core::TransactionId, form::TransactionForm},
};

/// A route handler for updating a transaction, redirects to the dashboard on success.
pub async fn edit_transaction_endpoint(
    State(api): State<ApiClient>,
    Extension(session): Extension<Session>,
    Path(transaction_id): Path<TransactionId>,
    Form(form): Form<TransactionForm>,
) -> Response {
    let transaction = match form.validate() {
        Ok(transaction) => transaction,
        Err(error) => return error.into_alert_response(),
    };

    if let Err(error) = api
        .update_transaction(&session.access_token, transaction_id, &transaction)
        .await
    {
        tracing::error!("Could not update transaction {transaction_id}: {error}");
        return Error::from(error).into_alert_response();
    }

    (
        HxRedirect(endpoints::DASHBOARD_VIEW.to_owned()),
        StatusCode::SEE_OTHER,
    )
        .into_response()
}
