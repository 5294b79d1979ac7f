//! Category deletion endpoint.

use axum::{
    Extension,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_extra::extract::Query;
use axum_htmx::HX_TRIGGER;

use crate::{
    Error,
    api::ApiClient,
    auth::Session,
    category::{CategoryName, domain::CategoryForm},
    transaction::TRANSACTIONS_CHANGED_EVENT,
};

/// Handle category deletion, e.g. `DELETE /api/categories?type=expense&name=餐飲`.
///
/// The finance API reclassifies the category's transactions, so the response
/// also triggers [TRANSACTIONS_CHANGED_EVENT].
pub async fn delete_category_endpoint(
    State(api): State<ApiClient>,
    Extension(session): Extension<Session>,
    Query(category): Query<CategoryForm>,
) -> Response {
    let name = match CategoryName::new(&category.name) {
        Ok(name) => name,
        Err(error) => return error.into_alert_response(),
    };

    match api
        .delete_category(&session.access_token, category.type_, name.as_ref())
        .await
    {
        // The status code has to be 200 OK or htmx will not delete the table row.
        Ok(()) => (StatusCode::OK, [(HX_TRIGGER, TRANSACTIONS_CHANGED_EVENT)]).into_response(),
        Err(error) => {
            tracing::error!("Could not delete {} category {name}: {error}", category.type_);
            Error::from(error).into_alert_response()
        }
    }
}
