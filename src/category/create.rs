//! Category creation endpoint.

use axum::{
    Extension,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_extra::extract::Form;
use axum_htmx::HxRedirect;

use crate::{
    Error,
    api::{ApiClient, NewCategory},
    auth::Session,
    category::{CategoryName, domain::CategoryForm},
    endpoints,
};

/// Handle the new category form, redirecting back to the categories page on success.
///
/// Blank names and names the user already has for the chosen type are
/// rejected without calling the finance API.
pub async fn create_category_endpoint(
    State(api): State<ApiClient>,
    Extension(session): Extension<Session>,
    Form(form): Form<CategoryForm>,
) -> Response {
    let name = match CategoryName::new(&form.name) {
        Ok(name) => name,
        Err(error) => return error.into_alert_response(),
    };

    let existing = match api.list_categories(&session.access_token).await {
        Ok(categories) => categories,
        Err(error) => {
            tracing::error!("Could not fetch categories: {error}");
            return Error::from(error).into_alert_response();
        }
    };

    if existing.contains(form.type_, name.as_ref()) {
        return Error::DuplicateCategory(name.to_string()).into_alert_response();
    }

    let category = NewCategory {
        name: name.to_string(),
        type_: form.type_,
    };

    if let Err(error) = api.create_category(&session.access_token, &category).await {
        tracing::error!("Could not create category {name}: {error}");
        return Error::from(error).into_alert_response();
    }

    (
        HxRedirect(endpoints::CATEGORIES_VIEW.to_owned()),
        StatusCode::SEE_OTHER,
    )
        .into_response()
}
