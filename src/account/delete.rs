//! Account deletion endpoint.

use axum::{
    Extension,
    extract::{FromRef, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_extra::extract::{PrivateCookieJar, Query, cookie::Key};
use axum_htmx::HxRedirect;
use serde::Deserialize;

use crate::{
    AppState, Error, api::ApiClient, auth::Session, auth::invalidate_session_cookie, endpoints,
};

/// The state needed to delete an account.
#[derive(Debug, Clone)]
pub struct DeleteAccountState {
    pub cookie_key: Key,
    pub api: ApiClient,
}

impl FromRef<AppState> for DeleteAccountState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            cookie_key: state.cookie_key.clone(),
            api: state.api.clone(),
        }
    }
}

impl FromRef<DeleteAccountState> for Key {
    fn from_ref(state: &DeleteAccountState) -> Self {
        state.cookie_key.clone()
    }
}

/// The confirmation typed by the user. htmx sends it in the query string of the DELETE request.
#[derive(Debug, Deserialize)]
pub struct DeleteAccountForm {
    #[serde(default)]
    pub confirm_username: Option<String>,
}

/// A route handler that deletes the user's account once they have typed their username.
///
/// On success the session cookie is cleared and the client is sent to the register page.
pub async fn delete_account_endpoint(
    State(state): State<DeleteAccountState>,
    Extension(session): Extension<Session>,
    jar: PrivateCookieJar,
    Query(form): Query<DeleteAccountForm>,
) -> Response {
    let confirmed = form
        .confirm_username
        .is_some_and(|username| username.trim() == session.username);

    if !confirmed {
        return Error::UsernameMismatch.into_alert_response();
    }

    if let Err(error) = state.api.delete_account(&session.access_token).await {
        tracing::error!("Could not delete the account of {}: {error}", session.username);
        return Error::from(error).into_alert_response();
    }

    tracing::info!("Deleted the account of {}", session.username);

    (
        invalidate_session_cookie(jar),
        HxRedirect(endpoints::REGISTER_VIEW.to_owned()),
        StatusCode::SEE_OTHER,
    )
        .into_response()
}
