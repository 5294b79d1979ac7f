//! This file defines the routes for displaying the log-in page and handling log-in requests.
//! The finance API checks the credentials, this module keeps the token it hands back.

use axum::{
    Form,
    extract::{FromRef, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_extra::extract::{PrivateCookieJar, cookie::Key};
use axum_htmx::HxRedirect;
use maud::{Markup, html};
use serde::{Deserialize, Serialize};
use time::Duration;

use crate::{
    AppState,
    api::{ApiClient, ApiError, Credentials},
    auth::{Session, normalize_redirect_url, set_session_cookie},
    endpoints,
    html::{
        BUTTON_PRIMARY_STYLE, LINK_STYLE, base, log_in_register, password_input, submit_button,
        text_input,
    },
};

fn log_in_form(username: &str, error_message: Option<&str>, redirect_url: Option<&str>) -> Markup {
    html! {
        form
            hx-post=(endpoints::LOG_IN_API)
            hx-indicator="#indicator"
            hx-disabled-elt="#username, #password, #submit-button"
            class="space-y-4 md:space-y-6"
        {
            @if let Some(redirect_url) = redirect_url {
                input type="hidden" name="redirect_url" value=(redirect_url);
            }

            (text_input("username", "Username", username, username.is_empty()))
            (password_input("password", "Password", error_message))
            (submit_button("Log in", BUTTON_PRIMARY_STYLE))

            p class="text-sm font-light text-gray-500 dark:text-gray-400" {
                "Don't have an account? "
                a href=(endpoints::REGISTER_VIEW) tabindex="0" class=(LINK_STYLE)
                {
                  "Register here"
                }
            }
        }
    }
}

fn parse_redirect_url(raw_url: Option<&str>, source: &str) -> Option<String> {
    let raw_url = raw_url?;
    let redirect_url = normalize_redirect_url(raw_url);
    if redirect_url.is_none() {
        tracing::warn!("Invalid redirect URL from {source}: {raw_url}");
    }

    redirect_url
}

#[derive(Deserialize)]
pub struct RedirectQuery {
    pub redirect_url: Option<String>,
}

/// Display the log-in page.
pub async fn get_log_in_page(Query(query): Query<RedirectQuery>) -> Response {
    let redirect_url = parse_redirect_url(query.redirect_url.as_deref(), "log-in query");
    let log_in_form = log_in_form("", None, redirect_url.as_deref());
    let content = log_in_register("Log in to your account", &log_in_form);
    base("Log In", &[], &content).into_response()
}

/// The state needed to perform a login.
#[derive(Debug, Clone)]
pub struct LogInState {
    /// The key to be used for signing and encrypting private cookies.
    pub cookie_key: Key,
    /// The duration for which the session cookie is valid.
    pub cookie_duration: Duration,
    pub api: ApiClient,
}

impl FromRef<AppState> for LogInState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            cookie_key: state.cookie_key.clone(),
            cookie_duration: state.cookie_duration,
            api: state.api.clone(),
        }
    }
}

// this impl tells `PrivateCookieJar` how to access the key from our state
impl FromRef<LogInState> for Key {
    fn from_ref(state: &LogInState) -> Self {
        state.cookie_key.clone()
    }
}

pub const MISSING_CREDENTIALS_ERROR_MSG: &str = "Enter your username and password.";
pub const SERVICE_UNAVAILABLE_ERROR_MSG: &str =
    "Could not reach the finance service. Please try again later.";

/// The raw data entered by the user in the log-in form.
#[derive(Clone, Serialize, Deserialize)]
pub struct LogInData {
    pub username: String,
    pub password: String,

    /// Optional URL to redirect to after logging in.
    /// Only accepted from the log-in form submission.
    pub redirect_url: Option<String>,
}

/// Exchange `credentials` for a token and store it in the session cookie.
///
/// On success the client is redirected to `redirect_url`.
pub(super) async fn start_session(
    api: &ApiClient,
    jar: PrivateCookieJar,
    cookie_duration: Duration,
    credentials: Credentials,
    redirect_url: &str,
) -> Result<Response, ApiError> {
    let token = api.log_in(&credentials).await?;
    let session = Session::new(token.access_token, credentials.username, cookie_duration);

    tracing::info!("User {} logged in", session.username);

    Ok(match set_session_cookie(jar, &session) {
        Ok(jar) => (
            StatusCode::SEE_OTHER,
            HxRedirect(redirect_url.to_owned()),
            jar,
        )
            .into_response(),
        Err(error) => {
            tracing::error!("Error setting session cookie: {error}");
            (
                HxRedirect(endpoints::INTERNAL_ERROR_VIEW.to_owned()),
                StatusCode::INTERNAL_SERVER_ERROR,
            )
                .into_response()
        }
    })
}

/// Handler for log-in requests via the POST method.
///
/// On a successful log-in request, the session cookie is set and the client is redirected to the dashboard page.
/// Otherwise, the form is returned with an error message explaining the problem.
pub async fn post_log_in(
    State(state): State<LogInState>,
    jar: PrivateCookieJar,
    Form(user_data): Form<LogInData>,
) -> Response {
    let redirect_url = parse_redirect_url(user_data.redirect_url.as_deref(), "log-in form");
    let redirect_url = redirect_url.as_deref();
    let username = user_data.username.trim();

    if username.is_empty() || user_data.password.is_empty() {
        return log_in_form(username, Some(MISSING_CREDENTIALS_ERROR_MSG), redirect_url)
            .into_response();
    }

    let credentials = Credentials {
        username: username.to_owned(),
        password: user_data.password,
    };

    match start_session(
        &state.api,
        jar,
        state.cookie_duration,
        credentials,
        redirect_url.unwrap_or(endpoints::DASHBOARD_VIEW),
    )
    .await
    {
        Ok(response) => response,
        Err(ApiError::RequestFailed { detail, .. }) => {
            log_in_form(username, Some(&detail), redirect_url).into_response()
        }
        Err(error) => {
            tracing::error!("Could not log in {username}: {error}");
            let message = match error {
                ApiError::Transport(_) => SERVICE_UNAVAILABLE_ERROR_MSG,
                _ => "An internal error occurred. Please try again later.",
            };
            log_in_form(username, Some(message), redirect_url).into_response()
        }
    }
}
