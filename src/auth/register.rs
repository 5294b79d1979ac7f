//! The registration page for creating an account with the finance API.

use axum::{
    Form,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_extra::extract::PrivateCookieJar;
use axum_htmx::HxRedirect;
use maud::{Markup, html};
use serde::{Deserialize, Serialize};

use crate::{
    api::{ApiError, Credentials},
    auth::log_in::{LogInState, start_session},
    endpoints,
    html::{
        BUTTON_PRIMARY_STYLE, LINK_STYLE, base, log_in_register, password_input, submit_button,
        text_input,
    },
};

pub const PASSWORD_MISMATCH_ERROR_MSG: &str = "Passwords do not match";

/// Errors shown next to the field they belong to.
#[derive(Default)]
struct FormErrors<'a> {
    username: Option<&'a str>,
    password: Option<&'a str>,
    confirm_password: Option<&'a str>,
}

fn registration_form(username: &str, errors: FormErrors<'_>) -> Markup {
    html! {
        form
            hx-post=(endpoints::USERS)
            hx-indicator="#indicator"
            hx-disabled-elt="#username, #password, #confirm_password, #submit-button"
            class="space-y-4 md:space-y-6"
        {
            (text_input("username", "Username", username, username.is_empty()))

            @if let Some(error_message) = errors.username {
                p id="username-error" class="text-red-500 text-base" { (error_message) }
            }

            (password_input("password", "Password", errors.password))
            (password_input("confirm_password", "Confirm Password", errors.confirm_password))
            (submit_button("Create Account", BUTTON_PRIMARY_STYLE))

            p class="text-sm font-light text-gray-500 dark:text-gray-400"
            {
                "Already have an account? "
                a href=(endpoints::LOG_IN_VIEW) tabindex="0" class=(LINK_STYLE)
                {
                  "Log in here"
                }
            }
        }
    }
}

/// Display the registration page.
pub async fn get_register_page() -> Response {
    let registration_form = registration_form("", FormErrors::default());
    let content = log_in_register("Create an account", &registration_form);
    base("Register", &[], &content).into_response()
}

#[derive(Serialize, Deserialize)]
pub struct RegisterForm {
    pub username: String,
    pub password: String,
    pub confirm_password: String,
}

/// Create an account and log the new user in.
///
/// Invalid input and API rejections, e.g. a taken username, re-render the
/// form with the reason next to the relevant field.
pub async fn register_user(
    State(state): State<LogInState>,
    jar: PrivateCookieJar,
    Form(user_data): Form<RegisterForm>,
) -> Response {
    let username = user_data.username.trim();

    if username.is_empty() {
        return registration_form(
            username,
            FormErrors {
                username: Some("Enter a username."),
                ..Default::default()
            },
        )
        .into_response();
    }

    if user_data.password.is_empty() {
        return registration_form(
            username,
            FormErrors {
                password: Some("Enter a password."),
                ..Default::default()
            },
        )
        .into_response();
    }

    if user_data.password != user_data.confirm_password {
        return registration_form(
            username,
            FormErrors {
                confirm_password: Some(PASSWORD_MISMATCH_ERROR_MSG),
                ..Default::default()
            },
        )
        .into_response();
    }

    let credentials = Credentials {
        username: username.to_owned(),
        password: user_data.password,
    };

    match state.api.register(&credentials).await {
        Ok(()) => tracing::info!("Registered user {username}"),
        Err(ApiError::RequestFailed { detail, .. }) => {
            return registration_form(
                username,
                FormErrors {
                    username: Some(&detail),
                    ..Default::default()
                },
            )
            .into_response();
        }
        Err(error) => {
            tracing::error!("Could not register {username}: {error}");
            return registration_form(
                username,
                FormErrors {
                    username: Some("Could not reach the finance service. Please try again later."),
                    ..Default::default()
                },
            )
            .into_response();
        }
    }

    start_session(
        &state.api,
        jar,
        state.cookie_duration,
        credentials,
        endpoints::DASHBOARD_VIEW,
    )
    .await
    .unwrap_or_else(|error| {
        tracing::error!("Could not log in newly registered user {username}: {error}");
        (
            HxRedirect(endpoints::LOG_IN_VIEW.to_owned()),
            StatusCode::SEE_OTHER,
        )
            .into_response()
    })
}
