//! Defines the app level error type and conversions to rendered HTML pages and alerts.
use axum::{
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use axum_htmx::HxRedirect;

use crate::{
    alert::Alert,
    api::ApiError,
    endpoints,
    internal_server_error::{InternalServerError, bad_gateway_response},
    not_found::get_404_not_found_response,
};

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The finance API rejected the session's access token.
    #[error("the session's access token was rejected")]
    Unauthorized,

    /// The session cookie is missing or could not be decrypted.
    #[error("no session cookie in the cookie jar")]
    CookieMissing,

    /// The session cookie is present but past its expiry time.
    #[error("the session has expired")]
    SessionExpired,

    /// The finance API answered with an error status.
    #[error("the finance API responded with {status}: {detail}")]
    ApiRequestFailed { status: StatusCode, detail: String },

    /// The finance API could not be reached.
    #[error("could not reach the finance API: {0}")]
    ApiUnavailable(String),

    /// The finance API sent a response that could not be decoded.
    #[error("unexpected response from the finance API: {0}")]
    InvalidApiResponse(String),

    /// The configured finance API URL is not usable.
    #[error("invalid finance API URL: {0}")]
    InvalidApiUrl(String),

    /// A transaction description was blank.
    #[error("Description cannot be empty")]
    EmptyDescription,

    /// A transaction amount was not a finite number greater than zero.
    #[error("{0} is not a valid amount")]
    InvalidAmount(f64),

    /// A transaction was submitted without a category.
    #[error("Category cannot be empty")]
    EmptyCategory,

    /// An empty string was used to create a category name.
    #[error("Category name cannot be empty")]
    EmptyCategoryName,

    /// The category already exists for the chosen transaction type.
    #[error("the category \"{0}\" already exists")]
    DuplicateCategory(String),

    /// The confirmation typed when deleting an account did not match the username.
    #[error("the confirmation does not match the username")]
    UsernameMismatch,

    /// The multipart form could not be parsed.
    #[error("Could not parse multipart form: {0}")]
    MultipartError(String),

    /// The multipart form did not contain a JSON file.
    #[error("File is not a JSON file")]
    NotJSON,

    /// The uploaded file is JSON but not a Stashup backup.
    #[error("invalid backup file: {0}")]
    InvalidImportData(String),

    /// The requested resource was not found.
    ///
    /// For HTTP request handlers, the client should check that the parameters
    /// (e.g., ID) are correct and that the resource has been created.
    #[error("the requested resource could not be found")]
    NotFound,

    /// An error occurred while getting the local timezone from a canonical timezone string.
    #[error("invalid timezone {0}")]
    InvalidTimezoneError(String),

    /// An error occurred while serializing a struct as JSON
    #[error("could not serialize as JSON: {0}")]
    JSONSerializationError(String),

    /// An error occurred while writing transactions as CSV.
    #[error("could not write CSV: {0}")]
    CSVExportError(String),
}

impl From<ApiError> for Error {
    fn from(error: ApiError) -> Self {
        match error {
            ApiError::Unauthorized => Error::Unauthorized,
            ApiError::RequestFailed { status, detail } => Error::ApiRequestFailed { status, detail },
            ApiError::Transport(message) => Error::ApiUnavailable(message),
            ApiError::Decode(message) => Error::InvalidApiResponse(message),
            ApiError::InvalidUrl(url) => Error::InvalidApiUrl(url),
        }
    }
}

impl Error {
    /// Whether the user must log in again to recover from this error.
    fn requires_log_in(&self) -> bool {
        matches!(
            self,
            Error::Unauthorized | Error::CookieMissing | Error::SessionExpired
        )
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        if self.requires_log_in() {
            return Redirect::to(endpoints::LOG_OUT).into_response();
        }

        match self {
            Error::NotFound => get_404_not_found_response(),
            Error::ApiRequestFailed { status, .. } if status == StatusCode::NOT_FOUND => {
                get_404_not_found_response()
            }
            Error::ApiUnavailable(_) | Error::InvalidApiResponse(_) => bad_gateway_response(),
            Error::ApiRequestFailed { status, ref detail } if status.is_server_error() => {
                tracing::error!("The finance API failed with {status}: {detail}");
                bad_gateway_response()
            }
            Error::InvalidTimezoneError(timezone) => InternalServerError {
                description: "Invalid Timezone Settings",
                fix: &format!(
                    "Could not get local timezone \"{timezone}\". Check your server settings and \
                    ensure the timezone has been set to valid, canonical timezone string"
                ),
            }
            .into_response(),
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                InternalServerError::default().into_response()
            }
        }
    }
}

impl Error {
    /// Convert the error into an alert fragment for htmx requests.
    ///
    /// Errors that need a new session redirect the client to log out instead.
    pub fn into_alert_response(self) -> Response {
        if self.requires_log_in() {
            return (HxRedirect(endpoints::LOG_OUT.to_owned()), StatusCode::OK).into_response();
        }

        let (status, alert) = match self {
            Error::EmptyDescription => (
                StatusCode::BAD_REQUEST,
                Alert::Error {
                    message: "Invalid transaction".to_owned(),
                    details: "Enter a description for the transaction.".to_owned(),
                },
            ),
            Error::InvalidAmount(amount) => (
                StatusCode::BAD_REQUEST,
                Alert::Error {
                    message: "Invalid transaction".to_owned(),
                    details: format!("The amount must be a number greater than zero, got {amount}."),
                },
            ),
            Error::EmptyCategory => (
                StatusCode::BAD_REQUEST,
                Alert::Error {
                    message: "Invalid transaction".to_owned(),
                    details: "Choose a category for the transaction.".to_owned(),
                },
            ),
            Error::EmptyCategoryName => (
                StatusCode::BAD_REQUEST,
                Alert::ErrorSimple {
                    message: "Enter a category name.".to_owned(),
                },
            ),
            Error::DuplicateCategory(name) => (
                StatusCode::BAD_REQUEST,
                Alert::Error {
                    message: "Duplicate category".to_owned(),
                    details: format!("The category \"{name}\" already exists."),
                },
            ),
            Error::UsernameMismatch => (
                StatusCode::BAD_REQUEST,
                Alert::Error {
                    message: "Could not delete account".to_owned(),
                    details: "Type your username exactly to confirm deleting your account."
                        .to_owned(),
                },
            ),
            Error::MultipartError(_) | Error::NotJSON => (
                StatusCode::BAD_REQUEST,
                Alert::Error {
                    message: "Could not import data".to_owned(),
                    details: "Choose a JSON file exported from Stashup.".to_owned(),
                },
            ),
            Error::InvalidImportData(reason) => (
                StatusCode::BAD_REQUEST,
                Alert::Error {
                    message: "Could not import data".to_owned(),
                    details: reason,
                },
            ),
            Error::NotFound => (
                StatusCode::NOT_FOUND,
                Alert::Error {
                    message: "Not found".to_owned(),
                    details: "The item could not be found. \
                        Try refreshing the page to see if it has already been deleted."
                        .to_owned(),
                },
            ),
            Error::ApiRequestFailed { status, detail } if status == StatusCode::NOT_FOUND => (
                StatusCode::NOT_FOUND,
                Alert::Error {
                    message: "Not found".to_owned(),
                    details: detail,
                },
            ),
            Error::ApiRequestFailed { status, detail } if status.is_client_error() => (
                StatusCode::BAD_REQUEST,
                Alert::Error {
                    message: "Request rejected".to_owned(),
                    details: detail,
                },
            ),
            Error::ApiRequestFailed { detail, .. } => (
                StatusCode::BAD_GATEWAY,
                Alert::Error {
                    message: "The finance service failed".to_owned(),
                    details: detail,
                },
            ),
            Error::ApiUnavailable(_) | Error::InvalidApiResponse(_) => (
                StatusCode::BAD_GATEWAY,
                Alert::Error {
                    message: "The finance service is unavailable".to_owned(),
                    details: "Try again in a moment.".to_owned(),
                },
            ),
            Error::InvalidTimezoneError(timezone) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Alert::Error {
                    message: "Invalid Timezone Settings".to_owned(),
                    details: format!(
                        "Could not get local timezone \"{timezone}\". Check your server settings and \
                        ensure the timezone has been set to valid, canonical timezone string"
                    ),
                },
            ),
            error => {
                tracing::error!("An unexpected error occurred: {error}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Alert::Error {
                        message: "Something went wrong".to_owned(),
                        details: "An unexpected error occurred, check the server logs for more details."
                            .to_owned(),
                    },
                )
            }
        };

        alert.into_response_with_status(status)
    }
}
