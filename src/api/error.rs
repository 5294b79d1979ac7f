use axum::http::StatusCode;

/// The ways a call to the finance API can fail.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ApiError {
    /// The API rejected the access token, e.g. because it expired.
    ///
    /// The session should be discarded and the user asked to log in again.
    #[error("the access token was rejected")]
    Unauthorized,

    /// The API answered with a non-success status other than 401.
    ///
    /// `detail` is the message from the response body, or the status reason
    /// if the body did not have one.
    #[error("request failed with status {status}: {detail}")]
    RequestFailed { status: StatusCode, detail: String },

    /// The request could not be sent or no response was received.
    #[error("could not reach the finance API: {0}")]
    Transport(String),

    /// A success response did not have the expected shape.
    #[error("could not decode the response from the finance API: {0}")]
    Decode(String),

    /// The configured base URL cannot have paths appended to it.
    #[error("invalid finance API URL \"{0}\"")]
    InvalidUrl(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_decode() {
            ApiError::Decode(error.to_string())
        } else {
            ApiError::Transport(error.to_string())
        }
    }
}
