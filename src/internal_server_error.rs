//! The page to display for an internal server error, and for a finance API
//! that cannot be reached.
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::html::error_view;

pub struct InternalServerError<'a> {
    pub description: &'a str,
    pub fix: &'a str,
}

impl Default for InternalServerError<'_> {
    fn default() -> Self {
        Self {
            description: "Sorry, something went wrong.",
            fix: "Try again later or check the server logs",
        }
    }
}

impl IntoResponse for InternalServerError<'_> {
    fn into_response(self) -> Response {
        let page = error_view("Internal Server Error", "500", self.description, self.fix);

        (StatusCode::INTERNAL_SERVER_ERROR, page).into_response()
    }
}

/// The finance API could not be reached or sent something unexpected.
pub fn bad_gateway_response() -> Response {
    let page = error_view(
        "Service Unavailable",
        "502",
        "Your data could not be loaded.",
        "The finance service did not respond properly. Try again in a moment.",
    );

    (StatusCode::BAD_GATEWAY, page).into_response()
}

pub async fn get_internal_server_error_page() -> Response {
    InternalServerError::default().into_response()
}
