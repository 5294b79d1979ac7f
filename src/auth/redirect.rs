//! Builds the log-in URL that sends users back to where they were after logging in.

use axum::{extract::Request, http::Uri};

use crate::endpoints;

/// Only local paths are followed, and never back into the auth pages.
fn is_safe_path(path_and_query: &str) -> bool {
    if !path_and_query.starts_with('/') || path_and_query.starts_with("//") {
        return false;
    }

    let path = path_and_query
        .split_once('?')
        .map_or(path_and_query, |(path, _)| path);

    ![endpoints::LOG_IN_VIEW, endpoints::REGISTER_VIEW, endpoints::LOG_OUT].contains(&path)
}

/// Reduce a user supplied redirect URL to a safe local path and query.
///
/// Returns `None` for absolute URLs and anything else that could leave the site.
pub fn normalize_redirect_url(raw_url: &str) -> Option<String> {
    let uri = raw_url.parse::<Uri>().ok()?;
    if uri.scheme().is_some() || uri.authority().is_some() {
        return None;
    }

    let path_and_query = uri.path_and_query()?.as_str();
    is_safe_path(path_and_query).then(|| path_and_query.to_owned())
}

/// The log-in page URL with `target` as the page to return to.
pub fn log_in_url_with_redirect(target: &str) -> String {
    match serde_urlencoded::to_string([("redirect_url", target)]) {
        Ok(query) => format!("{}?{query}", endpoints::LOG_IN_VIEW),
        Err(error) => {
            tracing::error!("Could not encode redirect URL {target}: {error}");
            endpoints::LOG_IN_VIEW.to_owned()
        }
    }
}

/// The page the user should come back to after logging in.
///
/// htmx requests to `/api` come from the page in the `HX-Current-URL` header,
/// everything else returns to the requested URL. Falls back to the dashboard.
fn return_target(request: &Request) -> String {
    let target = if request.uri().path().starts_with("/api") {
        request
            .headers()
            .get("hx-current-url")
            .and_then(|header| header.to_str().ok())
            .and_then(|current_url| current_url.parse::<Uri>().ok())
            .and_then(|uri| uri.path_and_query().map(|path| path.as_str().to_owned()))
    } else {
        request
            .uri()
            .path_and_query()
            .map(|path| path.as_str().to_owned())
    };

    match target.filter(|target| is_safe_path(target)) {
        Some(target) => target,
        None => {
            tracing::warn!(
                "No usable redirect target for {}, falling back to the dashboard.",
                request.uri()
            );
            endpoints::DASHBOARD_VIEW.to_owned()
        }
    }
}

/// The log-in URL for a request that was turned away by the auth guard.
pub fn build_log_in_redirect_url(request: &Request) -> String {
    log_in_url_with_redirect(&return_target(request))
}
