//! Mapping of HTTP failures onto the error taxonomy.

use gametl_core::GametlError;
use reqwest::StatusCode;

/// Rejected credentials become `Auth`; every other failure is `Connection`.
///
/// `context` prefixes the status, e.g. `Failed to fetch models: 404 Not Found`.
pub(crate) fn map_status_error(context: &str, status: StatusCode, body: &str) -> GametlError {
    if !body.is_empty() {
        tracing::debug!("{} ({}): {}", context, status, body);
    }

    let message = format!("{}: {}", context, status);
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => GametlError::auth(message),
        _ => GametlError::connection(message),
    }
}

pub(crate) fn map_transport_error(err: reqwest::Error) -> GametlError {
    GametlError::connection(err.to_string())
}

pub(crate) fn endpoint(base_url: &str, path: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), path)
}
