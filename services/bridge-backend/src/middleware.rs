use axum::response::{IntoResponse, Response};
use std::sync::Arc;

use crate::error::Error;

/// Response mapper for the errors raised by handlers.
///
/// A response carrying an [`Error`] in its extensions is logged, and replaced by the
/// standardized error response (the error's status and a `{"detail": ...}` body). The error
/// stays in the extensions of the new response. Other responses go through untouched.
///
/// To be installed with `axum::middleware::map_response(map_error)`.
pub async fn map_error(resp: Response) -> Response {
    let Some(err) = resp.extensions().get::<Arc<Error>>().cloned() else {
        return resp;
    };

    let data = serde_json::to_value(err.as_ref()).ok();
    if err.status().is_server_error() {
        tracing::warn!(kind = err.kind(), error = %err, ?data, "request failed");
    } else {
        tracing::debug!(kind = err.kind(), error = %err, ?data, "request failed");
    }

    let mut error_resp = err.standardize().into_response();
    error_resp.extensions_mut().insert(err);
    error_resp
}
