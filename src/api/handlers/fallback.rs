//! Response for requests using a method a route does not serve.

use axum::http::{Method, StatusCode};
use axum::response::{IntoResponse, Response};
use serde_json::json;

use crate::error::AppError;

/// Empty 200 for `OPTIONS`, JSON 405 for anything else.
///
/// Behind the CORS layer `OPTIONS` never gets this far; routers mounted
/// without it still answer it the same way.
pub async fn method_fallback(method: Method) -> Response {
    if method == Method::OPTIONS {
        return StatusCode::OK.into_response();
    }

    AppError::method_not_allowed(
        "Method not allowed",
        json!({ "method": method.as_str() }),
    )
    .into_response()
}
