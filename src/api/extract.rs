//! Request helpers shared by the batch handlers.

use axum::extract::FromRequest;
use axum::http::HeaderMap;

use crate::error::AppError;
use crate::infrastructure::provider::API_KEY_HEADER;

/// JSON request body whose rejections render as the API's error envelope.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct JsonBody<T>(pub T);

/// Picks the provider API key for a request.
///
/// A non-blank `api_key` in the body wins over the `X-API-Key` header. An
/// empty string is returned when neither is present; the batch service
/// rejects it as a missing credential.
pub fn resolve_api_key(headers: &HeaderMap, body_key: Option<&str>) -> String {
    body_key
        .map(str::trim)
        .filter(|key| !key.is_empty())
        .or_else(|| {
            headers
                .get(API_KEY_HEADER)
                .and_then(|value| value.to_str().ok())
                .map(str::trim)
                .filter(|key| !key.is_empty())
        })
        .unwrap_or_default()
        .to_string()
}
