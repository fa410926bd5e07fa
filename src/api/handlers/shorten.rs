//! Handler for batch shortening endpoint.

use axum::{Json, extract::State, http::HeaderMap};
use validator::Validate;

use crate::api::dto::batch::{BatchResponse, ShortenRequest};
use crate::api::extract::{JsonBody, resolve_api_key};
use crate::domain::entities::ShortenResult;
use crate::error::AppError;
use crate::state::AppState;

/// Creates one short link per long URL.
///
/// # Endpoint
///
/// `POST /api/shorten`
///
/// # Batch Processing
///
/// URLs are sent to the provider one at a time, in order. Blank entries are
/// skipped. A failing URL produces a failure record with the reason in
/// `short`; the rest of the batch continues.
///
/// # Request Body
///
/// ```json
/// {
///   "api_key": "sv-...",
///   "urls": ["https://example.com/a", "https://example.com/b"]
/// }
/// ```
///
/// # Response
///
/// ```json
/// {
///   "results": [
///     { "original": "https://example.com/a", "short": "https://sv.link/x1", "success": true },
///     { "original": "https://example.com/b", "short": "HTTP 429: rate limit exceeded", "success": false }
///   ],
///   "summary": { "total": 2, "success": 1, "failed": 1 },
///   "message": "Batch complete: 1/2 URLs shortened"
/// }
/// ```
///
/// # Errors
///
/// Returns 400 Bad Request when the API key is missing, no URL is given or
/// the list exceeds the batch size limit.
pub async fn shorten_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    JsonBody(payload): JsonBody<ShortenRequest>,
) -> Result<Json<BatchResponse<ShortenResult>>, AppError> {
    payload.validate()?;

    let ctx = state.context(resolve_api_key(&headers, payload.api_key.as_deref()));
    let results = state.batch_service.shorten(&ctx, &payload.urls).await?;

    let summary = results.summary();
    let message = format!(
        "Batch complete: {}/{} URLs shortened",
        summary.success, summary.total
    );

    Ok(Json(BatchResponse::from(results).with_message(message)))
}
