//! Handlers for reverse lookup of short links.

use axum::{Json, extract::State, http::HeaderMap};
use validator::Validate;

use crate::api::dto::batch::{BatchResponse, LinksRequest};
use crate::api::extract::{JsonBody, resolve_api_key};
use crate::domain::entities::{LookupResult, ResolvedLink};
use crate::error::AppError;
use crate::state::AppState;

/// Returns visit count, target and creation time for each short link.
///
/// # Endpoint
///
/// `POST /api/lookup`
///
/// The provider listing is paged through once per request to build an
/// address index. Links missing from it come back with `"views": "NOT_FOUND"`
/// and `success: false`.
///
/// # Request Body
///
/// ```json
/// {
///   "api_key": "sv-...",
///   "links": ["https://sv.link/xyz", "https://sv.link/missing"]
/// }
/// ```
///
/// # Response
///
/// ```json
/// {
///   "results": [
///     { "link": "https://sv.link/xyz", "views": 10, "target": "https://a.com", "created": "2024-05-01T10:00:00Z", "success": true },
///     { "link": "https://sv.link/missing", "views": "NOT_FOUND", "target": "", "created": "", "success": false }
///   ],
///   "summary": { "total": 2, "success": 1, "failed": 1 }
/// }
/// ```
///
/// # Errors
///
/// Returns 400 Bad Request when the API key is missing, no link is given or
/// the list exceeds the batch size limit.
pub async fn lookup_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    JsonBody(payload): JsonBody<LinksRequest>,
) -> Result<Json<BatchResponse<LookupResult>>, AppError> {
    payload.validate()?;

    let ctx = state.context(resolve_api_key(&headers, payload.api_key.as_deref()));
    let results = state.batch_service.lookup(&ctx, &payload.links).await?;

    Ok(Json(results.into()))
}

/// Resolves short links to provider ids and full details.
///
/// # Endpoint
///
/// `POST /api/batch-lookup`
///
/// Same input as `/api/lookup`. The `linkId` in each record is what
/// `/api/batch-update` needs. A miss carries `"target": "NOT_FOUND"` and
/// `"linkId": null`.
///
/// # Response
///
/// ```json
/// {
///   "results": [
///     {
///       "link": "https://sv.link/xyz",
///       "linkId": "2f0c6c1e-...",
///       "target": "https://a.com",
///       "visit_count": 10,
///       "created_at": "2024-05-01T10:00:00Z",
///       "description": "",
///       "success": true
///     }
///   ],
///   "summary": { "total": 1, "success": 1, "failed": 0 }
/// }
/// ```
pub async fn batch_lookup_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    JsonBody(payload): JsonBody<LinksRequest>,
) -> Result<Json<BatchResponse<ResolvedLink>>, AppError> {
    payload.validate()?;

    let ctx = state.context(resolve_api_key(&headers, payload.api_key.as_deref()));
    let results = state.batch_service.resolve(&ctx, &payload.links).await?;

    Ok(Json(results.into()))
}
