//! Handler for batch target updates.

use axum::{Json, extract::State, http::HeaderMap};
use validator::Validate;

use crate::api::dto::batch::{BatchResponse, UpdateRequest};
use crate::api::extract::{JsonBody, resolve_api_key};
use crate::domain::entities::UpdateResult;
use crate::error::AppError;
use crate::state::AppState;

/// Points existing short links at new targets.
///
/// # Endpoint
///
/// `POST /api/batch-update`
///
/// # Request Body
///
/// ```json
/// {
///   "api_key": "sv-...",
///   "changes": [
///     { "linkId": "2f0c6c1e-...", "shortUrl": "https://sv.link/xyz", "newTarget": "https://new.example.com" }
///   ]
/// }
/// ```
///
/// # Response
///
/// ```json
/// {
///   "results": [
///     { "shortUrl": "https://sv.link/xyz", "newTarget": "https://new.example.com", "success": true, "message": "Updated" }
///   ],
///   "summary": { "total": 1, "success": 1, "failed": 0 }
/// }
/// ```
///
/// A change without `linkId` or `newTarget` fails with
/// `"error": "Missing required parameter"`; a provider rejection carries the
/// provider's message, or `HTTP <status>`.
pub async fn batch_update_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    JsonBody(payload): JsonBody<UpdateRequest>,
) -> Result<Json<BatchResponse<UpdateResult>>, AppError> {
    payload.validate()?;

    let ctx = state.context(resolve_api_key(&headers, payload.api_key.as_deref()));
    let results = state.batch_service.update(&ctx, &payload.changes).await?;

    Ok(Json(results.into()))
}
