//! Handler for QR previews.

use axum::{Json, extract::State};

use crate::api::dto::export::{QrGalleryRequest, QrGalleryResponse};
use crate::api::extract::JsonBody;
use crate::error::AppError;
use crate::state::AppState;

/// Returns the QR SVGs as JSON so the browser can preview them.
///
/// # Endpoint
///
/// `POST /api/qr/generate`
///
/// # Response
///
/// ```json
/// {
///   "qr_codes": [
///     {
///       "index": 1,
///       "filename": "qrcode_001.svg",
///       "svg_content": "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<svg ...",
///       "short_url": "https://sv.link/x1",
///       "original_url": "https://example.com/a"
///     }
///   ],
///   "total": 1
/// }
/// ```
///
/// # Errors
///
/// Returns 400 Bad Request if no result is successful.
pub async fn qr_generate_handler(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<QrGalleryRequest>,
) -> Result<Json<QrGalleryResponse>, AppError> {
    let qr_codes = state
        .export_service
        .qr_gallery(&payload.results, payload.naming)?;

    Ok(Json(QrGalleryResponse {
        total: qr_codes.len(),
        qr_codes,
    }))
}
