//! Handlers for CSV and ZIP exports.
//!
//! Every export answers with the same payload shape:
//!
//! ```json
//! {
//!   "content": "77u/5bqP6Jmf...",
//!   "filename": "sv-link-results_20240501_093000.csv",
//!   "mimetype": "text/csv;charset=utf-8;",
//!   "size": 412,
//!   "encoding": "base64"
//! }
//! ```

use axum::{Json, extract::State};

use crate::api::dto::export::{CsvExportRequest, QrArchiveRequest};
use crate::api::extract::JsonBody;
use crate::domain::entities::{ExportPayload, LookupResult, ShortenResult, UpdateResult};
use crate::error::AppError;
use crate::state::AppState;

/// `POST /api/export/csv`
///
/// Renders shorten results. `locale` is `"english"` (default) or `"native"`.
///
/// # Errors
///
/// Returns 400 Bad Request for an empty `results` array.
pub async fn export_csv_handler(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<CsvExportRequest<ShortenResult>>,
) -> Result<Json<ExportPayload>, AppError> {
    let export = state
        .export_service
        .csv(&payload.results, payload.locale)?;
    Ok(Json(export))
}

/// `POST /api/export/lookup-csv`
///
/// Renders lookup results.
pub async fn export_lookup_csv_handler(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<CsvExportRequest<LookupResult>>,
) -> Result<Json<ExportPayload>, AppError> {
    let export = state
        .export_service
        .csv(&payload.results, payload.locale)?;
    Ok(Json(export))
}

/// `POST /api/export/update-csv`
///
/// Renders update results.
pub async fn export_update_csv_handler(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<CsvExportRequest<UpdateResult>>,
) -> Result<Json<ExportPayload>, AppError> {
    let export = state
        .export_service
        .csv(&payload.results, payload.locale)?;
    Ok(Json(export))
}

/// Packs one QR SVG per successful shorten result into a ZIP archive.
///
/// # Endpoint
///
/// `POST /api/export/qr-zip`
///
/// # Request Body
///
/// ```json
/// {
///   "results": [{ "original": "https://example.com/a", "short": "https://sv.link/x1", "success": true }],
///   "naming": "slug",
///   "include_metadata": true
/// }
/// ```
///
/// # Errors
///
/// - 400 Bad Request if no result is successful
/// - 500 Internal Server Error if every image failed to render or the
///   archive could not be written
pub async fn export_qr_zip_handler(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<QrArchiveRequest>,
) -> Result<Json<ExportPayload>, AppError> {
    let export = state
        .export_service
        .qr_archive(&payload.results, payload.options())?;
    Ok(Json(export))
}
