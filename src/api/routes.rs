//! API route configuration.
//!
//! Every endpoint takes the caller's provider API key with the request;
//! the service itself holds no credentials.

use crate::api::handlers::{
    batch_lookup_handler, batch_update_handler, export_csv_handler, export_lookup_csv_handler,
    export_qr_zip_handler, export_update_csv_handler, lookup_handler, method_fallback,
    qr_generate_handler, shorten_handler,
};
use crate::state::AppState;
use axum::{Router, routing::post};

/// All API routes, mounted under `/api`.
///
/// # Endpoints
///
/// - `POST /shorten`            - Shorten a list of URLs
/// - `POST /lookup`             - Visit counts and targets of short links
/// - `POST /batch-lookup`       - Provider ids and details of short links
/// - `POST /batch-update`       - Change targets of existing links
/// - `POST /export/csv`         - Shorten results as CSV
/// - `POST /export/lookup-csv`  - Lookup results as CSV
/// - `POST /export/update-csv`  - Update results as CSV
/// - `POST /export/qr-zip`      - QR SVGs of shorten results as ZIP
/// - `POST /qr/generate`        - QR SVGs of shorten results as JSON
///
/// Any other method on these paths gets a JSON 405, except `OPTIONS`
/// which gets an empty 200.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/shorten", post(shorten_handler))
        .route("/lookup", post(lookup_handler))
        .route("/batch-lookup", post(batch_lookup_handler))
        .route("/batch-update", post(batch_update_handler))
        .route("/export/csv", post(export_csv_handler))
        .route("/export/lookup-csv", post(export_lookup_csv_handler))
        .route("/export/update-csv", post(export_update_csv_handler))
        .route("/export/qr-zip", post(export_qr_zip_handler))
        .route("/qr/generate", post(qr_generate_handler))
        .method_not_allowed_fallback(method_fallback)
}
