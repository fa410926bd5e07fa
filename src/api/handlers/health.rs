//! Handler for health check endpoint.

use axum::{Json, extract::State};

use crate::api::dto::health::{HealthResponse, ProviderInfo};
use crate::state::AppState;

/// Reports liveness and the configured provider.
///
/// # Endpoint
///
/// `GET /health`
///
/// The provider is not contacted; without the caller's API key there is
/// nothing meaningful to check upstream.
///
/// # Response
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "provider": {
///     "base_url": "https://sv.link/api/v2",
///     "domain": "sv.link"
///   }
/// }
/// ```
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        provider: ProviderInfo {
            base_url: state.settings.base_url.clone(),
            domain: state.settings.domain.clone(),
        },
    })
}
