//! DTOs for health check endpoint.

use serde::Serialize;

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub provider: ProviderInfo,
}

/// Provider the service is configured to talk to.
#[derive(Debug, Serialize)]
pub struct ProviderInfo {
    pub base_url: String,
    pub domain: String,
}
