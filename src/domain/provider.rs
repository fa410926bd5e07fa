//! Contract of the remote shortening provider.

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use crate::domain::context::BatchContext;
use crate::domain::errors::{ItemError, TransportError};

/// Raw status and body of one provider call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderResponse {
    pub status: u16,
    pub body: String,
}

impl ProviderResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Parses the body as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`ItemError::Encoding`] when the body is not valid JSON for `T`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, ItemError> {
        serde_json::from_str(&self.body).map_err(|e| ItemError::encoding(e.to_string()))
    }
}

/// Thin request/response mapping onto the provider's HTTP surface.
///
/// One attempt per call, bounded by the context timeout. Transport failures
/// come back as [`TransportError`] with a structured kind; any HTTP status,
/// including errors, comes back as a [`ProviderResponse`].
///
/// # Implementations
///
/// - [`crate::infrastructure::provider::SvLinkClient`] - reqwest-based client
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkProvider: Send + Sync {
    /// `POST /links` with `{target, domain}`.
    async fn create(
        &self,
        ctx: &BatchContext,
        target: &str,
    ) -> Result<ProviderResponse, TransportError>;

    /// `GET /links?limit=&skip=`.
    async fn list(
        &self,
        ctx: &BatchContext,
        skip: usize,
        limit: usize,
    ) -> Result<ProviderResponse, TransportError>;

    /// `PATCH /links/{id}` with `{target, address}`.
    async fn patch(
        &self,
        ctx: &BatchContext,
        id: &str,
        target: &str,
        address: Option<String>,
    ) -> Result<ProviderResponse, TransportError>;
}
