//! reqwest-backed client for the sv.link v2 API.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, redirect};
use serde_json::json;
use tracing::debug;

use crate::domain::context::BatchContext;
use crate::domain::errors::{TransportError, TransportErrorKind};
use crate::domain::provider::{LinkProvider, ProviderResponse};

/// Header carrying the caller's provider API key.
pub const API_KEY_HEADER: &str = "X-API-Key";

/// HTTP client for the provider's `/links` resource.
///
/// Holds a single connection pool; the per-call timeout and API key come
/// from the [`BatchContext`] of each request.
#[derive(Debug, Clone)]
pub struct SvLinkClient {
    http: Client,
}

impl SvLinkClient {
    /// Builds a client that never follows redirects.
    ///
    /// # Errors
    ///
    /// Returns an error if the TLS backend cannot be initialised.
    pub fn new(user_agent: &str) -> Result<Self, reqwest::Error> {
        let http = Client::builder()
            .user_agent(user_agent)
            .redirect(redirect::Policy::none())
            .build()?;

        Ok(Self { http })
    }

    fn links_url(ctx: &BatchContext) -> String {
        format!("{}/links", ctx.settings.base_url.trim_end_matches('/'))
    }

    fn authorized(&self, ctx: &BatchContext, request: RequestBuilder) -> RequestBuilder {
        request
            .header(API_KEY_HEADER, ctx.api_key())
            .timeout(ctx.settings.timeout)
    }

    async fn send(&self, request: RequestBuilder) -> Result<ProviderResponse, TransportError> {
        let response = request.send().await.map_err(classify)?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(classify)?;

        debug!(status, bytes = body.len(), "Provider responded");

        Ok(ProviderResponse::new(status, body))
    }
}

#[async_trait]
impl LinkProvider for SvLinkClient {
    async fn create(
        &self,
        ctx: &BatchContext,
        target: &str,
    ) -> Result<ProviderResponse, TransportError> {
        let request = self.http.post(Self::links_url(ctx)).json(&json!({
            "target": target,
            "domain": ctx.settings.domain,
        }));

        self.send(self.authorized(ctx, request)).await
    }

    async fn list(
        &self,
        ctx: &BatchContext,
        skip: usize,
        limit: usize,
    ) -> Result<ProviderResponse, TransportError> {
        let request = self
            .http
            .get(Self::links_url(ctx))
            .query(&[("limit", limit), ("skip", skip)]);

        self.send(self.authorized(ctx, request)).await
    }

    async fn patch(
        &self,
        ctx: &BatchContext,
        id: &str,
        target: &str,
        address: Option<String>,
    ) -> Result<ProviderResponse, TransportError> {
        let mut body = json!({ "target": target });
        if let Some(address) = address {
            body["address"] = json!(address);
        }

        // ids travel as a single path segment
        let url = format!("{}/{}", Self::links_url(ctx), urlencoding::encode(id));
        let request = self.http.patch(url).json(&body);

        self.send(self.authorized(ctx, request)).await
    }
}

/// Maps a reqwest failure onto the transport error taxonomy.
fn classify(err: reqwest::Error) -> TransportError {
    let kind = if err.is_timeout() {
        TransportErrorKind::Timeout
    } else if err.is_connect() {
        TransportErrorKind::Connection
    } else if err.is_decode() || err.is_body() {
        TransportErrorKind::Decode
    } else {
        TransportErrorKind::Other
    };

    TransportError::new(kind, err.to_string())
}
