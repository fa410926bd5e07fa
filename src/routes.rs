//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /health` - Liveness and configured provider (public)
//! - `/api/*`       - Batch and export endpoints
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **CORS** - Permissive cross-origin policy for the browser front-end
//! - **Rate limiting** - Per-IP token bucket on `/api` (configurable for proxy deployments)
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::{health_handler, method_fallback};
use crate::api::middleware::{cors, rate_limit, tracing};
use crate::state::AppState;
use axum::Router;
use axum::routing::get;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Constructs the application router with all routes and middleware.
///
/// # Arguments
///
/// - `state` - shared application state injected into all handlers
/// - `behind_proxy` - when `true`, rate limiting reads client IP from
///   `X-Forwarded-For` / `X-Real-IP` headers instead of the peer socket address;
///   enable only when the service runs behind a trusted reverse proxy
pub fn app_router(state: AppState, behind_proxy: bool) -> NormalizePath<Router> {
    let api_router = if behind_proxy {
        api::routes::routes().layer(rate_limit::proxied_layer())
    } else {
        api::routes::routes().layer(rate_limit::layer())
    };

    NormalizePathLayer::trim_trailing_slash().layer(compose(api_router, state))
}

/// Routes with CORS and tracing but without rate limiting or path
/// normalisation.
///
/// The governor keys on the peer address, which in-process test transports
/// do not provide.
pub fn base_router(state: AppState) -> Router {
    compose(api::routes::routes(), state)
}

fn compose(api_router: Router<AppState>, state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .method_not_allowed_fallback(method_fallback)
        .nest("/api", api_router)
        .with_state(state)
        .layer(cors::layer())
        .layer(tracing::layer())
}
