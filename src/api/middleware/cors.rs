//! Cross-origin policy for the browser front-end.

use tower_http::cors::{Any, CorsLayer};

/// Allows any origin, method and header.
///
/// Every `OPTIONS` request is answered here with an empty 200.
pub fn layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
}
