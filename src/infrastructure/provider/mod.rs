//! Remote shortening provider implementations.
//!
//! - [`SvLinkClient`] - sv.link v2 API over reqwest

mod svlink_client;

pub use svlink_client::{API_KEY_HEADER, SvLinkClient};
