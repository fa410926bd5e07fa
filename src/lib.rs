//! # sv.link batch tool
//!
//! Batch short-link generation, reverse lookup, target updates and CSV/QR
//! export on top of the sv.link v2 API, served over HTTP with Axum and
//! usable from the command line.
//!
//! ## Architecture
//!
//! - **Domain Layer** ([`domain`]) - Result records, errors, request context and the provider trait
//! - **Application Layer** ([`application`]) - Batch orchestration, link index paging and exports
//! - **Infrastructure Layer** ([`infrastructure`]) - sv.link HTTP client and CSV/SVG/ZIP encoders
//! - **API Layer** ([`api`]) - REST handlers, DTOs and middleware
//!
//! ## Features
//!
//! - Shorten hundreds of URLs in one request, one provider call per URL
//! - Reverse lookup of visit counts and targets by short link
//! - Bulk retargeting of existing short links
//! - CSV export in English or Traditional Chinese flavours
//! - QR codes as SVG, previewed as JSON or packed into a ZIP
//!
//! ## Quick Start
//!
//! ```bash
//! # Start the service (defaults talk to https://sv.link/api/v2)
//! cargo run
//!
//! # Or use the command line front-end
//! SV_LINK_API_KEY=... cargo run --bin batch -- shorten urls.txt --csv out.csv
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].
//! See [`config`] module for available options.

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;
pub mod utils;

pub mod config;
pub mod server;

pub mod routes;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::{BatchOutcome, BatchRequest, BatchService, ExportService};
    pub use crate::domain::context::{BatchContext, ProviderSettings};
    pub use crate::domain::entities::{
        LinkChange, LookupResult, ResolvedLink, ShortenResult, UpdateResult,
    };
    pub use crate::error::AppError;
    pub use crate::infrastructure::provider::SvLinkClient;
    pub use crate::state::AppState;
}
