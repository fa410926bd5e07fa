//! Infrastructure layer for external integrations.
//!
//! # Modules
//!
//! - [`provider`] - reqwest client for the sv.link HTTP API
//! - [`export`] - CSV, SVG and ZIP encoders

pub mod export;
pub mod provider;
