//! Domain layer: batch records, provider contract and error taxonomy.
//!
//! Nothing here performs I/O. The provider trait is implemented by the
//! infrastructure layer and consumed by the application services.
//!
//! # Architecture
//!
//! - [`entities`] - Result records, result sets, link index, export shapes
//! - [`context`] - Request-scoped provider context
//! - [`provider`] - Remote shortening provider trait
//! - [`errors`] - Per-item and request-level error types

pub mod context;
pub mod entities;
pub mod errors;
pub mod provider;
