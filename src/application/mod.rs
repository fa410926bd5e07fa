//! Application layer services implementing the batch workflows.
//!
//! Services consume the [`crate::domain::provider::LinkProvider`] trait and
//! the export encoders, and expose the operations the HTTP handlers and the
//! CLI call.
//!
//! # Available Services
//!
//! - [`services::batch_service::BatchService`] - shorten, lookup, resolve and update runs
//! - [`services::link_index_service::LinkIndexService`] - paginated link index
//! - [`services::export_service::ExportService`] - CSV, QR gallery and QR archive exports

pub mod services;
