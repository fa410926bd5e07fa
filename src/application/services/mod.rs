//! Business logic services for the application layer.

pub mod batch_service;
pub mod export_service;
pub mod link_index_service;

pub use batch_service::{BatchOutcome, BatchRequest, BatchService};
pub use export_service::ExportService;
pub use link_index_service::LinkIndexService;
