//! Core domain entities representing the batch data model.
//!
//! # Entity Types
//!
//! - [`ShortenResult`], [`LookupResult`], [`ResolvedLink`], [`UpdateResult`] -
//!   per-operation result records sharing the [`BatchRecord`] contract
//! - [`ResultSet`] / [`Summary`] - ordered results and their aggregate counts
//! - [`LinkIndex`] - request-scoped address index built from the provider listing
//! - [`ExportPayload`] - base64 delivery shape shared by all exports

pub mod export;
pub mod link_index;
pub mod record;
pub mod result_set;

pub use export::{
    ArchiveNaming, ArchiveOptions, CsvLocale, ExportFile, ExportPayload, QrImage,
};
pub use link_index::{LinkIndex, LinkIndexEntry, LinkPage, ListedLink};
pub use record::{
    BatchRecord, LinkChange, LookupResult, NOT_FOUND, ResolvedLink, ShortenResult,
    UpdateResult, Views,
};
pub use result_set::{ResultSet, Summary};
