//! DTOs for the CSV and QR export endpoints.
//!
//! Exports are stateless: the caller sends back the `results` array it
//! received from a batch endpoint.

use serde::{Deserialize, Serialize};

use crate::domain::entities::{ArchiveNaming, ArchiveOptions, CsvLocale, QrImage, ShortenResult};

/// Request to render a result list as CSV.
#[derive(Debug, Deserialize)]
pub struct CsvExportRequest<R> {
    #[serde(default = "Vec::new")]
    pub results: Vec<R>,

    #[serde(default)]
    pub locale: CsvLocale,
}

/// Request to pack QR images of shorten results into a ZIP.
#[derive(Debug, Deserialize)]
pub struct QrArchiveRequest {
    #[serde(default)]
    pub results: Vec<ShortenResult>,

    #[serde(default)]
    pub naming: ArchiveNaming,

    #[serde(default)]
    pub include_metadata: bool,
}

impl QrArchiveRequest {
    pub fn options(&self) -> ArchiveOptions {
        ArchiveOptions {
            naming: self.naming,
            include_metadata: self.include_metadata,
        }
    }
}

/// Request to render QR images for in-browser preview.
#[derive(Debug, Deserialize)]
pub struct QrGalleryRequest {
    #[serde(default)]
    pub results: Vec<ShortenResult>,

    #[serde(default)]
    pub naming: ArchiveNaming,
}

#[derive(Debug, Serialize)]
pub struct QrGalleryResponse {
    pub qr_codes: Vec<QrImage>,
    pub total: usize,
}
