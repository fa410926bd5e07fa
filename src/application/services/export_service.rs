//! CSV and QR exports of finished result sets.

use chrono::{Local, NaiveDateTime};
use tracing::{debug, warn};

use crate::domain::entities::{
    ArchiveNaming, ArchiveOptions, CsvLocale, ExportFile, ExportPayload, QrImage, ShortenResult,
};
use crate::domain::errors::ExportError;
use crate::infrastructure::export::csv_writer::{
    CsvRecord, EXPORT_TIME_FORMAT, csv_filename, render_csv,
};
use crate::infrastructure::export::qr_svg;
use crate::infrastructure::export::zip_archive::ArchiveBuilder;
use crate::utils::slug::slug_from_url;

pub const ZIP_MIMETYPE: &str = "application/zip";

const ARCHIVE_STEM: &str = "sv-link-qrcodes";

/// Encodes result sets into downloadable payloads.
///
/// Stateless; the `*_at` variants take the export timestamp explicitly so
/// output is reproducible.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExportService;

impl ExportService {
    pub fn new() -> Self {
        Self
    }

    /// Renders `records` as a CSV export stamped with the current local time.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::NoExportableData`] for an empty list.
    pub fn csv<R: CsvRecord>(
        &self,
        records: &[R],
        locale: CsvLocale,
    ) -> Result<ExportPayload, ExportError> {
        self.csv_at(records, locale, now())
    }

    pub fn csv_at<R: CsvRecord>(
        &self,
        records: &[R],
        locale: CsvLocale,
        exported_at: NaiveDateTime,
    ) -> Result<ExportPayload, ExportError> {
        if records.is_empty() {
            return Err(ExportError::NoExportableData);
        }

        let bytes = render_csv(records, locale, exported_at)?;
        debug!(rows = records.len(), bytes = bytes.len(), "CSV rendered");

        Ok(ExportFile {
            filename: csv_filename::<R>(exported_at),
            mimetype: locale.mimetype().to_string(),
            bytes,
        }
        .into())
    }

    /// Renders one SVG per successful record, for in-browser preview.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::NoExportableData`] when no record has a short URL.
    pub fn qr_gallery(
        &self,
        records: &[ShortenResult],
        naming: ArchiveNaming,
    ) -> Result<Vec<QrImage>, ExportError> {
        let eligible: Vec<&ShortenResult> =
            records.iter().filter(|r| r.short_url().is_some()).collect();
        if eligible.is_empty() {
            return Err(ExportError::NoExportableData);
        }

        let mut images = Vec::with_capacity(eligible.len());
        for (position, record) in eligible.into_iter().enumerate() {
            let index = position + 1;
            let short_url = record.short_url().unwrap_or_default();

            let matrix = match qr_svg::encode(short_url) {
                Ok(matrix) => matrix,
                Err(e) => {
                    warn!(index, error = %e, "Skipping QR image");
                    continue;
                }
            };

            images.push(QrImage {
                index,
                filename: image_filename(index, &record.original, naming),
                svg_content: qr_svg::render_svg(&matrix, short_url, index),
                short_url: short_url.to_string(),
                original_url: record.original.clone(),
            });
        }

        Ok(images)
    }

    /// Packs the QR images into a ZIP archive stamped with the current local time.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::NoExportableData`] before any encoding when no
    /// record is eligible, and [`ExportError::EmptyArchive`] when every image
    /// was skipped.
    pub fn qr_archive(
        &self,
        records: &[ShortenResult],
        options: ArchiveOptions,
    ) -> Result<ExportPayload, ExportError> {
        self.qr_archive_at(records, options, now())
    }

    pub fn qr_archive_at(
        &self,
        records: &[ShortenResult],
        options: ArchiveOptions,
        exported_at: NaiveDateTime,
    ) -> Result<ExportPayload, ExportError> {
        let images = self.qr_gallery(records, options.naming)?;
        let mut archive = ArchiveBuilder::new();

        for image in &images {
            archive.add_file(&image.filename, image.svg_content.as_bytes())?;
            if options.include_metadata {
                archive.add_file(&metadata_filename(&image.filename), metadata(image).as_bytes())?;
            }
        }
        if options.include_metadata && !images.is_empty() {
            archive.add_file("manifest.txt", manifest(&images, exported_at).as_bytes())?;
        }

        let entries = archive.entries();
        let bytes = archive.finish()?;
        debug!(entries, bytes = bytes.len(), "QR archive assembled");

        Ok(ExportFile {
            filename: format!(
                "{ARCHIVE_STEM}_{}.zip",
                exported_at.format("%Y%m%d_%H%M%S")
            ),
            mimetype: ZIP_MIMETYPE.to_string(),
            bytes,
        }
        .into())
    }
}

fn now() -> NaiveDateTime {
    Local::now().naive_local()
}

fn image_filename(index: usize, original: &str, naming: ArchiveNaming) -> String {
    match naming {
        ArchiveNaming::Ordinal => format!("qrcode_{index:03}.svg"),
        ArchiveNaming::Slug => format!("{index:03}_{}.svg", slug_from_url(original)),
    }
}

fn metadata_filename(image_filename: &str) -> String {
    let stem = image_filename
        .strip_suffix(".svg")
        .unwrap_or(image_filename);
    format!("{stem}.txt")
}

fn metadata(image: &QrImage) -> String {
    format!(
        "QR Code #{}\nShort URL: {}\nOriginal URL: {}\n",
        image.index, image.short_url, image.original_url
    )
}

fn manifest(images: &[QrImage], exported_at: NaiveDateTime) -> String {
    let mut out = format!(
        "sv.link QR codes\nGenerated: {}\nTotal: {}\n\n",
        exported_at.format(EXPORT_TIME_FORMAT),
        images.len()
    );
    for image in images {
        out.push_str(&format!(
            "{}\t{}\t{}\n",
            image.filename, image.short_url, image.original_url
        ));
    }
    out
}
