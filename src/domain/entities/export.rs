//! Export formats and the base64 delivery payload.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};

/// Label set and byte layout of a CSV export.
///
/// `Native` uses Traditional Chinese labels, quotes every field and starts
/// with a UTF-8 byte-order mark so spreadsheet tools detect the encoding.
/// `English` uses English labels, minimal quoting and no BOM.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CsvLocale {
    Native,
    #[default]
    English,
}

impl CsvLocale {
    pub fn status_label(self, success: bool) -> &'static str {
        match (self, success) {
            (Self::Native, true) => "成功",
            (Self::Native, false) => "失敗",
            (Self::English, true) => "Success",
            (Self::English, false) => "Failed",
        }
    }

    pub fn mimetype(self) -> &'static str {
        match self {
            Self::Native => "text/csv;charset=utf-8;",
            Self::English => "text/csv",
        }
    }
}

/// How QR images are named inside the archive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArchiveNaming {
    /// `qrcode_001.svg`, `qrcode_002.svg`, ...
    #[default]
    Ordinal,
    /// `001_<slug>.svg` with the slug taken from the original URL's path.
    Slug,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ArchiveOptions {
    pub naming: ArchiveNaming,
    /// Adds a `.txt` file per image plus a `manifest.txt`.
    pub include_metadata: bool,
}

/// One rendered QR image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QrImage {
    pub index: usize,
    pub filename: String,
    pub svg_content: String,
    pub short_url: String,
    pub original_url: String,
}

/// An encoded export before transport wrapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportFile {
    pub filename: String,
    pub mimetype: String,
    pub bytes: Vec<u8>,
}

/// Canonical shape returned by both exporters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportPayload {
    pub content: String,
    pub filename: String,
    pub mimetype: String,
    /// Byte length of the decoded content.
    pub size: usize,
    pub encoding: String,
}

impl From<ExportFile> for ExportPayload {
    fn from(file: ExportFile) -> Self {
        Self {
            content: STANDARD.encode(&file.bytes),
            size: file.bytes.len(),
            filename: file.filename,
            mimetype: file.mimetype,
            encoding: "base64".to_string(),
        }
    }
}

impl ExportPayload {
    /// Decodes `content` back into raw bytes.
    pub fn decode(&self) -> Result<Vec<u8>, base64::DecodeError> {
        STANDARD.decode(&self.content)
    }
}
