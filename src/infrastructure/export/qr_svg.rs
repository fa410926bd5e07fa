//! QR bit-matrix encoding and SVG rasterisation.

use qrcode::{Color, EcLevel, QrCode};
use std::fmt::Write as _;

use crate::domain::errors::ExportError;

/// Side length of one module in SVG user units.
pub const CELL_SIZE: usize = 10;

/// Quiet zone around the symbol, in modules.
pub const BORDER_CELLS: usize = 4;

/// Square grid of dark/light modules, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QrMatrix {
    width: usize,
    modules: Vec<bool>,
}

impl QrMatrix {
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn is_dark(&self, row: usize, col: usize) -> bool {
        self.modules
            .get(row * self.width + col)
            .copied()
            .unwrap_or(false)
    }

    pub fn dark_count(&self) -> usize {
        self.modules.iter().filter(|m| **m).count()
    }
}

/// Encodes `text` at medium error correction, picking the smallest version that fits.
///
/// # Errors
///
/// Returns [`ExportError::Qr`] when the payload does not fit any QR version.
pub fn encode(text: &str) -> Result<QrMatrix, ExportError> {
    let code = QrCode::with_error_correction_level(text.as_bytes(), EcLevel::M)
        .map_err(|e| ExportError::Qr(e.to_string()))?;

    Ok(QrMatrix {
        width: code.width(),
        modules: code
            .to_colors()
            .into_iter()
            .map(|c| c == Color::Dark)
            .collect(),
    })
}

/// Side length of the rendered image including the border.
pub fn image_size(matrix: &QrMatrix) -> usize {
    (matrix.width() + 2 * BORDER_CELLS) * CELL_SIZE
}

/// Renders the matrix as a standalone SVG document.
///
/// A white background rectangle comes first, then one black square per dark
/// module, then two comments naming the image ordinal and the encoded URL.
pub fn render_svg(matrix: &QrMatrix, url: &str, index: usize) -> String {
    let total = image_size(matrix);
    let mut svg = String::with_capacity(64 * matrix.dark_count() + 256);

    svg.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    let _ = writeln!(
        svg,
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{total}\" height=\"{total}\" viewBox=\"0 0 {total} {total}\">"
    );
    let _ = writeln!(svg, "<rect width=\"{total}\" height=\"{total}\" fill=\"white\"/>");

    for row in 0..matrix.width() {
        for col in 0..matrix.width() {
            if matrix.is_dark(row, col) {
                let x = (col + BORDER_CELLS) * CELL_SIZE;
                let y = (row + BORDER_CELLS) * CELL_SIZE;
                let _ = writeln!(
                    svg,
                    "<rect x=\"{x}\" y=\"{y}\" width=\"{CELL_SIZE}\" height=\"{CELL_SIZE}\" fill=\"#000000\"/>"
                );
            }
        }
    }

    let _ = writeln!(svg, "<!-- QR Code #{index} -->");
    let _ = writeln!(svg, "<!-- URL: {} -->", comment_safe(url));
    svg.push_str("</svg>");
    svg
}

// "--" is not allowed inside an XML comment
fn comment_safe(text: &str) -> String {
    let mut out = text.to_string();
    while out.contains("--") {
        out = out.replace("--", "- -");
    }
    out
}
