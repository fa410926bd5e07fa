pub mod csv_writer;
pub mod qr_svg;
pub mod zip_archive;

pub use csv_writer::{CsvRecord, csv_filename, render_csv};
pub use qr_svg::{QrMatrix, encode as encode_qr, render_svg};
pub use zip_archive::ArchiveBuilder;
