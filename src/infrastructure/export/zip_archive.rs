//! In-memory ZIP assembly.

use std::io::{Cursor, Write};

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::domain::errors::ExportError;

/// Accumulates named files into a deflated archive held in memory.
pub struct ArchiveBuilder {
    writer: ZipWriter<Cursor<Vec<u8>>>,
    options: SimpleFileOptions,
    entries: usize,
}

impl ArchiveBuilder {
    pub fn new() -> Self {
        Self {
            writer: ZipWriter::new(Cursor::new(Vec::new())),
            options: SimpleFileOptions::default().compression_method(CompressionMethod::Deflated),
            entries: 0,
        }
    }

    /// Appends one file.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::Archive`] on a duplicate name or write failure.
    pub fn add_file(&mut self, name: &str, contents: &[u8]) -> Result<(), ExportError> {
        self.writer
            .start_file(name, self.options)
            .map_err(archive_error)?;
        self.writer.write_all(contents).map_err(archive_error)?;
        self.entries += 1;
        Ok(())
    }

    pub fn entries(&self) -> usize {
        self.entries
    }

    /// Finalises the central directory and returns the archive bytes.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::EmptyArchive`] if nothing was added.
    pub fn finish(self) -> Result<Vec<u8>, ExportError> {
        if self.entries == 0 {
            return Err(ExportError::EmptyArchive);
        }

        let cursor = self.writer.finish().map_err(archive_error)?;
        let bytes = cursor.into_inner();
        if bytes.is_empty() {
            return Err(ExportError::EmptyArchive);
        }
        Ok(bytes)
    }
}

impl Default for ArchiveBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn archive_error(err: impl std::fmt::Display) -> ExportError {
    ExportError::Archive(err.to_string())
}
