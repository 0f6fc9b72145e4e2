use std::io::{Cursor, Write as _};

use crate::foundation::error::{SquarizeError, SquarizeResult};

/// File name of the exported archive.
pub const ARCHIVE_FILE_NAME: &str = "squared-images.zip";

/// A named byte blob destined for the export archive.
#[derive(Clone, Debug)]
pub struct ArchiveEntry {
    /// Entry name inside the archive.
    pub name: String,
    /// Entry content.
    pub bytes: Vec<u8>,
}

/// A finished export: one archive blob plus the name to save it under.
#[derive(Clone, Debug)]
pub struct ExportArchive {
    /// Archive content.
    pub bytes: Vec<u8>,
    /// Suggested file name ([`ARCHIVE_FILE_NAME`]).
    pub file_name: String,
}

/// Export packager contract: given a set of named byte blobs, produce a
/// single archive blob. Failures are operation-fatal for the export only; no
/// partial archive is produced.
pub trait ArchivePackager {
    /// Package `entries` into one archive blob.
    fn package(&self, entries: &[ArchiveEntry]) -> SquarizeResult<Vec<u8>>;
}

/// ZIP implementation of [`ArchivePackager`]. Entries are stored without
/// compression; PNG content does not deflate usefully.
#[derive(Clone, Copy, Debug, Default)]
pub struct ZipPackager;

impl ZipPackager {
    /// Create a packager.
    pub fn new() -> Self {
        Self
    }
}

impl ArchivePackager for ZipPackager {
    fn package(&self, entries: &[ArchiveEntry]) -> SquarizeResult<Vec<u8>> {
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        let options = zip::write::SimpleFileOptions::default()
            .compression_method(zip::CompressionMethod::Stored);

        for entry in entries {
            writer.start_file(entry.name.as_str(), options).map_err(|e| {
                SquarizeError::packaging(format!("start archive entry '{}': {e}", entry.name))
            })?;
            writer.write_all(&entry.bytes).map_err(|e| {
                SquarizeError::packaging(format!("write archive entry '{}': {e}", entry.name))
            })?;
        }

        let cursor = writer
            .finish()
            .map_err(|e| SquarizeError::packaging(format!("finalize archive: {e}")))?;
        Ok(cursor.into_inner())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/export/archive.rs"]
mod tests;
