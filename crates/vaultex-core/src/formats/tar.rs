//! TAR and gzip-compressed TAR decoding.
//!
//! Tar entries borrow the underlying reader one at a time, so the whole
//! archive is walked during decoding and buffered. Every header and data
//! block is therefore validated before extraction starts.

use std::io::Read;

use flate2::read::GzDecoder;
use tracing::debug;

use crate::ExtractionError;
use crate::Result;
use crate::types::ArchiveEntry;

/// Decodes an uncompressed tar archive held in memory.
///
/// Regular files and directories are returned in archive order. Symlinks,
/// hardlinks and special files are dropped.
///
/// # Errors
///
/// Returns `ExtractionError::InvalidArchive` on a corrupt header or
/// truncated data.
pub fn read_tar(bytes: &[u8]) -> Result<Vec<ArchiveEntry>> {
    let mut archive = tar::Archive::new(bytes);
    let mut entries = Vec::new();

    for entry in archive.entries().map_err(invalid)? {
        let mut entry = entry.map_err(invalid)?;
        let name = String::from_utf8_lossy(&entry.path_bytes()).into_owned();
        let entry_type = entry.header().entry_type();

        if entry_type.is_dir() {
            entries.push(ArchiveEntry::directory(name));
        } else if entry_type.is_file() || entry_type == tar::EntryType::Continuous {
            let mut data = Vec::new();
            entry.read_to_end(&mut data).map_err(invalid)?;
            entries.push(ArchiveEntry::file(name, data));
        } else {
            debug!(entry = %name, ?entry_type, "skipping unsupported tar entry");
        }
    }

    Ok(entries)
}

/// Decodes a gzip-compressed tar archive held in memory.
///
/// # Errors
///
/// Returns `ExtractionError::InvalidArchive` if the gzip stream is corrupt
/// or the decompressed data is not a valid tar archive.
pub fn read_tar_gz(bytes: &[u8]) -> Result<Vec<ArchiveEntry>> {
    let mut decoder = GzDecoder::new(bytes);
    let mut tar_bytes = Vec::new();
    decoder.read_to_end(&mut tar_bytes).map_err(invalid)?;
    read_tar(&tar_bytes)
}

fn invalid(error: std::io::Error) -> ExtractionError {
    ExtractionError::InvalidArchive(error.to_string())
}
