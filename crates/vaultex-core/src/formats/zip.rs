//! ZIP decoding.

use std::io::Cursor;
use std::io::Read;

use tracing::debug;
use zip::CompressionMethod;

use crate::EntryError;
use crate::ExtractionError;
use crate::Result;
use crate::types::ArchiveEntry;

/// Upper bound for pre-allocating an entry buffer from its declared size.
const MAX_PREALLOC: usize = 16 * 1024 * 1024;

const S_IFMT: u32 = 0o170_000;
const S_IFLNK: u32 = 0o120_000;

/// Lazy iterator over the entries of an in-memory ZIP archive.
///
/// The central directory is parsed when the iterator is created; each
/// entry's data is decompressed only when the entry is reached.
pub struct ZipEntries<'a> {
    archive: zip::ZipArchive<Cursor<&'a [u8]>>,
    index: usize,
    extractable: usize,
}

impl<'a> ZipEntries<'a> {
    /// Opens a ZIP archive held in memory.
    ///
    /// Every central directory record is checked before any entry is
    /// yielded, so an archive that could only be partially extracted is
    /// rejected as a whole.
    ///
    /// # Errors
    ///
    /// Returns `ExtractionError::InvalidArchive` if the central directory
    /// cannot be read, or if any record is encrypted or uses a compression
    /// method other than stored or deflate.
    pub fn new(bytes: &'a [u8]) -> Result<Self> {
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes))
            .map_err(|e| ExtractionError::InvalidArchive(e.to_string()))?;
        let extractable = scan_records(&mut archive)?;
        Ok(Self {
            archive,
            index: 0,
            extractable,
        })
    }

    /// Number of records that will be yielded, symlinks excluded.
    #[must_use]
    pub fn entry_count(&self) -> usize {
        self.extractable
    }

    /// Reads one record; `Ok(None)` for records that are not files or
    /// directories.
    fn read_entry(
        &mut self,
        index: usize,
    ) -> std::result::Result<Option<ArchiveEntry>, EntryError> {
        let name = self
            .archive
            .name_for_index(index)
            .unwrap_or_default()
            .to_string();

        let mut file = self
            .archive
            .by_index(index)
            .map_err(|e| corrupt(&name, &e))?;

        if file.is_dir() {
            return Ok(Some(ArchiveEntry::directory(name)));
        }

        if is_symlink(file.unix_mode()) {
            debug!(entry = %name, "skipping symlink entry");
            return Ok(None);
        }

        let capacity = usize::try_from(file.size()).map_or(0, |size| size.min(MAX_PREALLOC));
        let mut data = Vec::with_capacity(capacity);
        file.read_to_end(&mut data).map_err(|e| corrupt(&name, &e))?;

        Ok(Some(ArchiveEntry::file(name, data)))
    }
}

impl Iterator for ZipEntries<'_> {
    type Item = std::result::Result<ArchiveEntry, EntryError>;

    fn next(&mut self) -> Option<Self::Item> {
        while self.index < self.archive.len() {
            let index = self.index;
            self.index += 1;
            match self.read_entry(index) {
                Ok(Some(entry)) => return Some(Ok(entry)),
                Ok(None) => {}
                Err(e) => return Some(Err(e)),
            }
        }
        None
    }
}

/// Validates every record without decompressing; returns how many records
/// are files or directories.
fn scan_records(archive: &mut zip::ZipArchive<Cursor<&[u8]>>) -> Result<usize> {
    let mut extractable = 0;
    for index in 0..archive.len() {
        let file = archive
            .by_index_raw(index)
            .map_err(|e| ExtractionError::InvalidArchive(e.to_string()))?;

        if file.encrypted() {
            return Err(ExtractionError::InvalidArchive(format!(
                "entry '{}' is encrypted",
                file.name()
            )));
        }
        if !matches!(
            file.compression(),
            CompressionMethod::Stored | CompressionMethod::Deflated
        ) {
            return Err(ExtractionError::InvalidArchive(format!(
                "entry '{}' uses unsupported compression method {:?}",
                file.name(),
                file.compression()
            )));
        }
        if !is_symlink(file.unix_mode()) {
            extractable += 1;
        }
    }
    Ok(extractable)
}

fn is_symlink(mode: Option<u32>) -> bool {
    mode.is_some_and(|mode| mode & S_IFMT == S_IFLNK)
}

fn corrupt(name: &str, error: &dyn std::fmt::Display) -> EntryError {
    EntryError::CorruptEntry {
        path: name.to_string(),
        reason: error.to_string(),
    }
}
