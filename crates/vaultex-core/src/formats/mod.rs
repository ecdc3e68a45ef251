//! Archive decoding.
//!
//! [`decode`] turns a complete in-memory buffer into a one-shot sequence of
//! [`ArchiveEntry`] values in archive order. Entry names are passed through
//! untouched; interpreting them is the resolver's job.

pub mod detect;
pub mod tar;
pub mod zip;

use tracing::debug;

use crate::EntryError;
use crate::Result;
use crate::types::ArchiveEntry;

pub use detect::ArchiveType;
pub use detect::detect_format;
pub use self::zip::ZipEntries;

/// Entries of a decoded archive.
///
/// Yields `Err(EntryError::CorruptEntry)` for a single entry whose data
/// cannot be decoded; iteration may continue past it.
pub struct ArchiveEntries<'a> {
    format: ArchiveType,
    total: usize,
    inner: EntriesInner<'a>,
}

enum EntriesInner<'a> {
    Zip(ZipEntries<'a>),
    Buffered(std::vec::IntoIter<ArchiveEntry>),
}

impl ArchiveEntries<'_> {
    /// Detected container format.
    #[must_use]
    pub const fn format(&self) -> ArchiveType {
        self.format
    }

    /// Number of items iteration will yield, corrupt entries included.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.total
    }
}

impl Iterator for ArchiveEntries<'_> {
    type Item = std::result::Result<ArchiveEntry, EntryError>;

    fn next(&mut self) -> Option<Self::Item> {
        match &mut self.inner {
            EntriesInner::Zip(entries) => entries.next(),
            EntriesInner::Buffered(entries) => entries.next().map(Ok),
        }
    }
}

/// Decodes an archive held in memory.
///
/// # Errors
///
/// - `ExtractionError::UnsupportedFormat` if the format is not recognized
/// - `ExtractionError::InvalidArchive` if the container is corrupt or
///   truncated
///
/// # Examples
///
/// ```
/// use vaultex_core::formats::decode;
/// use vaultex_core::test_utils::create_test_zip;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let bytes = create_test_zip(vec![("week1/slides.pdf", b"%PDF")]);
/// for entry in decode(&bytes)? {
///     let entry = entry?;
///     println!("{} ({} bytes)", entry.path(), entry.size());
/// }
/// # Ok(())
/// # }
/// ```
pub fn decode(bytes: &[u8]) -> Result<ArchiveEntries<'_>> {
    let format = detect_format(bytes)?;
    let inner = match format {
        ArchiveType::Zip => EntriesInner::Zip(ZipEntries::new(bytes)?),
        ArchiveType::Tar => EntriesInner::Buffered(self::tar::read_tar(bytes)?.into_iter()),
        ArchiveType::TarGz => EntriesInner::Buffered(self::tar::read_tar_gz(bytes)?.into_iter()),
    };
    let total = match &inner {
        EntriesInner::Zip(entries) => entries.entry_count(),
        EntriesInner::Buffered(entries) => entries.len(),
    };

    debug!(format = format.name(), total, "decoded archive");
    Ok(ArchiveEntries {
        format,
        total,
        inner,
    })
}
