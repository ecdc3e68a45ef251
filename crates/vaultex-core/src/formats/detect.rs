//! Archive format detection from magic bytes.

use crate::ExtractionError;
use crate::Result;

const ZIP_LOCAL_HEADER: &[u8; 4] = b"PK\x03\x04";
const ZIP_EMPTY_ARCHIVE: &[u8; 4] = b"PK\x05\x06";
const ZIP_SPANNED: &[u8; 4] = b"PK\x07\x08";
const GZIP_MAGIC: &[u8; 2] = &[0x1F, 0x8B];

/// POSIX ustar magic, stored at offset 257 of the first header block.
const USTAR_MAGIC: &[u8; 5] = b"ustar";
const USTAR_OFFSET: usize = 257;

/// Supported archive formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveType {
    /// Tar archive (uncompressed).
    Tar,
    /// Gzip-compressed tar archive.
    TarGz,
    /// ZIP archive.
    Zip,
}

impl ArchiveType {
    /// Short format name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Tar => "tar",
            Self::TarGz => "tar.gz",
            Self::Zip => "zip",
        }
    }
}

/// Detects the archive type from the leading bytes of a buffer.
///
/// # Errors
///
/// - `ExtractionError::InvalidArchive` if the buffer is empty
/// - `ExtractionError::UnsupportedFormat` if no known signature matches
pub fn detect_format(bytes: &[u8]) -> Result<ArchiveType> {
    if bytes.is_empty() {
        return Err(ExtractionError::InvalidArchive(
            "archive is empty".to_string(),
        ));
    }

    if bytes.starts_with(ZIP_LOCAL_HEADER)
        || bytes.starts_with(ZIP_EMPTY_ARCHIVE)
        || bytes.starts_with(ZIP_SPANNED)
    {
        return Ok(ArchiveType::Zip);
    }

    if bytes.starts_with(GZIP_MAGIC) {
        return Ok(ArchiveType::TarGz);
    }

    if bytes
        .get(USTAR_OFFSET..USTAR_OFFSET + USTAR_MAGIC.len())
        .is_some_and(|magic| magic == USTAR_MAGIC)
    {
        return Ok(ArchiveType::Tar);
    }

    Err(ExtractionError::UnsupportedFormat)
}
