//! Decoded archive entries.

/// Kind of an archive record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKind {
    /// Regular file with data.
    File,

    /// Explicit directory marker.
    Directory,
}

impl EntryKind {
    /// Returns `true` if this is a regular file.
    #[must_use]
    pub const fn is_file(self) -> bool {
        matches!(self, Self::File)
    }

    /// Returns `true` if this is a directory.
    #[must_use]
    pub const fn is_directory(self) -> bool {
        matches!(self, Self::Directory)
    }
}

/// One record of a decoded archive.
///
/// `path` is the name exactly as stored in the archive; it has NOT been
/// normalized or checked and must go through the resolver before use.
/// Directory entries carry no data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveEntry {
    path: String,
    kind: EntryKind,
    data: Option<Vec<u8>>,
}

impl ArchiveEntry {
    /// Creates a file entry.
    #[must_use]
    pub fn file(path: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            path: path.into(),
            kind: EntryKind::File,
            data: Some(data),
        }
    }

    /// Creates a directory entry.
    #[must_use]
    pub fn directory(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            kind: EntryKind::Directory,
            data: None,
        }
    }

    /// Raw archive path.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Entry kind.
    #[must_use]
    pub const fn kind(&self) -> EntryKind {
        self.kind
    }

    /// File contents, `None` for directories.
    #[must_use]
    pub fn data(&self) -> Option<&[u8]> {
        self.data.as_deref()
    }

    /// Size of the file contents in bytes (0 for directories).
    #[must_use]
    pub fn size(&self) -> u64 {
        self.data.as_ref().map_or(0, |d| d.len() as u64)
    }
}
