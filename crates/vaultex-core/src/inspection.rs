//! Archive inspection without extraction.

use crate::ExtractionConfig;
use crate::Result;
use crate::formats::ArchiveType;
use crate::formats::decode;
use crate::resolve::Resolution;
use crate::resolve::resolve;
use crate::types::EntryKind;
use crate::types::TargetRoot;

/// What an extraction run would do with an entry, before looking at the
/// vault.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Disposition {
    /// The entry would be extracted (or skipped if already present).
    Extract,

    /// The entry is platform metadata or empty and would be dropped.
    Ignored,

    /// The entry would be reported as a warning and not written.
    Rejected(String),
}

/// One entry of an [`ArchiveManifest`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestEntry {
    /// Entry name as stored in the archive.
    pub path: String,

    /// File or directory.
    pub kind: EntryKind,

    /// Uncompressed size in bytes (0 for directories).
    pub size: u64,

    /// Outcome of path resolution.
    pub disposition: Disposition,
}

/// Contents of an archive, in archive order.
#[derive(Debug, Clone)]
pub struct ArchiveManifest {
    /// Detected container format.
    pub format: ArchiveType,

    /// Entries in archive order.
    pub entries: Vec<ManifestEntry>,

    /// Sum of file sizes in bytes.
    pub total_size: u64,
}

impl ArchiveManifest {
    /// Entries that would be extracted.
    pub fn extractable(&self) -> impl Iterator<Item = &ManifestEntry> {
        self.entries
            .iter()
            .filter(|entry| entry.disposition == Disposition::Extract)
    }

    /// Number of entries that would be dropped silently.
    #[must_use]
    pub fn ignored_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|entry| entry.disposition == Disposition::Ignored)
            .count()
    }
}

/// Decodes `bytes` and classifies every entry without touching any vault.
///
/// Entries are resolved against the vault root; a different target root
/// only adds a prefix and never changes the disposition.
pub(crate) fn inspect(bytes: &[u8], config: &ExtractionConfig) -> Result<ArchiveManifest> {
    let decoded = decode(bytes)?;
    let format = decoded.format();
    let root = TargetRoot::root();

    let mut entries = Vec::with_capacity(decoded.total());
    let mut total_size = 0;

    for entry in decoded {
        let manifest_entry = match entry {
            Ok(entry) => {
                let disposition = match resolve(&root, entry.path(), config) {
                    Ok(Resolution::Destination(_)) => Disposition::Extract,
                    Ok(Resolution::Ignore) => Disposition::Ignored,
                    Err(e) => Disposition::Rejected(e.to_string()),
                };
                total_size += entry.size();
                ManifestEntry {
                    path: entry.path().to_string(),
                    kind: entry.kind(),
                    size: entry.size(),
                    disposition,
                }
            }
            Err(e) => ManifestEntry {
                path: e.path().to_string(),
                kind: EntryKind::File,
                size: 0,
                disposition: Disposition::Rejected(e.to_string()),
            },
        };
        entries.push(manifest_entry);
    }

    Ok(ArchiveManifest {
        format,
        entries,
        total_size,
    })
}
