//! Extraction operation reporting.

use std::time::Duration;

use crate::EntryError;

/// A per-entry problem recorded during a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryWarning {
    /// Vault path of the entry when it was resolved, otherwise the raw
    /// archive name.
    pub path: String,

    /// Stable code of the underlying [`EntryError`].
    pub code: &'static str,

    /// Human-readable reason.
    pub reason: String,
}

impl EntryWarning {
    /// Builds a warning for the entry at `path` from the error that stopped it.
    #[must_use]
    pub fn from_error(path: impl Into<String>, error: &EntryError) -> Self {
        Self {
            path: path.into(),
            code: error.code(),
            reason: error.to_string(),
        }
    }
}

/// Report of an archive extraction run.
///
/// Produced once, after the last entry has been processed.
#[derive(Debug, Clone, Default)]
pub struct ExtractionReport {
    /// Number of new files written.
    pub files_written: usize,

    /// Number of directories created.
    pub directories_created: usize,

    /// Number of file entries skipped because the destination already existed.
    pub files_skipped: usize,

    /// Number of entries dropped by the ignore policy.
    pub entries_ignored: usize,

    /// Total bytes written.
    pub bytes_written: u64,

    /// Duration of the run.
    pub duration: Duration,

    /// Per-entry warnings, in archive order.
    pub warnings: Vec<EntryWarning>,
}

impl ExtractionReport {
    /// Creates a new empty extraction report.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a warning to the report.
    pub fn add_warning(&mut self, warning: EntryWarning) {
        self.warnings.push(warning);
    }

    /// Returns whether any warnings were generated.
    #[must_use]
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Returns `true` if the run changed nothing in the vault.
    #[must_use]
    pub fn is_noop(&self) -> bool {
        self.files_written == 0 && self.directories_created == 0
    }
}

/// Callback trait for progress reporting during extraction.
///
/// The trait requires `Send` to allow use in multi-threaded contexts.
///
/// # Examples
///
/// ```
/// use vaultex_core::ProgressCallback;
///
/// struct SimpleProgress;
///
/// impl ProgressCallback for SimpleProgress {
///     fn on_entry_start(&mut self, path: &str, total: usize, current: usize) {
///         println!("Processing {current}/{total}: {path}");
///     }
///
///     fn on_bytes_written(&mut self, _bytes: u64) {}
///
///     fn on_entry_complete(&mut self, path: &str) {
///         println!("Completed: {path}");
///     }
///
///     fn on_complete(&mut self) {
///         println!("Extraction complete");
///     }
/// }
/// ```
pub trait ProgressCallback: Send {
    /// Called when starting to process an entry.
    ///
    /// # Arguments
    ///
    /// * `path` - Raw archive path of the entry
    /// * `total` - Total number of entries in the archive
    /// * `current` - Current entry number (1-indexed)
    fn on_entry_start(&mut self, path: &str, total: usize, current: usize);

    /// Called after a new file has been written.
    fn on_bytes_written(&mut self, bytes: u64);

    /// Called when an entry has been processed, whatever its outcome.
    fn on_entry_complete(&mut self, path: &str);

    /// Called when the run is complete.
    fn on_complete(&mut self);
}

/// No-op implementation of `ProgressCallback`.
#[derive(Debug, Default)]
pub struct NoopProgress;

impl ProgressCallback for NoopProgress {
    fn on_entry_start(&mut self, _path: &str, _total: usize, _current: usize) {}

    fn on_bytes_written(&mut self, _bytes: u64) {}

    fn on_entry_complete(&mut self, _path: &str) {}

    fn on_complete(&mut self) {}
}
