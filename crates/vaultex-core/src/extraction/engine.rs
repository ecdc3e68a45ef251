//! Core extraction engine.

use std::time::Instant;

use tracing::debug;
use tracing::info;
use tracing::warn;

use crate::EntryError;
use crate::ExtractionConfig;
use crate::ExtractionError;
use crate::ExtractionReport;
use crate::ProgressCallback;
use crate::Result;
use crate::formats::decode;
use crate::materialize::FolderMaterializer;
use crate::report::EntryWarning;
use crate::resolve::Resolution;
use crate::resolve::resolve;
use crate::storage::PathKind;
use crate::storage::Storage;
use crate::types::ArchiveEntry;
use crate::types::EntryKind;
use crate::types::TargetRoot;
use crate::writer::WriteOutcome;
use crate::writer::write_entry;

/// Drives decode, resolve, materialize and write for every archive entry.
///
/// The engine holds no per-run state; the directory memo lives in a
/// [`FolderMaterializer`] created inside each [`extract`](Self::extract)
/// call, so one engine can serve any number of runs.
///
/// # Examples
///
/// ```no_run
/// use vaultex_core::ExtractionConfig;
/// use vaultex_core::ExtractionEngine;
/// use vaultex_core::FsStorage;
/// use vaultex_core::NoopProgress;
/// use vaultex_core::TargetRoot;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let engine = ExtractionEngine::new(ExtractionConfig::default());
/// let vault = FsStorage::open("/home/me/vault")?;
/// let bytes = std::fs::read("course.zip")?;
///
/// let report = engine.extract(&bytes, &vault, &TargetRoot::root(), &mut NoopProgress)?;
/// for warning in &report.warnings {
///     eprintln!("{}: {}", warning.path, warning.reason);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct ExtractionEngine {
    config: ExtractionConfig,
}

impl ExtractionEngine {
    /// Creates a new extraction engine with the given configuration.
    #[must_use]
    pub fn new(config: ExtractionConfig) -> Self {
        Self { config }
    }

    /// Configuration used for every run.
    #[must_use]
    pub fn config(&self) -> &ExtractionConfig {
        &self.config
    }

    /// Extracts `bytes` into `target` inside `storage`.
    ///
    /// The target must already exist as a directory (see
    /// [`prepare_target`](crate::prepare_target)). Entries are processed
    /// strictly in archive order.
    ///
    /// # Errors
    ///
    /// - `ExtractionError::TargetUnavailable` if the target is not a directory
    /// - `ExtractionError::UnsupportedFormat` or
    ///   `ExtractionError::InvalidArchive` if decoding fails
    ///
    /// In both cases nothing has been written. Every other problem is
    /// reported in [`ExtractionReport::warnings`].
    pub fn extract<S: Storage + ?Sized>(
        &self,
        bytes: &[u8],
        storage: &S,
        target: &TargetRoot,
        progress: &mut dyn ProgressCallback,
    ) -> Result<ExtractionReport> {
        let start = Instant::now();

        check_target(storage, target)?;
        let entries = decode(bytes).inspect_err(|e| warn!(error = %e, "archive rejected"))?;

        let total = entries.total();
        info!(format = entries.format().name(), total, %target, "extracting archive");

        let mut folders = FolderMaterializer::new(storage);
        let mut report = ExtractionReport::new();

        for (index, entry) in entries.enumerate() {
            match entry {
                Ok(entry) => {
                    progress.on_entry_start(entry.path(), total, index + 1);
                    self.process_entry(&entry, target, &mut folders, &mut report, progress);
                    progress.on_entry_complete(entry.path());
                }
                Err(error) => {
                    progress.on_entry_start(error.path(), total, index + 1);
                    record(&mut report, error.path().to_string(), &error);
                    progress.on_entry_complete(error.path());
                }
            }
        }

        report.directories_created = folders.created_count();
        report.duration = start.elapsed();
        progress.on_complete();

        info!(
            files_written = report.files_written,
            files_skipped = report.files_skipped,
            directories_created = report.directories_created,
            warnings = report.warnings.len(),
            "extraction complete"
        );
        Ok(report)
    }

    fn process_entry<S: Storage + ?Sized>(
        &self,
        entry: &ArchiveEntry,
        target: &TargetRoot,
        folders: &mut FolderMaterializer<'_, S>,
        report: &mut ExtractionReport,
        progress: &mut dyn ProgressCallback,
    ) {
        let dest = match resolve(target, entry.path(), &self.config) {
            Ok(Resolution::Destination(dest)) => dest,
            Ok(Resolution::Ignore) => {
                report.entries_ignored += 1;
                return;
            }
            Err(error) => {
                record(report, entry.path().to_string(), &error);
                return;
            }
        };

        let result = match entry.kind() {
            EntryKind::Directory => folders.ensure_directory(dest.normalized_path()),
            EntryKind::File => {
                write_entry(folders, &dest, entry.data().unwrap_or_default()).map(|outcome| {
                    match outcome {
                        WriteOutcome::Written { bytes } => {
                            report.files_written += 1;
                            report.bytes_written += bytes;
                            progress.on_bytes_written(bytes);
                        }
                        WriteOutcome::Replaced { bytes } => {
                            report.bytes_written += bytes;
                            progress.on_bytes_written(bytes);
                        }
                        WriteOutcome::Skipped => report.files_skipped += 1,
                    }
                })
            }
        };

        if let Err(error) = result {
            record(report, dest.normalized_path().to_string(), &error);
        } else {
            debug!(entry = entry.path(), dest = dest.normalized_path(), "entry done");
        }
    }
}

fn check_target<S: Storage + ?Sized>(storage: &S, target: &TargetRoot) -> Result<()> {
    let unavailable = |reason: String| ExtractionError::TargetUnavailable {
        path: target.to_string(),
        reason,
    };

    match storage.stat_path(target.as_str()) {
        Ok(PathKind::Directory) => Ok(()),
        Ok(PathKind::File) => Err(unavailable("a file occupies this path".to_string())),
        Ok(PathKind::Absent) => Err(unavailable("directory does not exist".to_string())),
        Err(e) => Err(unavailable(e.to_string())),
    }
}

fn record(report: &mut ExtractionReport, path: String, error: &EntryError) {
    warn!(path = %path, code = error.code(), "{error}");
    report.add_warning(EntryWarning::from_error(path, error));
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::NoopProgress;
    use crate::materialize::tests::RecordingStorage;
    use crate::storage::FsStorage;
    use crate::test_utils::TarTestBuilder;
    use crate::test_utils::ZipTestBuilder;
    use crate::test_utils::create_test_zip;
    use crate::test_utils::set_zip_compression_method;
    use std::fs;
    use tempfile::TempDir;

    fn vault() -> (TempDir, FsStorage) {
        let temp = TempDir::new().expect("failed to create temp dir");
        let storage = FsStorage::open(temp.path()).expect("failed to open vault");
        (temp, storage)
    }

    fn run<S: Storage + ?Sized>(
        bytes: &[u8],
        storage: &S,
        target: &TargetRoot,
    ) -> Result<ExtractionReport> {
        ExtractionEngine::default().extract(bytes, storage, target, &mut NoopProgress)
    }

    #[derive(Default)]
    struct CountingProgress {
        started: Vec<(String, usize, usize)>,
        completed: usize,
        bytes: u64,
        finished: bool,
    }

    impl ProgressCallback for CountingProgress {
        fn on_entry_start(&mut self, path: &str, total: usize, current: usize) {
            self.started.push((path.to_string(), total, current));
        }

        fn on_bytes_written(&mut self, bytes: u64) {
            self.bytes += bytes;
        }

        fn on_entry_complete(&mut self, _path: &str) {
            self.completed += 1;
        }

        fn on_complete(&mut self) {
            self.finished = true;
        }
    }

    #[test]
    fn test_extract_files_and_directories() {
        let (temp, storage) = vault();
        let data = ZipTestBuilder::new()
            .add_directory("week1/")
            .add_file("week1/notes.md", b"# notes")
            .add_file("week2/intro.md", b"intro")
            .build();

        let report = run(&data, &storage, &TargetRoot::root()).unwrap();

        assert_eq!(report.files_written, 2);
        assert_eq!(report.directories_created, 2);
        assert_eq!(report.bytes_written, 12);
        assert!(!report.has_warnings());
        assert_eq!(fs::read(temp.path().join("week2/intro.md")).unwrap(), b"intro");
    }

    #[test]
    fn test_missing_target_is_run_error() {
        let (_temp, storage) = vault();
        let data = create_test_zip(vec![("a.txt", b"a")]);
        let target = TargetRoot::parse("missing").unwrap();

        let result = run(&data, &storage, &target);
        assert!(matches!(
            result,
            Err(ExtractionError::TargetUnavailable { ref path, .. }) if path == "missing"
        ));
    }

    #[test]
    fn test_target_occupied_by_file() {
        let (temp, storage) = vault();
        fs::write(temp.path().join("notes"), "mine").unwrap();
        let data = create_test_zip(vec![("a.txt", b"a")]);

        let result = run(&data, &storage, &TargetRoot::parse("notes").unwrap());
        assert!(matches!(result, Err(ExtractionError::TargetUnavailable { .. })));
    }

    #[test]
    fn test_invalid_archive_writes_nothing() {
        let storage = RecordingStorage::default();
        let result = run(b"PK\x03\x04 truncated", &storage, &TargetRoot::root());

        assert!(matches!(result, Err(ExtractionError::InvalidArchive(_))));
        assert!(storage.creates.borrow().is_empty());
    }

    #[test]
    fn test_traversal_is_warning_and_run_continues() {
        let (temp, storage) = vault();
        let data = create_test_zip(vec![("../../escape.txt", b"x"), ("ok.txt", b"ok")]);

        let report = run(&data, &storage, &TargetRoot::root()).unwrap();

        assert_eq!(report.files_written, 1);
        assert_eq!(report.warnings.len(), 1);
        assert_eq!(report.warnings[0].code, "PATH_TRAVERSAL");
        assert_eq!(report.warnings[0].path, "../../escape.txt");
        assert!(temp.path().join("ok.txt").exists());
    }

    #[test]
    fn test_directory_conflict_skips_subtree_only() {
        let (temp, storage) = vault();
        fs::write(temp.path().join("week1"), "a file").unwrap();
        let data = create_test_zip(vec![
            ("week1/a.md", b"a"),
            ("week1/b.md", b"b"),
            ("week2/c.md", b"c"),
        ]);

        let report = run(&data, &storage, &TargetRoot::root()).unwrap();

        assert_eq!(report.files_written, 1);
        assert_eq!(report.warnings.len(), 2);
        assert!(report.warnings.iter().all(|w| w.code == "DIRECTORY_CONFLICT"));
        assert_eq!(report.warnings[0].path, "week1/a.md");
        assert_eq!(fs::read_to_string(temp.path().join("week1")).unwrap(), "a file");
    }

    #[test]
    fn test_directory_entry_over_file_is_conflict() {
        let storage = RecordingStorage::with(&[("docs", PathKind::File)]);
        let data = ZipTestBuilder::new().add_directory("docs/").build();

        let report = run(&data, &storage, &TargetRoot::root()).unwrap();
        assert_eq!(report.warnings.len(), 1);
        assert_eq!(report.warnings[0].code, "DIRECTORY_CONFLICT");
    }

    #[test]
    fn test_duplicate_entries_last_wins() {
        let (temp, storage) = vault();
        let data = create_test_zip(vec![("notes.md", b"first"), ("./notes.md", b"second")]);

        let report = run(&data, &storage, &TargetRoot::root()).unwrap();

        assert_eq!(report.files_written, 1);
        assert_eq!(report.files_skipped, 0);
        assert_eq!(report.bytes_written, 11);
        assert_eq!(fs::read(temp.path().join("notes.md")).unwrap(), b"second");
    }

    #[test]
    fn test_duplicate_entries_keep_existing_file() {
        let (temp, storage) = vault();
        fs::write(temp.path().join("notes.md"), "mine").unwrap();
        let data = create_test_zip(vec![("notes.md", b"first"), ("./notes.md", b"second")]);

        let report = run(&data, &storage, &TargetRoot::root()).unwrap();

        assert_eq!(report.files_written, 0);
        assert_eq!(report.files_skipped, 2);
        assert_eq!(fs::read_to_string(temp.path().join("notes.md")).unwrap(), "mine");
    }

    #[test]
    fn test_unsupported_compression_writes_nothing() {
        let (temp, storage) = vault();
        let mut data = create_test_zip(vec![("a.txt", b"first"), ("b.txt", b"second")]);
        set_zip_compression_method(&mut data, "b.txt", 12);

        let result = run(&data, &storage, &TargetRoot::root());

        assert!(matches!(result, Err(ExtractionError::InvalidArchive(_))));
        assert_eq!(fs::read_dir(temp.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_ignored_entries_counted() {
        let storage = RecordingStorage::default();
        let data = create_test_zip(vec![
            ("__MACOSX/._a.md", b"meta"),
            ("notes/.DS_Store", b"meta"),
            ("a.md", b"a"),
        ]);

        let report = run(&data, &storage, &TargetRoot::root()).unwrap();
        assert_eq!(report.entries_ignored, 2);
        assert_eq!(report.files_written, 1);
        assert_eq!(*storage.creates.borrow(), ["a.md"]);
    }

    #[test]
    fn test_tar_symlinks_are_dropped() {
        let (temp, storage) = vault();
        let data = TarTestBuilder::new()
            .add_file("real.md", b"real")
            .add_symlink("link.md", "real.md")
            .build();

        let report = run(&data, &storage, &TargetRoot::root()).unwrap();
        assert_eq!(report.files_written, 1);
        assert!(fs::symlink_metadata(temp.path().join("link.md")).is_err());
    }

    #[test]
    fn test_progress_callbacks() {
        let (_temp, storage) = vault();
        let data = create_test_zip(vec![("a.txt", b"aaa"), ("b.txt", b"bb")]);
        let mut progress = CountingProgress::default();

        ExtractionEngine::default()
            .extract(&data, &storage, &TargetRoot::root(), &mut progress)
            .unwrap();

        assert_eq!(
            progress.started,
            [("a.txt".to_string(), 2, 1), ("b.txt".to_string(), 2, 2)]
        );
        assert_eq!(progress.completed, 2);
        assert_eq!(progress.bytes, 5);
        assert!(progress.finished);
    }

    #[test]
    #[cfg(unix)]
    fn test_progress_reaches_total() {
        let (_temp, storage) = vault();
        let mut data = ZipTestBuilder::new()
            .add_symlink("link", "a.txt")
            .add_file("a.txt", b"aaa")
            .add_file("b.txt", b"corrupt me")
            .build();
        let offset = data
            .windows(b"corrupt me".len())
            .position(|w| w == b"corrupt me")
            .unwrap();
        data[offset] ^= 0xFF;
        let mut progress = CountingProgress::default();

        let report = ExtractionEngine::default()
            .extract(&data, &storage, &TargetRoot::root(), &mut progress)
            .unwrap();

        assert_eq!(report.warnings[0].code, "CORRUPT_ENTRY");
        let (_, total, current) = progress.started.last().unwrap();
        assert_eq!((*total, *current), (2, 2));
        assert_eq!(progress.completed, 2);
    }

    #[test]
    fn test_empty_archive_completes() {
        let (_temp, storage) = vault();
        let report = run(&create_test_zip(vec![]), &storage, &TargetRoot::root()).unwrap();
        assert!(report.is_noop());
        assert!(!report.has_warnings());
    }

    #[test]
    fn test_depth_limit_from_config() {
        let (_temp, storage) = vault();
        let engine = ExtractionEngine::new(ExtractionConfig::default().with_max_path_depth(2));
        let data = create_test_zip(vec![("a/b/c.txt", b"deep"), ("a/ok.txt", b"ok")]);

        let report = engine
            .extract(&data, &storage, &TargetRoot::root(), &mut NoopProgress)
            .unwrap();
        assert_eq!(report.files_written, 1);
        assert_eq!(report.warnings[0].code, "INVALID_PATH");
    }
}
