//! High-level public API for extracting archives into a vault.

use std::path::Path;

use crate::ExtractionConfig;
use crate::ExtractionError;
use crate::ExtractionReport;
use crate::NoopProgress;
use crate::ProgressCallback;
use crate::Result;
use crate::extraction::ExtractionEngine;
use crate::inspection::ArchiveManifest;
use crate::inspection::inspect;
use crate::materialize::FolderMaterializer;
use crate::storage::FsStorage;
use crate::storage::Storage;
use crate::types::TargetRoot;

/// Extracts an in-memory archive into `target` inside `storage`.
///
/// The format (zip, tar, tar.gz) is detected from the leading bytes. The
/// target must already exist; use [`prepare_target`] first if it may not.
///
/// # Arguments
///
/// * `bytes` - Complete archive contents
/// * `storage` - Vault to extract into
/// * `target` - Directory inside the vault that receives the entries
/// * `config` - Extraction configuration
///
/// # Errors
///
/// Returns an error if:
/// - The target is not an existing directory
/// - The archive format is unsupported
/// - The archive container is corrupt
///
/// Problems with individual entries are reported in
/// [`ExtractionReport::warnings`] instead.
pub fn extract_bytes<S: Storage + ?Sized>(
    bytes: &[u8],
    storage: &S,
    target: &TargetRoot,
    config: &ExtractionConfig,
) -> Result<ExtractionReport> {
    extract_bytes_with_progress(bytes, storage, target, config, &mut NoopProgress)
}

/// Extracts an in-memory archive with progress reporting.
///
/// Same as [`extract_bytes`] but calls `progress` for every entry.
///
/// # Errors
///
/// See [`extract_bytes`].
pub fn extract_bytes_with_progress<S: Storage + ?Sized>(
    bytes: &[u8],
    storage: &S,
    target: &TargetRoot,
    config: &ExtractionConfig,
    progress: &mut dyn ProgressCallback,
) -> Result<ExtractionReport> {
    ExtractionEngine::new(config.clone()).extract(bytes, storage, target, progress)
}

/// Makes sure `target` exists as a directory, creating missing segments.
///
/// # Errors
///
/// Returns `ExtractionError::TargetUnavailable` if a file occupies the
/// target or one of its ancestors, or the directories cannot be created.
///
/// # Examples
///
/// ```no_run
/// use vaultex_core::FsStorage;
/// use vaultex_core::TargetRoot;
/// use vaultex_core::prepare_target;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let vault = FsStorage::open("/home/me/vault")?;
/// prepare_target(&vault, &TargetRoot::parse("Course Modules")?)?;
/// # Ok(())
/// # }
/// ```
pub fn prepare_target<S: Storage + ?Sized>(storage: &S, target: &TargetRoot) -> Result<()> {
    FolderMaterializer::new(storage)
        .ensure_directory(target.as_str())
        .map_err(|e| ExtractionError::TargetUnavailable {
            path: target.to_string(),
            reason: e.to_string(),
        })
}

/// Extracts an archive into a vault on the local filesystem.
///
/// Opens `vault_dir`, creates `target` inside it if missing, then extracts.
///
/// # Errors
///
/// Returns an error if:
/// - `vault_dir` does not exist or is not a directory
/// - The target cannot be prepared
/// - The archive cannot be decoded
///
/// # Examples
///
/// ```no_run
/// use vaultex_core::ExtractionConfig;
/// use vaultex_core::TargetRoot;
/// use vaultex_core::extract_into_vault;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let bytes = std::fs::read("course.zip")?;
/// let target = TargetRoot::parse("Course Modules")?;
/// let config = ExtractionConfig::default();
/// let report = extract_into_vault(&bytes, "/home/me/vault", &target, &config)?;
/// println!("Extracted {} files", report.files_written);
/// # Ok(())
/// # }
/// ```
pub fn extract_into_vault<P: AsRef<Path>>(
    bytes: &[u8],
    vault_dir: P,
    target: &TargetRoot,
    config: &ExtractionConfig,
) -> Result<ExtractionReport> {
    extract_into_vault_with_progress(bytes, vault_dir, target, config, &mut NoopProgress)
}

/// Extracts an archive into a local vault with progress reporting.
///
/// # Errors
///
/// See [`extract_into_vault`].
pub fn extract_into_vault_with_progress<P: AsRef<Path>>(
    bytes: &[u8],
    vault_dir: P,
    target: &TargetRoot,
    config: &ExtractionConfig,
    progress: &mut dyn ProgressCallback,
) -> Result<ExtractionReport> {
    let storage = FsStorage::open(vault_dir.as_ref())?;
    prepare_target(&storage, target)?;
    extract_bytes_with_progress(bytes, &storage, target, config, progress)
}

/// Lists archive contents without extracting.
///
/// Every entry is classified the way an extraction run would treat it:
/// extracted, silently ignored, or rejected with a reason. Nothing is
/// written.
///
/// # Errors
///
/// Returns an error if the archive format is unsupported or the container
/// is corrupt.
///
/// # Examples
///
/// ```
/// use vaultex_core::ExtractionConfig;
/// use vaultex_core::list_archive;
/// use vaultex_core::test_utils::create_test_zip;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let bytes = create_test_zip(vec![
///     ("week1/slides.pdf", b"%PDF"),
///     ("__MACOSX/._slides.pdf", b""),
/// ]);
/// let manifest = list_archive(&bytes, &ExtractionConfig::default())?;
/// assert_eq!(manifest.extractable().count(), 1);
/// assert_eq!(manifest.ignored_count(), 1);
/// # Ok(())
/// # }
/// ```
pub fn list_archive(bytes: &[u8], config: &ExtractionConfig) -> Result<ArchiveManifest> {
    inspect(bytes, config)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::test_utils::create_test_zip;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_extract_into_vault_creates_target() {
        let temp = TempDir::new().expect("failed to create temp dir");
        let bytes = create_test_zip(vec![("week1/notes.md", b"notes")]);
        let target = TargetRoot::parse("Courses/Rust").unwrap();

        let report =
            extract_into_vault(&bytes, temp.path(), &target, &ExtractionConfig::default()).unwrap();

        assert_eq!(report.files_written, 1);
        assert!(temp.path().join("Courses/Rust/week1/notes.md").is_file());
    }

    #[test]
    fn test_extract_into_missing_vault() {
        let bytes = create_test_zip(vec![("a.txt", b"a")]);
        let result = extract_into_vault(
            &bytes,
            "/nonexistent/vault/dir",
            &TargetRoot::root(),
            &ExtractionConfig::default(),
        );
        assert!(matches!(result, Err(ExtractionError::Io(_))));
    }

    #[test]
    fn test_prepare_target_blocked_by_file() {
        let temp = TempDir::new().expect("failed to create temp dir");
        fs::write(temp.path().join("Courses"), "not a dir").unwrap();
        let storage = FsStorage::open(temp.path()).unwrap();

        let result = prepare_target(&storage, &TargetRoot::parse("Courses/Rust").unwrap());
        assert!(matches!(
            result,
            Err(ExtractionError::TargetUnavailable { ref path, .. }) if path == "Courses/Rust"
        ));
    }

    #[test]
    fn test_prepare_root_is_noop() {
        let temp = TempDir::new().expect("failed to create temp dir");
        let storage = FsStorage::open(temp.path()).unwrap();
        prepare_target(&storage, &TargetRoot::root()).unwrap();
        assert_eq!(fs::read_dir(temp.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_list_archive_rejects_unknown_format() {
        let result = list_archive(b"plain text", &ExtractionConfig::default());
        assert!(matches!(result, Err(ExtractionError::UnsupportedFormat)));
    }
}
