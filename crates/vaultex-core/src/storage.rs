//! Storage abstraction over the vault tree.
//!
//! Every component that touches the vault does so through [`Storage`]: a
//! single `stat_path` query returning [`PathKind`], two creation calls that
//! never replace existing entities, and `replace_file` for files the current
//! run wrote itself. [`FsStorage`] implements it on top of a local directory.

use std::fs;
use std::fs::OpenOptions;
use std::io;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;

use crate::ExtractionError;
use crate::Result;

/// What currently occupies a vault path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PathKind {
    /// Nothing exists at the path.
    Absent,

    /// A non-directory entity exists at the path.
    File,

    /// A directory exists at the path.
    Directory,
}

/// Operations the extraction engine needs from a vault.
///
/// Paths are vault-relative, `/`-separated and already normalized; the empty
/// string is the vault root.
pub trait Storage {
    /// Reports what occupies `path`.
    ///
    /// # Errors
    ///
    /// Returns an error only when the state cannot be determined (for
    /// example permission denied). A missing path is `Ok(PathKind::Absent)`.
    fn stat_path(&self, path: &str) -> io::Result<PathKind>;

    /// Creates a single directory. Its parent must already exist.
    ///
    /// # Errors
    ///
    /// Returns `io::ErrorKind::AlreadyExists` if anything occupies `path`.
    fn create_dir(&self, path: &str) -> io::Result<()>;

    /// Creates a new file with `data`. Never replaces an existing entity.
    ///
    /// # Errors
    ///
    /// Returns `io::ErrorKind::AlreadyExists` if anything occupies `path`.
    fn create_file_new(&self, path: &str, data: &[u8]) -> io::Result<()>;

    /// Replaces the contents of an existing file.
    ///
    /// The engine only calls this for files created earlier in the same run;
    /// content that was in the vault before the run is never replaced.
    ///
    /// # Errors
    ///
    /// Returns `io::ErrorKind::NotFound` if no file exists at `path`.
    fn replace_file(&self, path: &str, data: &[u8]) -> io::Result<()>;
}

/// Vault backed by a directory on the local filesystem.
///
/// Symlinks inside the vault are reported as [`PathKind::File`], so the
/// engine never writes or creates directories through them.
///
/// # Examples
///
/// ```no_run
/// use vaultex_core::FsStorage;
/// use vaultex_core::PathKind;
/// use vaultex_core::Storage;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let vault = FsStorage::open("/home/me/vault")?;
/// assert_eq!(vault.stat_path("")?, PathKind::Directory);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FsStorage {
    root: PathBuf,
}

impl FsStorage {
    /// Opens a vault rooted at an existing directory.
    ///
    /// The root is canonicalized to an absolute path.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The path does not exist
    /// - The path exists but is not a directory
    /// - The path cannot be canonicalized
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        if !root.exists() {
            return Err(ExtractionError::Io(io::Error::new(
                io::ErrorKind::NotFound,
                format!("vault directory does not exist: {}", root.display()),
            )));
        }

        if !root.is_dir() {
            return Err(ExtractionError::Io(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("vault path is not a directory: {}", root.display()),
            )));
        }

        let canonical = root.canonicalize().map_err(|e| {
            ExtractionError::Io(io::Error::new(
                e.kind(),
                format!("failed to canonicalize path {}: {}", root.display(), e),
            ))
        })?;

        Ok(Self { root: canonical })
    }

    /// Absolute vault root.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Maps a vault-relative path onto the filesystem.
    #[must_use]
    pub fn full_path(&self, path: &str) -> PathBuf {
        path.split('/')
            .filter(|segment| !segment.is_empty())
            .fold(self.root.clone(), |acc, segment| acc.join(segment))
    }
}

impl Storage for FsStorage {
    fn stat_path(&self, path: &str) -> io::Result<PathKind> {
        match fs::symlink_metadata(self.full_path(path)) {
            Ok(meta) if meta.is_dir() => Ok(PathKind::Directory),
            Ok(_) => Ok(PathKind::File),
            Err(e)
                if matches!(
                    e.kind(),
                    io::ErrorKind::NotFound | io::ErrorKind::NotADirectory
                ) =>
            {
                Ok(PathKind::Absent)
            }
            Err(e) => Err(e),
        }
    }

    fn create_dir(&self, path: &str) -> io::Result<()> {
        fs::create_dir(self.full_path(path))
    }

    fn create_file_new(&self, path: &str, data: &[u8]) -> io::Result<()> {
        let full = self.full_path(path);
        // create_new fails with AlreadyExists instead of truncating.
        let mut file = OpenOptions::new().write(true).create_new(true).open(&full)?;
        if let Err(e) = file.write_all(data).and_then(|()| file.sync_all()) {
            drop(file);
            // The file is ours and incomplete; leave no partial content behind.
            let _ = fs::remove_file(&full);
            return Err(e);
        }
        Ok(())
    }

    fn replace_file(&self, path: &str, data: &[u8]) -> io::Result<()> {
        let mut file = OpenOptions::new()
            .write(true)
            .truncate(true)
            .open(self.full_path(path))?;
        file.write_all(data)?;
        file.sync_all()
    }
}
