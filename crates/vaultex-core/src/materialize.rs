//! Directory materialization with per-run memoization.

use std::collections::HashSet;

use tracing::debug;

use crate::EntryError;
use crate::storage::PathKind;
use crate::storage::Storage;

/// Ensures directory chains exist in a vault.
///
/// A materializer lives for exactly one extraction run. It remembers every
/// directory it has confirmed (pre-existing or created) so entries sharing
/// ancestors do not touch storage again, and every path found blocked by a
/// file so the rest of that subtree fails fast. It also tracks the files the
/// run has created, which later entries for the same path may replace.
///
/// # Examples
///
/// ```no_run
/// use vaultex_core::FsStorage;
/// use vaultex_core::materialize::FolderMaterializer;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let vault = FsStorage::open("/home/me/vault")?;
/// let mut folders = FolderMaterializer::new(&vault);
/// folders.ensure_directory("Course Modules/week1")?;
/// assert_eq!(folders.created_count(), 2);
/// # Ok(())
/// # }
/// ```
pub struct FolderMaterializer<'s, S: Storage + ?Sized> {
    storage: &'s S,
    confirmed: HashSet<String>,
    blocked: HashSet<String>,
    written: HashSet<String>,
    created: usize,
}

impl<'s, S: Storage + ?Sized> FolderMaterializer<'s, S> {
    /// Creates a materializer with an empty directory set.
    #[must_use]
    pub fn new(storage: &'s S) -> Self {
        Self {
            storage,
            confirmed: HashSet::new(),
            blocked: HashSet::new(),
            written: HashSet::new(),
            created: 0,
        }
    }

    /// The storage this materializer operates on.
    #[must_use]
    pub fn storage(&self) -> &'s S {
        self.storage
    }

    /// Number of directories this materializer created.
    #[must_use]
    pub fn created_count(&self) -> usize {
        self.created
    }

    /// Returns `true` if `path` is known to exist as a directory.
    #[must_use]
    pub fn is_confirmed(&self, path: &str) -> bool {
        path.is_empty() || self.confirmed.contains(path)
    }

    /// Remembers that this run created the file at `path`.
    pub fn record_written(&mut self, path: &str) {
        self.written.insert(path.to_string());
    }

    /// Returns `true` if this run created the file at `path`.
    #[must_use]
    pub fn written_this_run(&self, path: &str) -> bool {
        self.written.contains(path)
    }

    /// Ensures `path` and all its ancestors exist as directories.
    ///
    /// Ancestors are handled root-to-leaf. The vault root always exists and
    /// is never created.
    ///
    /// # Errors
    ///
    /// - `EntryError::DirectoryConflict` if a file occupies `path` or one of
    ///   its ancestors
    /// - `EntryError::WriteError` if storage fails for another reason
    pub fn ensure_directory(&mut self, path: &str) -> Result<(), EntryError> {
        if self.is_confirmed(path) {
            return Ok(());
        }

        let ends = path
            .match_indices('/')
            .map(|(idx, _)| idx)
            .chain(std::iter::once(path.len()));

        for end in ends {
            let prefix = &path[..end];
            if self.blocked.contains(prefix) {
                return Err(EntryError::DirectoryConflict {
                    path: prefix.to_string(),
                });
            }
            if !self.confirmed.contains(prefix) {
                self.ensure_single(prefix)?;
            }
        }

        Ok(())
    }

    /// Ensures one directory whose parent is already confirmed.
    fn ensure_single(&mut self, path: &str) -> Result<(), EntryError> {
        match self.stat(path)? {
            PathKind::Directory => {}
            PathKind::File => return Err(self.block(path)),
            PathKind::Absent => match self.storage.create_dir(path) {
                Ok(()) => {
                    debug!(path, "created directory");
                    self.created += 1;
                }
                // Another writer may have won the race; trust what is there now.
                Err(source) => match self.stat(path)? {
                    PathKind::Directory => {}
                    PathKind::File => return Err(self.block(path)),
                    PathKind::Absent => {
                        return Err(EntryError::WriteError {
                            path: path.to_string(),
                            source,
                        });
                    }
                },
            },
        }

        self.confirmed.insert(path.to_string());
        Ok(())
    }

    fn stat(&self, path: &str) -> Result<PathKind, EntryError> {
        self.storage
            .stat_path(path)
            .map_err(|source| EntryError::WriteError {
                path: path.to_string(),
                source,
            })
    }

    fn block(&mut self, path: &str) -> EntryError {
        self.blocked.insert(path.to_string());
        EntryError::DirectoryConflict {
            path: path.to_string(),
        }
    }
}
