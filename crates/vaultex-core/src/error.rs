//! Error types for archive extraction.
//!
//! Two layers exist. [`ExtractionError`] ends a whole run and is returned to
//! the caller. [`EntryError`] concerns a single archive entry; the
//! orchestrator turns it into an [`EntryWarning`](crate::EntryWarning) and
//! moves on to the next entry.

use std::io;
use thiserror::Error;

/// Result type alias using `ExtractionError`.
pub type Result<T> = std::result::Result<T, ExtractionError>;

/// Run-level failures. Nothing is written once one of these is returned
/// from the decode or target checks.
#[derive(Error, Debug)]
pub enum ExtractionError {
    /// I/O operation failed outside of per-entry processing.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The buffer is not a recognized archive container.
    #[error("unsupported archive format")]
    UnsupportedFormat,

    /// Archive is corrupted, truncated, or uses an unsupported encoding.
    #[error("invalid archive: {0}")]
    InvalidArchive(String),

    /// The target root is not a usable directory.
    #[error("target '{path}' is unavailable: {reason}")]
    TargetUnavailable {
        /// Vault-relative target path.
        path: String,
        /// Why the target cannot be used.
        reason: String,
    },
}

impl ExtractionError {
    /// Returns `true` if the archive bytes themselves were rejected.
    ///
    /// # Examples
    ///
    /// ```
    /// use vaultex_core::ExtractionError;
    ///
    /// let err = ExtractionError::InvalidArchive("truncated".to_string());
    /// assert!(err.is_archive_error());
    ///
    /// let err = ExtractionError::TargetUnavailable {
    ///     path: "notes".to_string(),
    ///     reason: "a file occupies this path".to_string(),
    /// };
    /// assert!(!err.is_archive_error());
    /// ```
    #[must_use]
    pub const fn is_archive_error(&self) -> bool {
        matches!(self, Self::UnsupportedFormat | Self::InvalidArchive(_))
    }

    /// Returns a context string for this error, if available.
    #[must_use]
    pub fn context(&self) -> Option<&str> {
        match self {
            Self::InvalidArchive(msg) => Some(msg),
            Self::TargetUnavailable { reason, .. } => Some(reason),
            _ => None,
        }
    }
}

/// Failure confined to one archive entry.
#[derive(Error, Debug)]
pub enum EntryError {
    /// A non-directory occupies a path needed as a directory.
    #[error("cannot create directory '{path}': a file already occupies this path")]
    DirectoryConflict {
        /// Vault-relative path of the blocking entity.
        path: String,
    },

    /// A directory occupies the path needed for a file.
    #[error("cannot write file '{path}': a directory already occupies this path")]
    WriteConflict {
        /// Vault-relative path of the entry.
        path: String,
    },

    /// An underlying storage call failed for a reason other than
    /// "already exists".
    #[error("failed to write '{path}': {source}")]
    WriteError {
        /// Vault-relative path the operation targeted.
        path: String,
        /// The storage error.
        #[source]
        source: io::Error,
    },

    /// The entry name contains a `..` segment.
    #[error("path traversal rejected: {path}")]
    PathTraversal {
        /// Entry name as stored in the archive.
        path: String,
    },

    /// The entry name cannot be used as a vault path.
    #[error("invalid entry path '{path}': {reason}")]
    InvalidPath {
        /// Entry name as stored in the archive.
        path: String,
        /// What is wrong with it.
        reason: String,
    },

    /// The entry's data could not be decoded.
    #[error("corrupt entry '{path}': {reason}")]
    CorruptEntry {
        /// Entry name as stored in the archive.
        path: String,
        /// Decoder message.
        reason: String,
    },
}

impl EntryError {
    /// Stable machine-readable code for this error.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::DirectoryConflict { .. } => "DIRECTORY_CONFLICT",
            Self::WriteConflict { .. } => "WRITE_CONFLICT",
            Self::WriteError { .. } => "WRITE_ERROR",
            Self::PathTraversal { .. } => "PATH_TRAVERSAL",
            Self::InvalidPath { .. } => "INVALID_PATH",
            Self::CorruptEntry { .. } => "CORRUPT_ENTRY",
        }
    }

    /// Path the error refers to.
    #[must_use]
    pub fn path(&self) -> &str {
        match self {
            Self::DirectoryConflict { path }
            | Self::WriteConflict { path }
            | Self::WriteError { path, .. }
            | Self::PathTraversal { path }
            | Self::InvalidPath { path, .. }
            | Self::CorruptEntry { path, .. } => path,
        }
    }

    /// Returns `true` if the entry collided with existing vault content.
    #[must_use]
    pub const fn is_conflict(&self) -> bool {
        matches!(
            self,
            Self::DirectoryConflict { .. } | Self::WriteConflict { .. }
        )
    }
}
