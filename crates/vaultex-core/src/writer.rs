//! Conflict-aware file writing.
//!
//! Existing vault content always wins: a file already present at the
//! destination before the run is left untouched and the entry is skipped,
//! whatever the contents. This is what makes re-running an extraction a
//! no-op. Among entries of one run that land on the same path, the last one
//! in archive order wins.

use std::io;

use tracing::debug;

use crate::EntryError;
use crate::materialize::FolderMaterializer;
use crate::storage::PathKind;
use crate::storage::Storage;
use crate::types::ResolvedDestination;

/// Result of writing one file entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    /// A new file was created.
    Written {
        /// Number of bytes written.
        bytes: u64,
    },

    /// A file created earlier in this run was replaced by a later entry.
    Replaced {
        /// Number of bytes written.
        bytes: u64,
    },

    /// Something already existed at the destination; nothing was changed.
    Skipped,
}

/// Writes `data` to `dest` unless the destination is occupied.
///
/// | Occupant           | Outcome                                  |
/// |--------------------|------------------------------------------|
/// | nothing            | parent ensured, file created → `Written` |
/// | file from this run | contents replaced → `Replaced`           |
/// | other file         | `Skipped`                                |
/// | directory          | `Err(EntryError::WriteConflict)`         |
///
/// An `AlreadyExists` failure from the create call means another writer got
/// there first and is reported as `Skipped`.
///
/// # Errors
///
/// - `EntryError::WriteConflict` if a directory occupies the destination
/// - `EntryError::DirectoryConflict` if the parent chain is blocked by a file
/// - `EntryError::WriteError` for any other storage failure
pub fn write_entry<S: Storage + ?Sized>(
    folders: &mut FolderMaterializer<'_, S>,
    dest: &ResolvedDestination,
    data: &[u8],
) -> Result<WriteOutcome, EntryError> {
    let path = dest.normalized_path();
    let storage = folders.storage();

    // A parent blocked by a file stats as Absent here; the conflict then
    // surfaces from ensure_directory.
    let occupant = storage
        .stat_path(path)
        .map_err(|source| EntryError::WriteError {
            path: path.to_string(),
            source,
        })?;

    match occupant {
        PathKind::File if folders.written_this_run(path) => {
            storage
                .replace_file(path, data)
                .map_err(|source| EntryError::WriteError {
                    path: path.to_string(),
                    source,
                })?;
            debug!(path, bytes = data.len(), "replaced file written earlier in this run");
            Ok(WriteOutcome::Replaced {
                bytes: data.len() as u64,
            })
        }
        PathKind::File => {
            debug!(path, "destination exists, skipping");
            Ok(WriteOutcome::Skipped)
        }
        PathKind::Directory => Err(EntryError::WriteConflict {
            path: path.to_string(),
        }),
        PathKind::Absent => {
            folders.ensure_directory(dest.parent_path())?;
            match storage.create_file_new(path, data) {
                Ok(()) => {
                    folders.record_written(path);
                    debug!(path, bytes = data.len(), "wrote file");
                    Ok(WriteOutcome::Written {
                        bytes: data.len() as u64,
                    })
                }
                Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                    debug!(path, "destination appeared concurrently, skipping");
                    Ok(WriteOutcome::Skipped)
                }
                Err(source) => Err(EntryError::WriteError {
                    path: path.to_string(),
                    source,
                }),
            }
        }
    }
}
