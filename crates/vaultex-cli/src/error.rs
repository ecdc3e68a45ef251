//! Error conversion utilities for CLI.
//!
//! Turns vaultex-core's typed errors into contextual anyhow errors with a
//! hint about what to do next.

use anyhow::anyhow;
use vaultex_core::ExtractionError;

/// Converts an `ExtractionError` into a user-facing error.
pub fn convert_extraction_error(err: ExtractionError, archive: &str) -> anyhow::Error {
    match err {
        ExtractionError::UnsupportedFormat => anyhow!(
            "Archive format not supported: {archive}\n\
             HINT: Supported formats: zip, tar, tar.gz"
        ),
        ExtractionError::InvalidArchive(reason) => anyhow!(
            "Invalid archive '{archive}': {reason}\n\
             HINT: The download may be incomplete or corrupted. Nothing was extracted."
        ),
        ExtractionError::TargetUnavailable { path, reason } => anyhow!(
            "Cannot extract into '{path}': {reason}\n\
             HINT: Choose another --target, or move the file that occupies this path."
        ),
        ExtractionError::Io(io_err) => {
            anyhow!("I/O error while processing '{archive}': {io_err}")
        }
    }
}

/// Maps a core result into an anyhow result with archive context.
pub fn add_archive_context<T>(
    result: Result<T, ExtractionError>,
    archive: &str,
) -> anyhow::Result<T> {
    result.map_err(|e| convert_extraction_error(e, archive))
}
