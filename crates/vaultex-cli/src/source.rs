//! Loading archive bytes.
//!
//! The engine works on a complete in-memory buffer, so the archive is read
//! in full before anything else happens. A read failure stops the command
//! before decoding starts.

use anyhow::Context;
use anyhow::Result;
use std::fs;
use std::io;
use std::io::Read;
use std::path::Path;
use tracing::debug;

/// Reads the whole archive from `path`, or from stdin when `path` is `-`.
pub fn read_archive(path: &Path) -> Result<Vec<u8>> {
    let bytes = if is_stdin(path) {
        let mut buffer = Vec::new();
        io::stdin()
            .lock()
            .read_to_end(&mut buffer)
            .context("failed to read archive from stdin")?;
        buffer
    } else {
        fs::read(path).with_context(|| format!("failed to read archive '{}'", path.display()))?
    };

    debug!(source = %path.display(), bytes = bytes.len(), "archive loaded");
    Ok(bytes)
}

/// Display name used in messages.
pub fn display_name(path: &Path) -> String {
    if is_stdin(path) {
        "<stdin>".to_string()
    } else {
        path.display().to_string()
    }
}

fn is_stdin(path: &Path) -> bool {
    path.as_os_str() == "-"
}
