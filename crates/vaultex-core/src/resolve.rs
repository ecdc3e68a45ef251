//! Destination path resolution.
//!
//! Maps an archive entry name onto a vault path below the target root. This
//! is the only place entry names are interpreted, so it carries the
//! path-safety guarantee: no resolved path ever leaves the target subtree.

use std::path::Component;
use std::path::Path;

use tracing::debug;

use crate::EntryError;
use crate::ExtractionConfig;
use crate::types::ResolvedDestination;
use crate::types::TargetRoot;

/// Outcome of resolving one entry name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The entry is platform metadata or empty; drop it without reporting.
    Ignore,

    /// The entry should be extracted here.
    Destination(ResolvedDestination),
}

/// Reasons a raw path cannot be normalized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PathRejection {
    ParentTraversal,
    NulByte,
    /// A segment carries a drive letter or other root prefix (`C:`), which
    /// `Path::join` would treat as absolute on Windows.
    Prefix,
}

/// Splits a raw path into normalized segments.
///
/// Both `/` and `\` separate segments. Empty segments (leading, trailing or
/// repeated separators) and `.` are dropped; `..`, NUL bytes and drive
/// prefixes are rejected rather than resolved. Drive prefixes are rejected on
/// every platform so an archive resolves the same way everywhere.
pub(crate) fn normalize_segments(raw: &str) -> Result<Vec<&str>, PathRejection> {
    if raw.contains('\0') {
        return Err(PathRejection::NulByte);
    }

    let mut segments = Vec::new();
    for segment in raw.split(['/', '\\']) {
        match segment {
            "" | "." => {}
            ".." => return Err(PathRejection::ParentTraversal),
            _ if !is_plain_name(segment) => return Err(PathRejection::Prefix),
            _ => segments.push(segment),
        }
    }
    Ok(segments)
}

/// A segment is plain when it has no drive letter and the host platform
/// parses it as exactly one normal path component.
fn is_plain_name(segment: &str) -> bool {
    let mut chars = segment.chars();
    let drive = matches!(
        (chars.next(), chars.next()),
        (Some(letter), Some(':')) if letter.is_ascii_alphabetic()
    );

    let mut components = Path::new(segment).components();
    let single = matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    );

    !drive && single
}

/// Resolves an archive entry name against a target root.
///
/// # Ignore policy
///
/// Returns [`Resolution::Ignore`] when the normalized name is empty, its first
/// segment is a configured metadata directory (`__MACOSX`), or its final
/// segment is a configured metadata file (`.DS_Store`).
///
/// # Errors
///
/// - `EntryError::PathTraversal` if the name contains a `..` segment
/// - `EntryError::InvalidPath` for NUL bytes, drive prefixes, or paths deeper
///   than `config.max_path_depth`
///
/// # Examples
///
/// ```
/// use vaultex_core::ExtractionConfig;
/// use vaultex_core::TargetRoot;
/// use vaultex_core::resolve::Resolution;
/// use vaultex_core::resolve::resolve;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let target = TargetRoot::parse("Course Modules")?;
/// let config = ExtractionConfig::default();
///
/// let Resolution::Destination(dest) = resolve(&target, "week1/slides.pdf", &config)? else {
///     panic!("expected a destination");
/// };
/// assert_eq!(dest.normalized_path(), "Course Modules/week1/slides.pdf");
///
/// assert_eq!(resolve(&target, "__MACOSX/._slides.pdf", &config)?, Resolution::Ignore);
/// assert!(resolve(&target, "../../escape.txt", &config).is_err());
/// # Ok(())
/// # }
/// ```
pub fn resolve(
    target: &TargetRoot,
    entry_path: &str,
    config: &ExtractionConfig,
) -> Result<Resolution, EntryError> {
    let segments = normalize_segments(entry_path).map_err(|rejection| match rejection {
        PathRejection::ParentTraversal => EntryError::PathTraversal {
            path: entry_path.to_string(),
        },
        PathRejection::NulByte => EntryError::InvalidPath {
            path: entry_path.to_string(),
            reason: "contains a NUL byte".to_string(),
        },
        PathRejection::Prefix => EntryError::InvalidPath {
            path: entry_path.to_string(),
            reason: "contains a drive or root prefix".to_string(),
        },
    })?;

    let (Some(first), Some(last)) = (segments.first(), segments.last()) else {
        debug!(entry = entry_path, "ignoring empty entry path");
        return Ok(Resolution::Ignore);
    };

    if config.is_ignored_dir(first) || config.is_ignored_file(last) {
        debug!(entry = entry_path, "ignoring metadata entry");
        return Ok(Resolution::Ignore);
    }

    if segments.len() > config.max_path_depth {
        return Err(EntryError::InvalidPath {
            path: entry_path.to_string(),
            reason: format!(
                "path depth {} exceeds maximum {}",
                segments.len(),
                config.max_path_depth
            ),
        });
    }

    Ok(Resolution::Destination(ResolvedDestination::from_segments(
        target, &segments,
    )))
}
