//! Validated extraction target inside the vault.

use std::fmt;

use crate::ExtractionError;
use crate::Result;
use crate::resolve::PathRejection;
use crate::resolve::normalize_segments;

/// The vault directory an archive is extracted into.
///
/// Stored as a normalized vault-relative path; the empty path denotes the
/// vault root. A `TargetRoot` only says where extraction goes: whether the
/// directory exists is checked by the engine (see
/// [`prepare_target`](crate::prepare_target)).
///
/// # Examples
///
/// ```
/// use vaultex_core::TargetRoot;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let target = TargetRoot::parse("/Course Modules//week 1/")?;
/// assert_eq!(target.as_str(), "Course Modules/week 1");
///
/// assert!(TargetRoot::parse("/")?.is_root());
/// assert!(TargetRoot::parse("../outside").is_err());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct TargetRoot(String);

impl TargetRoot {
    /// The vault root.
    #[must_use]
    pub fn root() -> Self {
        Self(String::new())
    }

    /// Parses and normalizes a target path.
    ///
    /// Accepts `/` and `\` separators, ignores leading, trailing and repeated
    /// separators as well as `.` segments.
    ///
    /// # Errors
    ///
    /// Returns `ExtractionError::TargetUnavailable` if the path contains a
    /// `..` segment, a NUL byte or a drive prefix.
    pub fn parse(raw: &str) -> Result<Self> {
        let segments =
            normalize_segments(raw).map_err(|rejection| ExtractionError::TargetUnavailable {
                path: raw.to_string(),
                reason: match rejection {
                    PathRejection::ParentTraversal => {
                        "target must not contain '..' segments".to_string()
                    }
                    PathRejection::NulByte => "target contains a NUL byte".to_string(),
                    PathRejection::Prefix => {
                        "target must not contain a drive or root prefix".to_string()
                    }
                },
            })?;
        Ok(Self(segments.join("/")))
    }

    /// Returns `true` if this is the vault root.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// Normalized vault-relative path (empty for the root).
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Appends normalized segments to this target.
    ///
    /// A root target adds no prefix, so no leading separator appears.
    pub(crate) fn join_segments(&self, segments: &[&str]) -> String {
        let relative = segments.join("/");
        if self.is_root() {
            relative
        } else if relative.is_empty() {
            self.0.clone()
        } else {
            format!("{}/{relative}", self.0)
        }
    }
}

impl fmt::Display for TargetRoot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_root() {
            f.write_str("/")
        } else {
            f.write_str(&self.0)
        }
    }
}
