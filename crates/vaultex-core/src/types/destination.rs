//! Resolved, normalized destination of an archive entry.

use super::TargetRoot;

/// Where an archive entry lands inside the vault.
///
/// `normalized_path` is the full vault-relative path of the entry;
/// `parent_path` is that path without its final segment (empty when the
/// parent is the vault root). For a directory entry `normalized_path` is the
/// directory itself.
///
/// Only [`resolve`](crate::resolve::resolve) constructs values of this type,
/// which guarantees `normalized_path` lies inside the target subtree.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResolvedDestination {
    normalized_path: String,
    parent_path: String,
}

impl ResolvedDestination {
    /// Builds a destination from a target and already-normalized, non-empty
    /// entry segments.
    pub(crate) fn from_segments(target: &TargetRoot, segments: &[&str]) -> Self {
        let normalized_path = target.join_segments(segments);
        let parent_path = normalized_path
            .rfind('/')
            .map_or_else(String::new, |idx| normalized_path[..idx].to_string());
        Self {
            normalized_path,
            parent_path,
        }
    }

    /// Full vault-relative path.
    #[must_use]
    pub fn normalized_path(&self) -> &str {
        &self.normalized_path
    }

    /// Vault-relative path of the containing directory.
    #[must_use]
    pub fn parent_path(&self) -> &str {
        &self.parent_path
    }

    /// Final path segment.
    #[must_use]
    pub fn file_name(&self) -> &str {
        self.normalized_path
            .rsplit('/')
            .next()
            .unwrap_or(&self.normalized_path)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_from_segments_under_root() {
        let dest = ResolvedDestination::from_segments(&TargetRoot::root(), &["a.txt"]);
        assert_eq!(dest.normalized_path(), "a.txt");
        assert_eq!(dest.parent_path(), "");
        assert_eq!(dest.file_name(), "a.txt");
    }

    #[test]
    fn test_from_segments_under_target() {
        let target = TargetRoot::parse("Course Modules").unwrap();
        let dest = ResolvedDestination::from_segments(&target, &["week1", "slides.pdf"]);
        assert_eq!(dest.normalized_path(), "Course Modules/week1/slides.pdf");
        assert_eq!(dest.parent_path(), "Course Modules/week1");
        assert_eq!(dest.file_name(), "slides.pdf");
    }

    #[test]
    fn test_directory_parent_is_own_parent() {
        let target = TargetRoot::parse("Course Modules").unwrap();
        let dest = ResolvedDestination::from_segments(&target, &["week1"]);
        assert_eq!(dest.normalized_path(), "Course Modules/week1");
        assert_eq!(dest.parent_path(), "Course Modules");
    }
}
