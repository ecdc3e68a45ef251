//! Extraction configuration.

/// Metadata folder written by the macOS archiver next to real content.
pub const MACOS_METADATA_DIR: &str = "__MACOSX";

/// Finder metadata file present in many archives created on macOS.
pub const MACOS_METADATA_FILE: &str = ".DS_Store";

/// Configuration controlling which entries are extracted.
///
/// The defaults drop macOS archiver metadata and reject absurdly deep paths.
/// Nothing in the configuration can make extraction replace existing data.
///
/// # Examples
///
/// ```
/// use vaultex_core::ExtractionConfig;
///
/// let config = ExtractionConfig::default()
///     .with_ignored_file("Thumbs.db")
///     .with_max_path_depth(16);
///
/// assert!(config.is_ignored_file("Thumbs.db"));
/// assert!(config.is_ignored_dir("__MACOSX"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionConfig {
    /// Top-level directory names whose whole subtree is dropped.
    pub ignored_dir_prefixes: Vec<String>,

    /// File names dropped wherever they appear.
    pub ignored_file_names: Vec<String>,

    /// Maximum number of segments in an entry path.
    pub max_path_depth: usize,
}

impl Default for ExtractionConfig {
    /// Default values:
    /// - `ignored_dir_prefixes`: `["__MACOSX"]`
    /// - `ignored_file_names`: `[".DS_Store"]`
    /// - `max_path_depth`: 64
    fn default() -> Self {
        Self {
            ignored_dir_prefixes: vec![MACOS_METADATA_DIR.to_string()],
            ignored_file_names: vec![MACOS_METADATA_FILE.to_string()],
            max_path_depth: 64,
        }
    }
}

impl ExtractionConfig {
    /// Adds a top-level directory to drop.
    #[must_use]
    pub fn with_ignored_dir(mut self, name: impl Into<String>) -> Self {
        self.ignored_dir_prefixes.push(name.into());
        self
    }

    /// Adds a file name to drop.
    #[must_use]
    pub fn with_ignored_file(mut self, name: impl Into<String>) -> Self {
        self.ignored_file_names.push(name.into());
        self
    }

    /// Sets the maximum path depth.
    #[must_use]
    pub const fn with_max_path_depth(mut self, depth: usize) -> Self {
        self.max_path_depth = depth;
        self
    }

    /// Returns `true` if a first path segment marks an ignored subtree.
    #[must_use]
    pub fn is_ignored_dir(&self, segment: &str) -> bool {
        self.ignored_dir_prefixes.iter().any(|dir| dir == segment)
    }

    /// Returns `true` if a final path segment is an ignored file name.
    #[must_use]
    pub fn is_ignored_file(&self, segment: &str) -> bool {
        self.ignored_file_names.iter().any(|name| name == segment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ExtractionConfig::default();
        assert!(config.is_ignored_dir("__MACOSX"));
        assert!(config.is_ignored_file(".DS_Store"));
        assert_eq!(config.max_path_depth, 64);
    }

    #[test]
    fn test_matching_is_exact() {
        let config = ExtractionConfig::default();
        assert!(!config.is_ignored_dir("__macosx"));
        assert!(!config.is_ignored_dir("__MACOSX_backup"));
        assert!(!config.is_ignored_file(".DS_Store.txt"));
        assert!(!config.is_ignored_file("DS_Store"));
    }

    #[test]
    fn test_builder_methods() {
        let config = ExtractionConfig::default()
            .with_ignored_dir(".git")
            .with_ignored_file("Thumbs.db")
            .with_max_path_depth(8);
        assert!(config.is_ignored_dir(".git"));
        assert!(config.is_ignored_dir("__MACOSX"));
        assert!(config.is_ignored_file("Thumbs.db"));
        assert_eq!(config.max_path_depth, 8);
    }
}
