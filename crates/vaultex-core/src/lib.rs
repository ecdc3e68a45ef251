//! Non-destructive archive extraction into existing directory trees.
//!
//! `vaultex-core` unpacks an in-memory archive (zip, tar, tar.gz) into a
//! subtree of a "vault": a directory hierarchy that already holds user data.
//! Extraction never replaces anything that is already there:
//!
//! - files that already exist are skipped, whatever their contents
//! - missing intermediate directories are created on demand
//! - an entry colliding with an entity of the wrong kind is reported as a
//!   warning and the run continues
//! - entry names that would escape the target subtree are rejected
//! - platform metadata (`__MACOSX/`, `.DS_Store`) is dropped silently
//!
//! Re-running the same archive into the same target is therefore a no-op.
//!
//! # Examples
//!
//! ```no_run
//! use vaultex_core::ExtractionConfig;
//! use vaultex_core::TargetRoot;
//! use vaultex_core::extract_into_vault;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let bytes = std::fs::read("course.zip")?;
//! let target = TargetRoot::parse("Course Modules")?;
//! let config = ExtractionConfig::default();
//! let report = extract_into_vault(&bytes, "/home/me/vault", &target, &config)?;
//! println!("Wrote {} new files", report.files_written);
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod api;
pub mod config;
pub mod error;
pub mod extraction;
pub mod formats;
pub mod inspection;
pub mod materialize;
pub mod report;
pub mod resolve;
pub mod storage;
pub mod types;
pub mod writer;

#[doc(hidden)]
pub mod test_utils;

// Re-export main API types
pub use api::extract_bytes;
pub use api::extract_bytes_with_progress;
pub use api::extract_into_vault;
pub use api::extract_into_vault_with_progress;
pub use api::list_archive;
pub use api::prepare_target;
pub use config::ExtractionConfig;
pub use error::EntryError;
pub use error::ExtractionError;
pub use error::Result;
pub use extraction::ExtractionEngine;
pub use inspection::ArchiveManifest;
pub use inspection::Disposition;
pub use inspection::ManifestEntry;
pub use report::EntryWarning;
pub use report::ExtractionReport;
pub use report::NoopProgress;
pub use report::ProgressCallback;
pub use storage::FsStorage;
pub use storage::PathKind;
pub use storage::Storage;

// Re-export types module for easier access
pub use types::ArchiveEntry;
pub use types::EntryKind;
pub use types::ResolvedDestination;
pub use types::TargetRoot;
