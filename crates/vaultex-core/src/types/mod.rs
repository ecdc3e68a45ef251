//! Value types shared by the extraction pipeline.
//!
//! Vault locations are vault-relative strings using `/` as separator, with
//! the empty string standing for the vault root. [`TargetRoot`] and
//! [`ResolvedDestination`] can only be built through normalization, so a
//! value of either type never contains `..`, empty, or `.` segments.

pub mod destination;
pub mod entry;
pub mod target_root;

pub use destination::ResolvedDestination;
pub use entry::ArchiveEntry;
pub use entry::EntryKind;
pub use target_root::TargetRoot;
