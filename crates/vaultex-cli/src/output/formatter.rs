//! Output formatter trait for CLI results.

use anyhow::Result;
use serde::Serialize;
use vaultex_core::ArchiveManifest;
use vaultex_core::ExtractionReport;
use vaultex_core::TargetRoot;

/// Renders command results for the user.
pub trait OutputFormatter {
    /// Format the summary of an extraction run
    fn format_extraction_result(&self, target: &TargetRoot, report: &ExtractionReport)
    -> Result<()>;

    /// Format archive entry names
    fn format_manifest_short(&self, manifest: &ArchiveManifest) -> Result<()>;

    /// Format archive entries with kind, size and disposition
    fn format_manifest_long(&self, manifest: &ArchiveManifest, human_readable: bool)
    -> Result<()>;
}

/// Envelope for every JSON document printed to stdout.
#[derive(Debug, Serialize)]
pub struct JsonOutput<T> {
    pub operation: String,
    pub status: Status,
    pub data: T,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Success,
    /// The run finished but some entries were not extracted.
    Partial,
}

impl<T: Serialize> JsonOutput<T> {
    pub fn new(operation: impl Into<String>, status: Status, data: T) -> Self {
        Self {
            operation: operation.into(),
            status,
            data,
        }
    }
}
