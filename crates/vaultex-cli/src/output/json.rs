//! JSON output formatter for machine-readable results.

use super::formatter::JsonOutput;
use super::formatter::OutputFormatter;
use super::formatter::Status;
use anyhow::Result;
use serde::Serialize;
use std::io::Write;
use std::io::{self};
use vaultex_core::ArchiveManifest;
use vaultex_core::Disposition;
use vaultex_core::EntryKind;
use vaultex_core::ExtractionReport;
use vaultex_core::TargetRoot;

pub struct JsonFormatter;

#[derive(Serialize)]
struct WarningOutput<'a> {
    path: &'a str,
    code: &'a str,
    reason: &'a str,
}

#[derive(Serialize)]
struct ExtractionOutput<'a> {
    target: String,
    files_written: usize,
    files_skipped: usize,
    directories_created: usize,
    entries_ignored: usize,
    bytes_written: u64,
    duration_ms: u128,
    warnings: Vec<WarningOutput<'a>>,
}

#[derive(Serialize)]
struct ManifestEntryOutput<'a> {
    path: &'a str,
    kind: &'static str,
    size: u64,
    disposition: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    reason: Option<&'a str>,
}

#[derive(Serialize)]
struct ManifestOutput<'a> {
    format: &'static str,
    total_entries: usize,
    total_size: u64,
    entries: Vec<ManifestEntryOutput<'a>>,
}

impl JsonFormatter {
    fn output<T: Serialize>(value: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(value)?;
        writeln!(io::stdout(), "{json}")?;
        Ok(())
    }

    fn extraction_output<'a>(
        target: &TargetRoot,
        report: &'a ExtractionReport,
    ) -> ExtractionOutput<'a> {
        ExtractionOutput {
            target: target.to_string(),
            files_written: report.files_written,
            files_skipped: report.files_skipped,
            directories_created: report.directories_created,
            entries_ignored: report.entries_ignored,
            bytes_written: report.bytes_written,
            duration_ms: report.duration.as_millis(),
            warnings: report
                .warnings
                .iter()
                .map(|w| WarningOutput {
                    path: &w.path,
                    code: w.code,
                    reason: &w.reason,
                })
                .collect(),
        }
    }

    fn manifest_output(manifest: &ArchiveManifest) -> ManifestOutput<'_> {
        ManifestOutput {
            format: manifest.format.name(),
            total_entries: manifest.entries.len(),
            total_size: manifest.total_size,
            entries: manifest
                .entries
                .iter()
                .map(|entry| {
                    let (disposition, reason) = match &entry.disposition {
                        Disposition::Extract => ("extract", None),
                        Disposition::Ignored => ("ignored", None),
                        Disposition::Rejected(reason) => ("rejected", Some(reason.as_str())),
                    };
                    ManifestEntryOutput {
                        path: &entry.path,
                        kind: match entry.kind {
                            EntryKind::File => "file",
                            EntryKind::Directory => "directory",
                        },
                        size: entry.size,
                        disposition,
                        reason,
                    }
                })
                .collect(),
        }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_extraction_result(
        &self,
        target: &TargetRoot,
        report: &ExtractionReport,
    ) -> Result<()> {
        let status = if report.has_warnings() {
            Status::Partial
        } else {
            Status::Success
        };
        Self::output(&JsonOutput::new(
            "extract",
            status,
            Self::extraction_output(target, report),
        ))
    }

    fn format_manifest_short(&self, manifest: &ArchiveManifest) -> Result<()> {
        Self::output(&JsonOutput::new(
            "list",
            Status::Success,
            Self::manifest_output(manifest),
        ))
    }

    fn format_manifest_long(
        &self,
        manifest: &ArchiveManifest,
        _human_readable: bool,
    ) -> Result<()> {
        self.format_manifest_short(manifest)
    }
}
