//! Human-readable output formatter with colors and styling.

use super::formatter::OutputFormatter;
use crate::progress::humanize_bytes;
use anyhow::Result;
use console::Term;
use console::style;
use vaultex_core::ArchiveManifest;
use vaultex_core::Disposition;
use vaultex_core::EntryKind;
use vaultex_core::ExtractionReport;
use vaultex_core::TargetRoot;

pub struct HumanFormatter {
    verbose: bool,
    quiet: bool,
    use_colors: bool,
    term: Term,
}

impl HumanFormatter {
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self {
            verbose,
            quiet,
            use_colors: console::colors_enabled(),
            term: Term::stdout(),
        }
    }

    fn line(&self, text: &str) {
        let _ = self.term.write_line(text);
    }

    fn header(&self, mark: &str, text: &str, ok: bool) {
        if self.use_colors {
            let mark = if ok {
                style(mark).green().bold()
            } else {
                style(mark).yellow().bold()
            };
            self.line(&format!("{mark} {text}"));
        } else {
            self.line(text);
        }
    }

    fn extraction_lines(
        target: &TargetRoot,
        report: &ExtractionReport,
        verbose: bool,
    ) -> Vec<String> {
        let mut lines = vec![
            format!("  Target:              {target}"),
            format!("  Files written:       {}", report.files_written),
            format!("  Directories created: {}", report.directories_created),
        ];

        if report.files_skipped > 0 || verbose {
            lines.push(format!(
                "  Already present:     {} (left unchanged)",
                report.files_skipped
            ));
        }
        if verbose {
            lines.push(format!("  Ignored entries:     {}", report.entries_ignored));
            lines.push(format!(
                "  Total size:          {}",
                humanize_bytes(report.bytes_written)
            ));
            lines.push(format!("  Duration:            {:?}", report.duration));
        }
        lines
    }
}

impl OutputFormatter for HumanFormatter {
    fn format_extraction_result(
        &self,
        target: &TargetRoot,
        report: &ExtractionReport,
    ) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        if report.has_warnings() {
            self.header("⚠", "Extraction finished with warnings", false);
        } else if report.is_noop() {
            self.header("✓", "Nothing to extract: vault already up to date", true);
        } else {
            self.header("✓", "Extraction complete", true);
        }

        for line in Self::extraction_lines(target, report, self.verbose) {
            self.line(&line);
        }

        if report.has_warnings() {
            self.line("");
            if self.use_colors {
                self.line(&format!("{}", style("Warnings:").yellow().bold()));
            } else {
                self.line("Warnings:");
            }
            for warning in &report.warnings {
                self.line(&format!("  - {}: {}", warning.path, warning.reason));
            }
        }

        Ok(())
    }

    fn format_manifest_short(&self, manifest: &ArchiveManifest) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        for entry in manifest.extractable() {
            self.line(&entry.path);
        }

        Ok(())
    }

    fn format_manifest_long(
        &self,
        manifest: &ArchiveManifest,
        human_readable: bool,
    ) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        for entry in &manifest.entries {
            let kind = match entry.kind {
                EntryKind::File => "-",
                EntryKind::Directory => "d",
            };
            let size = if human_readable {
                humanize_bytes(entry.size)
            } else {
                entry.size.to_string()
            };
            let note = match &entry.disposition {
                Disposition::Extract => String::new(),
                Disposition::Ignored => "  (ignored)".to_string(),
                Disposition::Rejected(reason) => format!("  (rejected: {reason})"),
            };
            self.line(&format!("{kind} {size:>10}  {}{note}", entry.path));
        }

        self.line("");
        self.line(&format!(
            "Total: {} entries ({}), {}, {} ignored",
            manifest.entries.len(),
            manifest.format.name(),
            humanize_bytes(manifest.total_size),
            manifest.ignored_count()
        ));

        Ok(())
    }
}
