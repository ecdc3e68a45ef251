//! Extract command implementation.

use crate::cli::ExtractArgs;
use crate::error::add_archive_context;
use crate::output::OutputFormatter;
use crate::progress::CliProgress;
use crate::source::display_name;
use crate::source::read_archive;
use anyhow::Result;
use vaultex_core::NoopProgress;
use vaultex_core::ProgressCallback;
use vaultex_core::TargetRoot;
use vaultex_core::extract_into_vault_with_progress;

pub fn execute(
    args: &ExtractArgs,
    formatter: &dyn OutputFormatter,
    show_progress: bool,
) -> Result<()> {
    let archive = display_name(&args.archive);
    let target = match &args.target {
        Some(raw) => add_archive_context(TargetRoot::parse(raw), &archive)?,
        None => TargetRoot::root(),
    };
    let config = args.filter.to_config();

    let bytes = read_archive(&args.archive)?;

    let mut bar;
    let mut noop = NoopProgress;
    let progress: &mut dyn ProgressCallback = if show_progress {
        bar = CliProgress::new("Extracting");
        &mut bar
    } else {
        &mut noop
    };

    let report = add_archive_context(
        extract_into_vault_with_progress(&bytes, &args.vault, &target, &config, progress),
        &archive,
    )?;

    formatter.format_extraction_result(&target, &report)
}
