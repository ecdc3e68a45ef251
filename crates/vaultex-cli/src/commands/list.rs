//! List command implementation

use crate::cli::ListArgs;
use crate::error::add_archive_context;
use crate::output::OutputFormatter;
use crate::source::display_name;
use crate::source::read_archive;
use anyhow::Result;
use vaultex_core::list_archive;

pub fn execute(args: &ListArgs, formatter: &dyn OutputFormatter) -> Result<()> {
    let bytes = read_archive(&args.archive)?;
    let manifest = add_archive_context(
        list_archive(&bytes, &args.filter.to_config()),
        &display_name(&args.archive),
    )?;

    if args.long {
        formatter.format_manifest_long(&manifest, args.human_readable)
    } else {
        formatter.format_manifest_short(&manifest)
    }
}
