//! CLI argument parsing using clap.

use clap::Parser;
use clap::Subcommand;
use clap_complete::Shell;
use std::path::PathBuf;
use vaultex_core::ExtractionConfig;

use crate::progress::CliProgress;

#[derive(Parser)]
#[command(name = "vaultex")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Output results in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,
}

impl Cli {
    /// Progress bars only make sense for humans watching a terminal.
    pub fn show_progress(&self) -> bool {
        !self.quiet && !self.json && CliProgress::should_show()
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Extract an archive into a vault, keeping existing files
    Extract(ExtractArgs),
    /// List archive contents and what extraction would do with them
    List(ListArgs),
    /// Generate shell completions
    Completion {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(clap::Args)]
pub struct ExtractArgs {
    /// Path to the archive file, or '-' to read from stdin
    #[arg(value_name = "ARCHIVE")]
    pub archive: PathBuf,

    /// Vault directory (must exist)
    #[arg(value_name = "VAULT_DIR")]
    pub vault: PathBuf,

    /// Directory inside the vault to extract into, created if missing
    /// (default: vault root)
    #[arg(short, long, value_name = "PATH")]
    pub target: Option<String>,

    #[command(flatten)]
    pub filter: FilterArgs,
}

#[derive(clap::Args)]
pub struct ListArgs {
    /// Path to the archive file, or '-' to read from stdin
    #[arg(value_name = "ARCHIVE")]
    pub archive: PathBuf,

    /// Show entry kind, size and disposition
    #[arg(short, long)]
    pub long: bool,

    /// Show sizes in human-readable format
    #[arg(short = 'H', long)]
    pub human_readable: bool,

    #[command(flatten)]
    pub filter: FilterArgs,
}

/// Entry filtering options shared by `extract` and `list`.
#[derive(clap::Args)]
pub struct FilterArgs {
    /// Additional top-level directory to skip (can be repeated)
    #[arg(long = "ignore-dir", value_name = "NAME")]
    pub ignore_dirs: Vec<String>,

    /// Additional file name to skip wherever it appears (can be repeated)
    #[arg(long = "ignore-file", value_name = "NAME")]
    pub ignore_files: Vec<String>,

    /// Maximum number of path segments per entry
    #[arg(long, default_value = "64", value_parser = clap::value_parser!(u16).range(1..))]
    pub max_depth: u16,
}

impl FilterArgs {
    /// Builds the core configuration; defaults (`__MACOSX`, `.DS_Store`)
    /// are always kept.
    pub fn to_config(&self) -> ExtractionConfig {
        let config = self
            .ignore_dirs
            .iter()
            .fold(ExtractionConfig::default(), |config, dir| {
                config.with_ignored_dir(dir.as_str())
            });
        self.ignore_files
            .iter()
            .fold(config, |config, file| config.with_ignored_file(file.as_str()))
            .with_max_path_depth(usize::from(self.max_depth))
    }
}
