//! Diagnostic logging setup.
//!
//! Log events go to stderr so they never mix with JSON on stdout. `RUST_LOG`
//! takes precedence over the verbosity flags.

use tracing_subscriber::EnvFilter;

/// Installs the global `tracing` subscriber.
pub fn init(verbose: bool, quiet: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose, quiet)));

    // A second init (e.g. in tests) keeps the first subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

const fn default_directive(verbose: bool, quiet: bool) -> &'static str {
    if verbose {
        "vaultex_core=debug,vaultex=debug,warn"
    } else if quiet {
        "error"
    } else {
        "warn"
    }
}
