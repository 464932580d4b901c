//! Diagnostic logging.
//!
//! Events go to stderr so that stdout (tables, `--json`) stays clean. The
//! filter comes from `RUST_LOG`, defaulting to warnings from this crate.

use tracing_subscriber::EnvFilter;

pub const DEFAULT_FILTER: &str = "rraid=warn";

pub fn init(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("rraid=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
    };

    // A subscriber may already be installed (tests); keep the existing one.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
