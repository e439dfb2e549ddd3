//! Log subscriber setup

use crate::cli::LogFormat;
use tracing_subscriber::EnvFilter;

/// Filter from `RUST_LOG`, falling back to `info` (`debug` when verbose)
///
/// `--verbose` wins over `RUST_LOG`.
#[must_use]
pub fn env_filter(verbose: bool) -> EnvFilter {
    if verbose {
        return EnvFilter::new("debug");
    }
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Install the global subscriber; logs go to stderr
pub fn init(verbose: bool, format: LogFormat) {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter(verbose))
        .with_writer(std::io::stderr)
        .with_target(false);
    let installed = match format {
        LogFormat::Text => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
    if let Err(e) = installed {
        eprintln!("logging already initialised: {e}");
    }
}
