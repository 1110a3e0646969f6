//! Logging setup.
//!
//! Logs go to stderr so stdout stays machine-readable. `RUST_LOG` overrides
//! the default filter.

use tracing_subscriber::{fmt, EnvFilter};

/// Default filter when `RUST_LOG` is unset.
pub fn default_filter(verbose: bool) -> &'static str {
    if verbose {
        "info,twinstudio_engine=debug,twinstudio_cli=debug"
    } else {
        "warn"
    }
}

/// Installs the global subscriber. Safe to call more than once.
pub fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbose)));

    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
