//! Log subscriber setup for the CLI
//!
//! The library only emits `tracing` events; the binary decides where they go.
//! Logs are written to stderr so stdout stays parseable.

use tracing_subscriber::EnvFilter;

/// Environment variable holding a log filter directive
pub const LOG_ENV: &str = "FLAGGATE_LOG";

/// Default filter directive for a `-v` count
pub(crate) fn default_directive(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "warn,flaggate=debug",
        _ => "warn,flaggate=trace",
    }
}

/// Install the global subscriber
///
/// `FLAGGATE_LOG` wins over the verbosity flag when set. Calling this twice is
/// harmless; the second call is ignored.
pub fn init_logging(verbose: u8) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
