//! Logging setup for the CLI.
//!
//! Log lines go to stderr so that command output on stdout stays
//! machine-readable.

use chrono::Local;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::time::FormatTime;

/// Environment variable overriding the log filter (e.g. `SIN_LOG=debug`).
pub const LOG_ENV: &str = "SIN_LOG";

/// Local wall-clock timestamps, e.g. `2024-05-01 13:37:00,042`.
struct LocalTimer;

impl FormatTime for LocalTimer {
    fn format_time(&self, w: &mut Writer<'_>) -> std::fmt::Result {
        write!(w, "{}", Local::now().format("%Y-%m-%d %H:%M:%S,%3f"))
    }
}

/// Default level for a `-v` count.
#[must_use]
pub fn level_for(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    }
}

/// Build the filter: `SIN_LOG`, then `RUST_LOG`, then the `-v` level.
#[must_use]
pub fn filter_for(verbose: u8) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(level_for(verbose)))
}

/// Install the global subscriber.
///
/// Returns `false` when a subscriber was already installed; the existing one
/// is kept and its filter is not changed.
#[must_use]
pub fn init(verbose: u8) -> bool {
    tracing_subscriber::fmt()
        .with_env_filter(filter_for(verbose))
        .with_timer(LocalTimer)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
        .is_ok()
}
