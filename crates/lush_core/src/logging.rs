//! Tracing subscriber bootstrap.

use tracing_subscriber::EnvFilter;

/// Environment variable consulted for log filtering, same syntax as
/// `RUST_LOG`.
pub const LOG_ENV: &str = "LUSH_LOG";

/// Install the global subscriber: compact format on stderr, filtered by
/// `LUSH_LOG` or `default_level`. Later calls are no-ops, which keeps
/// tests that initialize logging independent of ordering.
pub fn init(default_level: &str) {
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .compact()
        .try_init();
}
