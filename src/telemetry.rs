//! Logging setup.

use tracing_subscriber::EnvFilter;

/// Install the global `tracing` subscriber. Call once, at startup.
///
/// An unparsable `filter` falls back to `info`.
pub fn setup_tracing(filter: &str) {
    let filter = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();
}
