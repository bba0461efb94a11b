//! Log output for test runs.
//!
//! Resolution emits `tracing` events (`debug` per resolved control, `trace`
//! per candidate). [`init_tracing`] installs a formatter so they show up.

use crate::config::{AreaConfig, LOG_ENV};
use tracing_subscriber::EnvFilter;

/// Build the filter: `PAGEAREA_LOG` if set and valid, else the config's.
#[must_use]
pub fn env_filter(config: &AreaConfig) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(&config.log_filter))
}

/// Install a global `fmt` subscriber writing through the test harness.
///
/// Returns `false` if a subscriber was already installed.
pub fn init_tracing(config: &AreaConfig) -> bool {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(config))
        .with_test_writer()
        .try_init()
        .is_ok()
}

/// Like [`init_tracing`], emitting one JSON object per event.
pub fn init_json_tracing(config: &AreaConfig) -> bool {
    tracing_subscriber::fmt()
        .json()
        .with_env_filter(env_filter(config))
        .try_init()
        .is_ok()
}
