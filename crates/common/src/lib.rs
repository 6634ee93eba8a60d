//! Shared plumbing: environment selection, logging setup, clock helpers.

mod environment;

pub use environment::{GPayEnvironment, ParseEnvironmentError};

use tracing_subscriber::EnvFilter;

/// Install a `tracing` formatter honouring `RUST_LOG` (default `info`).
///
/// Safe to call more than once; later calls are no-ops.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

/// Milliseconds since the Unix epoch on the local clock.
///
/// A clock set before the epoch yields `0`, logged at `warn`.
pub fn now_ms() -> i64 {
    match std::time::SystemTime::now().duration_since(std::time::UNIX_EPOCH) {
        Ok(elapsed) => millis_since_epoch(elapsed),
        Err(err) => {
            tracing::warn!(error = %err, "System clock is before the Unix epoch");
            0
        }
    }
}

fn millis_since_epoch(elapsed: std::time::Duration) -> i64 {
    i64::try_from(elapsed.as_millis()).unwrap_or(i64::MAX)
}
