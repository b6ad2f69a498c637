//! Tracing setup for the command-line tools.
//!
//! Log lines go to stderr so stdout stays machine-readable.

use std::sync::Once;

use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter, e.g. `BUILDSPEED_LOG=buildspeed=debug`.
pub const LOG_ENV: &str = "BUILDSPEED_LOG";

static INIT: Once = Once::new();

/// Installs the global subscriber. Safe to call more than once.
///
/// Falls back to `buildspeed=info` if `BUILDSPEED_LOG` is unset or invalid.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter =
            EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("buildspeed=info"));

        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .with_writer(std::io::stderr)
            .init();
    });
}
