//! Opt-in tracing bootstrap for binaries and tests.
//!
//! The engine itself only emits `tracing` spans and events; installing a
//! subscriber is the embedding application's call. This helper wires up the
//! common stack (env-filter, compact fmt layer, error-span capture) for
//! callers that do not need anything fancier.

use tracing_error::ErrorLayer;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Install a global subscriber driven by `RUST_LOG` (default: `info`).
///
/// Safe to call more than once; subsequent calls are no-ops.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let fmt_layer = fmt::layer().compact().with_target(true);

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .with(ErrorLayer::default())
        .try_init();
}
