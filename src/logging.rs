//! Logging initialization
//!
//! Embedders call [`init`] once at startup. Tests and library consumers
//! that bring their own subscriber can skip it.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the global tracing subscriber.
///
/// Respects `RUST_LOG` when set, otherwise defaults to debug output for
/// this crate and info for everything else.
pub fn init() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "glassmemo=debug,info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
