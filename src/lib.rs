//! Live Console - broadcast event production core.
//!
//! Composes a live feed's overlay state (lower thirds, prayer ticker,
//! donation call-to-actions), keeps the active slide position synchronized
//! across devices, and records the feed through redundant local and remote
//! paths.

pub mod overlay;
pub mod recorder;
pub mod session;
pub mod sync;
pub mod utils;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize tracing/logging for a console binary
pub fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "live_console=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
