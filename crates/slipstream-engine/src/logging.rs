//! Logger setup for the game process.
//!
//! Thin layer over `env_logger` behind the `log` facade; the only policy here
//! is the default filter game binaries share.

use std::sync::Once;

/// Default filter for game binaries: our crates at info, wgpu quieted down to
/// warnings so frame-loop logs stay readable.
pub const DEFAULT_FILTER: &str = "info,wgpu_core=warn,wgpu_hal=warn";

static INIT: Once = Once::new();

/// Installs the global logger, once per process.
///
/// `RUST_LOG` overrides `default_filter` when set. Later calls are no-ops, so
/// tools embedding the engine can call it without coordination.
pub fn init_logging(default_filter: &str) {
    INIT.call_once(|| {
        let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| default_filter.to_string());

        env_logger::Builder::new().parse_filters(&filter).init();

        log::debug!("logging initialized with filter {filter:?}");
    });
}
