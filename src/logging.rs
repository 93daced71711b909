//! Console Logging
//!
//! `tracing` events go to the browser console through `tracing-wasm`,
//! filtered by the host's `logLevel` directive.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use tracing_wasm::{ConsoleConfig, WASMLayer, WASMLayerConfigBuilder};

/// Install the global subscriber. `directive` uses env-filter syntax
/// (`info`, `prompt_composer=debug`, ...); invalid input falls back to info.
pub fn init_logger(directive: &str) {
    let filter = EnvFilter::try_new(directive).unwrap_or_else(|_| EnvFilter::new("info"));
    let console = WASMLayerConfigBuilder::new()
        .set_report_logs_in_timings(false)
        .set_console_config(ConsoleConfig::ReportWithoutConsoleColor)
        .build();

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(WASMLayer::new(console))
        .try_init();
}
