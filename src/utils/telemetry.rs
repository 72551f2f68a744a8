//! Telemetry and structured logging setup.
//!
//! Provides consistent logging across all components with:
//! - Window-tagged log lines for filtering
//! - Configurable verbosity via RUST_LOG

use tracing_subscriber::{
    fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter,
};

/// Initializes the telemetry/logging system.
///
/// Uses RUST_LOG environment variable for configuration.
/// Defaults to INFO level if not set.
///
/// Example RUST_LOG values:
/// - `info` - All info and above
/// - `quakewatch=debug` - Debug for our crate, default for others
/// - `quakewatch=trace,reqwest=warn` - Trace for us, warn for reqwest
pub fn init_telemetry() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,quakewatch=debug"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_target(true)
                .with_level(true)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .init();
}
