//! QuakeWatch - Main Entry Point
//!
//! Starts the dashboard loop with the log-backed renderer. Configuration
//! comes from environment variables (see `DashboardConfig::from_env`);
//! Ctrl+C shuts the loop down cleanly.

use tracing::{error, info};

use quakewatch::dashboard::{Dashboard, DashboardConfig};
use quakewatch::render::RenderContext;
use quakewatch::utils::init_telemetry;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file if present
    if let Err(e) = dotenvy::dotenv() {
        eprintln!("Note: No .env file found or error loading it: {}", e);
    }

    init_telemetry();

    let config = DashboardConfig::from_env();
    info!(
        "QuakeWatch starting: window={} min_mag={} region={:?} auto_refresh={}",
        config.window, config.criteria.min_mag, config.criteria.region, config.auto_refresh
    );

    let (dashboard, handle) = Dashboard::new(config, RenderContext::log_backed());

    let dashboard_task = tokio::spawn(dashboard.run());

    info!("Dashboard running. Press Ctrl+C to stop.");
    tokio::signal::ctrl_c().await?;
    info!("Shutdown signal received");

    handle.shutdown().await;

    match dashboard_task.await {
        Ok(()) => info!("Dashboard stopped cleanly"),
        Err(e) => error!("Dashboard task failed: {:?}", e),
    }

    Ok(())
}
