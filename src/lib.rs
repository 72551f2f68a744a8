//! QuakeWatch - real-time earthquake dashboard over the USGS GeoJSON feeds.
//!
//! # Architecture
//!
//! - **Pipeline-driven**: every refresh cycle runs the full
//!   fetch/normalize/filter/aggregate/present sequence over freshly
//!   fetched data; nothing is retained between cycles
//! - **Normalized events**: raw feed records never reach the pipeline;
//!   everything passes through the events layer first
//! - **Pluggable presentation**: the table, charts, map, and status line
//!   are trait collaborators behind a render context owned by the
//!   orchestrator
//! - **Degrades, never crashes**: a failed fetch renders an empty cycle
//!   with a one-line failure status
//!
//! # Usage
//!
//! ```no_run
//! use quakewatch::dashboard::{Dashboard, DashboardConfig};
//! use quakewatch::render::RenderContext;
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = DashboardConfig::from_env();
//!     let (dashboard, handle) = Dashboard::new(config, RenderContext::log_backed());
//!
//!     tokio::spawn(dashboard.run());
//!     handle.refresh().await;
//! }
//! ```

pub mod connectors;
pub mod dashboard;
pub mod events;
pub mod feeds;
pub mod pipeline;
pub mod render;
pub mod utils;

// Re-export commonly used types
pub use connectors::{FetchError, UsgsClient};
pub use dashboard::{Dashboard, DashboardConfig, DashboardHandle};
pub use events::QuakeEvent;
pub use feeds::FeedWindow;
pub use pipeline::{Bucket, FilterCriteria};
