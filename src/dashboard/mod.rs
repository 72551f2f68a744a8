//! Dashboard orchestrator.
//!
//! Owns the render context and drives refresh cycles from two trigger
//! sources: explicit commands (manual refresh, setting changes) and a
//! periodic auto-refresh timer. Each cycle carries a monotonically
//! increasing sequence number; fetches race freely, but a completed
//! cycle is rendered only if its sequence is still the newest issued,
//! so a slow stale cycle can never overwrite a newer one.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::connectors::{FetchError, UsgsClient};
use crate::events::{normalize, QuakeEvent};
use crate::feeds::{FeedWindow, DEFAULT_FEED_BASE_URL};
use crate::pipeline::{process, FilterCriteria};
use crate::render::RenderContext;

/// Configuration for the dashboard.
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    /// Feed window to poll.
    pub window: FeedWindow,
    /// Filter applied to every cycle.
    pub criteria: FilterCriteria,
    /// Whether the periodic timer starts enabled.
    pub auto_refresh: bool,
    /// Interval between timer-driven refreshes.
    pub refresh_interval: Duration,
    /// Base URL of the feed provider.
    pub base_url: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            window: FeedWindow::Day,
            criteria: FilterCriteria::default(),
            auto_refresh: false,
            refresh_interval: Duration::from_secs(30),
            base_url: DEFAULT_FEED_BASE_URL.to_string(),
        }
    }
}

impl DashboardConfig {
    /// Builds a configuration from environment variables, falling back
    /// to defaults for anything unset or unparseable.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let window = std::env::var("QUAKEWATCH_WINDOW")
            .map(|v| FeedWindow::parse(&v))
            .unwrap_or(defaults.window);

        let criteria = FilterCriteria::from_inputs(
            &std::env::var("QUAKEWATCH_MIN_MAG").unwrap_or_default(),
            &std::env::var("QUAKEWATCH_REGION").unwrap_or_default(),
        );

        let auto_refresh = std::env::var("QUAKEWATCH_AUTO_REFRESH")
            .map(|v| matches!(v.trim(), "1" | "true" | "yes"))
            .unwrap_or(defaults.auto_refresh);

        let base_url = std::env::var("QUAKEWATCH_FEED_BASE_URL")
            .unwrap_or_else(|_| defaults.base_url.clone());

        Self {
            window,
            criteria,
            auto_refresh,
            refresh_interval: defaults.refresh_interval,
            base_url,
        }
    }
}

/// Commands accepted by the dashboard loop.
#[derive(Debug, Clone)]
pub enum DashboardCommand {
    /// Run a refresh cycle now.
    Refresh,
    /// Switch the feed window and refresh.
    SetWindow(FeedWindow),
    /// Replace the filter criteria and refresh.
    SetCriteria(FilterCriteria),
    /// Enable or disable the periodic timer. Idempotent.
    SetAutoRefresh(bool),
    /// Stop the dashboard loop.
    Shutdown,
}

/// Cloneable handle for sending commands to a running dashboard.
#[derive(Debug, Clone)]
pub struct DashboardHandle {
    tx: mpsc::Sender<DashboardCommand>,
}

impl DashboardHandle {
    pub async fn refresh(&self) {
        let _ = self.tx.send(DashboardCommand::Refresh).await;
    }

    pub async fn set_window(&self, window: FeedWindow) {
        let _ = self.tx.send(DashboardCommand::SetWindow(window)).await;
    }

    pub async fn set_criteria(&self, criteria: FilterCriteria) {
        let _ = self.tx.send(DashboardCommand::SetCriteria(criteria)).await;
    }

    pub async fn set_auto_refresh(&self, enabled: bool) {
        let _ = self
            .tx
            .send(DashboardCommand::SetAutoRefresh(enabled))
            .await;
    }

    pub async fn shutdown(&self) {
        let _ = self.tx.send(DashboardCommand::Shutdown).await;
    }
}

/// Outcome of one refresh cycle's fetch step.
struct CycleResult {
    seq: u64,
    window: FeedWindow,
    outcome: Result<Vec<QuakeEvent>, FetchError>,
}

/// The dashboard loop state.
pub struct Dashboard {
    window: FeedWindow,
    criteria: FilterCriteria,
    refresh_interval: Duration,
    client: UsgsClient,
    ctx: RenderContext,
    cmd_tx: mpsc::Sender<DashboardCommand>,
    cmd_rx: mpsc::Receiver<DashboardCommand>,
    result_tx: mpsc::Sender<CycleResult>,
    result_rx: mpsc::Receiver<CycleResult>,
    /// Sequence number of the most recently issued cycle.
    latest_seq: u64,
    timer_task: Option<JoinHandle<()>>,
    auto_refresh: bool,
}

impl Dashboard {
    /// Creates a dashboard and a handle for controlling it.
    pub fn new(config: DashboardConfig, ctx: RenderContext) -> (Self, DashboardHandle) {
        let (cmd_tx, cmd_rx) = mpsc::channel(64);
        let (result_tx, result_rx) = mpsc::channel(64);

        let dashboard = Self {
            window: config.window,
            criteria: config.criteria,
            refresh_interval: config.refresh_interval,
            client: UsgsClient::with_base_url(config.base_url),
            ctx,
            cmd_tx: cmd_tx.clone(),
            cmd_rx,
            result_tx,
            result_rx,
            latest_seq: 0,
            timer_task: None,
            auto_refresh: config.auto_refresh,
        };

        (dashboard, DashboardHandle { tx: cmd_tx })
    }

    /// Returns whether the periodic timer is currently running.
    pub fn is_auto_refresh_enabled(&self) -> bool {
        self.timer_task.is_some()
    }

    /// Runs the dashboard until a `Shutdown` command arrives.
    ///
    /// Performs an initial refresh immediately, then reacts to commands
    /// and completed cycles.
    pub async fn run(mut self) {
        info!("[{}] dashboard starting", self.window);

        if self.auto_refresh {
            self.start_timer();
        }
        self.start_cycle();

        loop {
            tokio::select! {
                Some(command) = self.cmd_rx.recv() => {
                    if !self.handle_command(command) {
                        break;
                    }
                }
                Some(result) = self.result_rx.recv() => {
                    self.apply_cycle(result);
                }
            }
        }

        self.stop_timer();
        info!("[{}] dashboard stopped", self.window);
    }

    /// Handles one command; returns false on shutdown.
    fn handle_command(&mut self, command: DashboardCommand) -> bool {
        match command {
            DashboardCommand::Refresh => {
                self.start_cycle();
            }
            DashboardCommand::SetWindow(window) => {
                info!("[{}] switching window to {}", self.window, window);
                self.window = window;
                self.start_cycle();
            }
            DashboardCommand::SetCriteria(criteria) => {
                debug!(
                    "[{}] new filter: min_mag={} region={:?}",
                    self.window, criteria.min_mag, criteria.region
                );
                self.criteria = criteria;
                self.start_cycle();
            }
            DashboardCommand::SetAutoRefresh(enabled) => {
                if enabled {
                    self.start_timer();
                } else {
                    self.stop_timer();
                }
            }
            DashboardCommand::Shutdown => {
                return false;
            }
        }
        true
    }

    /// Issues a new refresh cycle and spawns its fetch step.
    ///
    /// Overlapping cycles race; the sequence number decides which one
    /// gets to render.
    fn start_cycle(&mut self) {
        self.latest_seq += 1;
        let seq = self.latest_seq;
        let window = self.window;
        let client = self.client.clone();
        let result_tx = self.result_tx.clone();

        self.ctx
            .status
            .set_status(&format!("Loading earthquakes ({})...", window.label()));
        debug!("[{}] cycle {} started", window, seq);

        tokio::spawn(async move {
            let outcome = client
                .fetch_feed(window)
                .await
                .map(|document| normalize(document.features));

            let _ = result_tx
                .send(CycleResult {
                    seq,
                    window,
                    outcome,
                })
                .await;
        });
    }

    /// Applies a completed cycle, unless a newer one has been issued.
    fn apply_cycle(&mut self, result: CycleResult) {
        if result.seq < self.latest_seq {
            debug!(
                "[{}] discarding stale cycle {} (latest is {})",
                result.window, result.seq, self.latest_seq
            );
            return;
        }

        let events = match result.outcome {
            Ok(events) => {
                info!(
                    "[{}] cycle {} loaded {} events",
                    result.window,
                    result.seq,
                    events.len()
                );
                self.ctx.status.set_status(&format!(
                    "Loaded {} earthquakes ({})",
                    events.len(),
                    result.window.label()
                ));
                events
            }
            Err(e) => {
                warn!("[{}] cycle {} failed: {}", result.window, result.seq, e);
                self.ctx
                    .status
                    .set_status(&format!("Failed to load earthquakes: {}", e));
                Vec::new()
            }
        };

        let output = process(&events, &self.criteria, result.window);
        debug!(
            "[{}] cycle {}: {} events after filter",
            result.window,
            result.seq,
            output.events.len()
        );
        self.ctx.present(&output);
    }

    /// Starts the periodic refresh timer, replacing any existing one.
    ///
    /// Safe to call repeatedly; toggling never leaks a second timer.
    fn start_timer(&mut self) {
        self.stop_timer();

        let tx = self.cmd_tx.clone();
        let period = self.refresh_interval;

        self.timer_task = Some(tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            // The first tick fires immediately; the initial refresh is
            // handled elsewhere, so skip it.
            interval.tick().await;
            loop {
                interval.tick().await;
                if tx.send(DashboardCommand::Refresh).await.is_err() {
                    break;
                }
            }
        }));

        info!("[{}] auto-refresh enabled ({:?})", self.window, period);
    }

    /// Stops the periodic refresh timer if one is running. Idempotent.
    fn stop_timer(&mut self) {
        if let Some(task) = self.timer_task.take() {
            task.abort();
            info!("[{}] auto-refresh disabled", self.window);
        }
    }
}

impl std::fmt::Debug for Dashboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dashboard")
            .field("window", &self.window)
            .field("latest_seq", &self.latest_seq)
            .field("auto_refresh", &self.is_auto_refresh_enabled())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{ChartRenderer, ChartSlot, MapRenderer, StatusSink, TableRenderer};
    use crate::pipeline::Bucket;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct Recorder {
        statuses: Arc<Mutex<Vec<String>>>,
        table_renders: Arc<Mutex<Vec<usize>>>,
    }

    impl TableRenderer for Recorder {
        fn render_table(&mut self, events: &[QuakeEvent]) {
            self.table_renders.lock().unwrap().push(events.len());
        }
    }

    impl ChartRenderer for Recorder {
        fn render_chart(&mut self, _slot: ChartSlot, _buckets: &[Bucket]) {}
    }

    impl MapRenderer for Recorder {
        fn render_map(&mut self, _events: &[QuakeEvent]) {}
    }

    impl StatusSink for Recorder {
        fn set_status(&mut self, message: &str) {
            self.statuses.lock().unwrap().push(message.to_string());
        }
    }

    fn recording_dashboard(config: DashboardConfig) -> (Dashboard, DashboardHandle, Recorder) {
        let recorder = Recorder::default();
        let ctx = RenderContext {
            table: Box::new(recorder.clone()),
            charts: Box::new(recorder.clone()),
            map: Box::new(recorder.clone()),
            status: Box::new(recorder.clone()),
        };
        let (dashboard, handle) = Dashboard::new(config, ctx);
        (dashboard, handle, recorder)
    }

    fn event(id: &str, time_ms: i64) -> QuakeEvent {
        QuakeEvent {
            id: id.to_string(),
            time_ms,
            mag: 2.0,
            place: None,
            url: None,
            depth_km: None,
            lon: None,
            lat: None,
        }
    }

    #[test]
    fn test_stale_cycle_is_discarded() {
        let (mut dashboard, _handle, recorder) = recording_dashboard(DashboardConfig::default());
        dashboard.latest_seq = 5;

        dashboard.apply_cycle(CycleResult {
            seq: 3,
            window: FeedWindow::Day,
            outcome: Ok(vec![event("stale", 1)]),
        });
        assert!(recorder.table_renders.lock().unwrap().is_empty());

        dashboard.apply_cycle(CycleResult {
            seq: 5,
            window: FeedWindow::Day,
            outcome: Ok(vec![event("fresh", 1), event("fresh2", 2)]),
        });
        assert_eq!(*recorder.table_renders.lock().unwrap(), vec![2]);
    }

    #[test]
    fn test_failed_cycle_degrades_to_empty_render() {
        let (mut dashboard, _handle, recorder) = recording_dashboard(DashboardConfig::default());
        dashboard.latest_seq = 1;

        dashboard.apply_cycle(CycleResult {
            seq: 1,
            window: FeedWindow::Hour,
            outcome: Err(FetchError::Status { status: 503 }),
        });

        // The table still renders (empty), and the status names the failure.
        assert_eq!(*recorder.table_renders.lock().unwrap(), vec![0]);
        let statuses = recorder.statuses.lock().unwrap();
        assert!(statuses.iter().any(|s| s.starts_with("Failed to load")));
    }

    #[tokio::test]
    async fn test_auto_refresh_toggle_is_idempotent() {
        let (mut dashboard, _handle, _recorder) = recording_dashboard(DashboardConfig::default());

        assert!(!dashboard.is_auto_refresh_enabled());

        dashboard.start_timer();
        dashboard.start_timer();
        dashboard.start_timer();
        assert!(dashboard.is_auto_refresh_enabled());

        dashboard.stop_timer();
        assert!(!dashboard.is_auto_refresh_enabled());

        // Stopping again must be a no-op.
        dashboard.stop_timer();
        assert!(!dashboard.is_auto_refresh_enabled());
    }

    #[tokio::test]
    async fn test_fetch_failure_never_propagates() {
        // Nothing listens on the discard port, so the fetch step fails;
        // the cycle must still deliver a degraded (empty) result.
        let config = DashboardConfig {
            base_url: "http://127.0.0.1:9".to_string(),
            ..DashboardConfig::default()
        };
        let (mut dashboard, _handle, recorder) = recording_dashboard(config);

        dashboard.start_cycle();
        let result = dashboard
            .result_rx
            .recv()
            .await
            .expect("cycle must report a result");
        assert_eq!(result.seq, 1);
        assert!(result.outcome.is_err());

        dashboard.apply_cycle(result);
        assert_eq!(*recorder.table_renders.lock().unwrap(), vec![0]);
    }

    #[test]
    fn test_config_defaults() {
        let config = DashboardConfig::default();
        assert_eq!(config.window, FeedWindow::Day);
        assert_eq!(config.refresh_interval, Duration::from_secs(30));
        assert!(!config.auto_refresh);
        assert_eq!(config.criteria, FilterCriteria::default());
    }
}
