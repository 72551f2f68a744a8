//! Presentation collaborator contracts.
//!
//! The core pipeline never talks to a concrete UI: it hands each cycle's
//! output to the traits below through a [`RenderContext`] owned by the
//! orchestrator. Every render call fully replaces whatever the previous
//! cycle drew for that surface.

mod text;

pub use text::{marker_radius_m, LogRenderer, MagnitudeTier};

use crate::events::QuakeEvent;
use crate::pipeline::Bucket;

/// Maximum number of rows the table renderer receives.
pub const TABLE_ROW_LIMIT: usize = 200;

/// Maximum number of geolocated records the map renderer receives.
pub const MAP_MARKER_LIMIT: usize = 500;

/// The three chart surfaces on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChartSlot {
    TimeSeries,
    Magnitude,
    Depth,
}

impl ChartSlot {
    pub fn title(&self) -> &'static str {
        match self {
            ChartSlot::TimeSeries => "Earthquakes over time",
            ChartSlot::Magnitude => "Magnitude distribution",
            ChartSlot::Depth => "Depth categories",
        }
    }
}

/// Renders the event table. Receives at most [`TABLE_ROW_LIMIT`] rows,
/// already sorted most recent first.
pub trait TableRenderer: Send {
    fn render_table(&mut self, events: &[QuakeEvent]);
}

/// Redraws one chart surface, destroying any prior chart for that slot.
pub trait ChartRenderer: Send {
    fn render_chart(&mut self, slot: ChartSlot, buckets: &[Bucket]);
}

/// Redraws the map. Receives at most [`MAP_MARKER_LIMIT`] geolocated
/// records and must clear all prior markers first.
pub trait MapRenderer: Send {
    fn render_map(&mut self, events: &[QuakeEvent]);
}

/// One-line human-readable status surface.
pub trait StatusSink: Send {
    fn set_status(&mut self, message: &str);
}

/// Owns the live presentation surfaces for the dashboard.
///
/// Each refresh cycle acquires the context, replaces the prior visuals,
/// and releases it implicitly at cycle end; there are no global chart or
/// map handles.
pub struct RenderContext {
    pub table: Box<dyn TableRenderer>,
    pub charts: Box<dyn ChartRenderer>,
    pub map: Box<dyn MapRenderer>,
    pub status: Box<dyn StatusSink>,
}

impl RenderContext {
    /// Builds a context rendering everything through the tracing log.
    pub fn log_backed() -> Self {
        Self {
            table: Box::new(LogRenderer),
            charts: Box::new(LogRenderer),
            map: Box::new(LogRenderer),
            status: Box::new(LogRenderer),
        }
    }

    /// Applies one full cycle output to every surface.
    pub fn present(&mut self, output: &crate::pipeline::CycleOutput) {
        let rows = &output.events[..output.events.len().min(TABLE_ROW_LIMIT)];
        self.table.render_table(rows);

        self.charts
            .render_chart(ChartSlot::TimeSeries, &output.time_series);
        self.charts
            .render_chart(ChartSlot::Magnitude, &output.magnitude);
        self.charts.render_chart(ChartSlot::Depth, &output.depth);

        let markers: Vec<QuakeEvent> = output
            .events
            .iter()
            .filter(|e| e.is_geolocated())
            .take(MAP_MARKER_LIMIT)
            .cloned()
            .collect();
        self.map.render_map(&markers);
    }
}

impl std::fmt::Debug for RenderContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RenderContext").finish_non_exhaustive()
    }
}
