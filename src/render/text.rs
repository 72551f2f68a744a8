//! Log-backed renderer used by the binary.
//!
//! Formats each surface as lines through `tracing`, mirroring what a
//! graphical frontend would draw: table rows, chart buckets, and map
//! markers with the magnitude-derived radius and tier.

use tracing::info;

use crate::events::QuakeEvent;
use crate::pipeline::Bucket;

use super::{ChartRenderer, ChartSlot, MapRenderer, StatusSink, TableRenderer};

/// Magnitude tier driving marker color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MagnitudeTier {
    /// Magnitude >= 5.
    Red,
    /// Magnitude >= 4.
    Orange,
    /// Everything else.
    Blue,
}

impl MagnitudeTier {
    pub fn for_magnitude(mag: f64) -> Self {
        if mag >= 5.0 {
            MagnitudeTier::Red
        } else if mag >= 4.0 {
            MagnitudeTier::Orange
        } else {
            MagnitudeTier::Blue
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            MagnitudeTier::Red => "red",
            MagnitudeTier::Orange => "orange",
            MagnitudeTier::Blue => "blue",
        }
    }
}

/// Marker radius in meters for a magnitude, floored at 4 km.
pub fn marker_radius_m(mag: f64) -> f64 {
    (mag * 40_000.0).max(4_000.0)
}

/// Renders every surface as tracing log lines.
pub struct LogRenderer;

impl TableRenderer for LogRenderer {
    fn render_table(&mut self, events: &[QuakeEvent]) {
        info!("table: {} rows", events.len());
        for event in events {
            let time = event
                .time_utc()
                .map(|t| t.format("%Y-%m-%d %H:%M:%S UTC").to_string())
                .unwrap_or_else(|| "-".to_string());
            info!(
                "  {} | M{:.1} | {:.1} km | {} | {}",
                time,
                event.mag,
                event.depth_km.unwrap_or(0.0),
                event.place.as_deref().unwrap_or(""),
                event.url.as_deref().unwrap_or("-"),
            );
        }
    }
}

impl ChartRenderer for LogRenderer {
    fn render_chart(&mut self, slot: ChartSlot, buckets: &[Bucket]) {
        info!("chart [{}]:", slot.title());
        for bucket in buckets {
            info!("  {:>24} {}", bucket.label, bucket.count);
        }
    }
}

impl MapRenderer for LogRenderer {
    fn render_map(&mut self, events: &[QuakeEvent]) {
        info!("map: {} markers", events.len());
        for event in events {
            let (Some(lat), Some(lon)) = (event.lat, event.lon) else {
                continue;
            };
            let time = event
                .time_utc()
                .map(|t| t.to_rfc3339())
                .unwrap_or_else(|| "-".to_string());
            info!(
                "  [{:.3}, {:.3}] r={:.0}m {} | M{:.1} {} depth {:.1} km at {}",
                lat,
                lon,
                marker_radius_m(event.mag),
                MagnitudeTier::for_magnitude(event.mag).name(),
                event.mag,
                event.place.as_deref().unwrap_or("unknown place"),
                event.depth_km.unwrap_or(0.0),
                time,
            );
        }
    }
}

impl StatusSink for LogRenderer {
    fn set_status(&mut self, message: &str) {
        info!("status: {}", message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marker_radius_floor() {
        assert_eq!(marker_radius_m(0.0), 4_000.0);
        assert_eq!(marker_radius_m(0.05), 4_000.0);
        assert_eq!(marker_radius_m(2.0), 80_000.0);
        assert_eq!(marker_radius_m(6.5), 260_000.0);
    }

    #[test]
    fn test_magnitude_tier_thresholds() {
        assert_eq!(MagnitudeTier::for_magnitude(5.0), MagnitudeTier::Red);
        assert_eq!(MagnitudeTier::for_magnitude(4.9), MagnitudeTier::Orange);
        assert_eq!(MagnitudeTier::for_magnitude(4.0), MagnitudeTier::Orange);
        assert_eq!(MagnitudeTier::for_magnitude(3.9), MagnitudeTier::Blue);
        assert_eq!(MagnitudeTier::for_magnitude(-0.2), MagnitudeTier::Blue);
    }
}
