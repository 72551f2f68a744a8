//! Normalized earthquake events consumed by the pipeline.
//!
//! Raw feed records never reach the filter, aggregation, or presentation
//! layers directly: everything goes through [`normalize`] first, which
//! enforces the one invariant downstream code relies on: `time_ms` and
//! `mag` are always present.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::connectors::RawFeature;

/// A single normalized earthquake record.
///
/// Ephemeral: rebuilt in full on every refresh cycle, never retained,
/// mutated, or merged across cycles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuakeEvent {
    pub id: String,
    /// Occurrence time in epoch milliseconds (UTC).
    pub time_ms: i64,
    pub mag: f64,
    pub place: Option<String>,
    pub url: Option<String>,
    pub depth_km: Option<f64>,
    pub lon: Option<f64>,
    pub lat: Option<f64>,
}

impl QuakeEvent {
    /// Returns the occurrence time as a UTC datetime, if representable.
    pub fn time_utc(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.time_ms)
    }

    /// Returns true if the record carries usable map coordinates.
    pub fn is_geolocated(&self) -> bool {
        self.lon.is_some() && self.lat.is_some()
    }
}

/// Converts raw feed records into normalized events.
///
/// Coordinates are extracted positionally as `[lon, lat, depth_km]`;
/// any missing element becomes `None`. Records whose `mag` or `time`
/// is absent are dropped here, never downstream. Order-preserving for
/// retained records; malformed records are silently excluded, not
/// reported.
pub fn normalize(features: Vec<RawFeature>) -> Vec<QuakeEvent> {
    features
        .into_iter()
        .filter_map(|feature| {
            let time_ms = feature.properties.time?;
            let mag = feature.properties.mag?;

            let coords = feature
                .geometry
                .as_ref()
                .map(|g| g.coordinates.as_slice())
                .unwrap_or(&[]);

            Some(QuakeEvent {
                id: feature.id,
                time_ms,
                mag,
                place: feature.properties.place,
                url: feature.properties.url,
                lon: coords.first().copied(),
                lat: coords.get(1).copied(),
                depth_km: coords.get(2).copied(),
            })
        })
        .collect()
}
