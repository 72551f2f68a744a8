//! Bucketing reducers feeding the chart renderers.
//!
//! Three independent aggregations: time-bucketed counts (labels depend on
//! the feed window), fixed magnitude bands, and fixed depth categories.
//! All label derivation is UTC.

use std::collections::BTreeMap;

use chrono::{DateTime, Datelike, Timelike, Utc};
use serde::{Deserialize, Serialize};

use crate::events::QuakeEvent;
use crate::feeds::FeedWindow;

/// A named aggregation slot counting qualifying records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bucket {
    pub label: String,
    pub count: u64,
}

impl Bucket {
    fn new(label: impl Into<String>, count: u64) -> Self {
        Self {
            label: label.into(),
            count,
        }
    }
}

/// Magnitude band labels, in emission order.
pub const MAGNITUDE_LABELS: [&str; 6] = ["0-1", "1-2", "2-3", "3-4", "4-5", "5+"];

/// Depth category labels, in emission order.
pub const DEPTH_LABELS: [&str; 3] = [
    "Shallow (<70 km)",
    "Intermediate (70-300 km)",
    "Deep (>=300 km)",
];

/// Depth below which an event counts as shallow, in km.
const SHALLOW_MAX_KM: f64 = 70.0;
/// Depth below which an event counts as intermediate, in km.
const INTERMEDIATE_MAX_KM: f64 = 300.0;

/// Counts events per time bucket for the given window.
///
/// Labels: hour window uses the unpadded UTC hour (`7:00`); day window
/// uses UTC month/day plus hour (`3/9 14:00`); week and anything else
/// uses UTC month/day (`3/9`). Output is sorted lexicographically
/// ascending by label.
pub fn bucket_by_time(events: &[QuakeEvent], window: FeedWindow) -> Vec<Bucket> {
    let mut counts: BTreeMap<String, u64> = BTreeMap::new();

    for event in events {
        let Some(time) = event.time_utc() else {
            continue;
        };
        *counts.entry(time_label(&time, window)).or_insert(0) += 1;
    }

    counts
        .into_iter()
        .map(|(label, count)| Bucket::new(label, count))
        .collect()
}

fn time_label(time: &DateTime<Utc>, window: FeedWindow) -> String {
    match window {
        FeedWindow::Hour => format!("{}:00", time.hour()),
        FeedWindow::Day => format!("{}/{} {}:00", time.month(), time.day(), time.hour()),
        FeedWindow::Week => format!("{}/{}", time.month(), time.day()),
    }
}

/// Counts events per magnitude band.
///
/// Bands are left-inclusive/right-exclusive: `[0,1) [1,2) [2,3) [3,4)
/// [4,5) [5,+inf)`. All six buckets are always emitted in fixed order,
/// zeros included. Negative magnitudes clamp into the first band.
pub fn bucket_by_magnitude(events: &[QuakeEvent]) -> Vec<Bucket> {
    let mut counts = [0u64; 6];

    for event in events {
        let index = (event.mag.floor() as i64).clamp(0, 5) as usize;
        counts[index] += 1;
    }

    MAGNITUDE_LABELS
        .iter()
        .zip(counts)
        .map(|(label, count)| Bucket::new(*label, count))
        .collect()
}

/// Counts events per depth category.
///
/// Shallow `< 70 km`, intermediate `[70, 300) km`, deep `>= 300 km`.
/// Missing depth counts as shallow. All three buckets are always emitted
/// in fixed order.
pub fn bucket_by_depth(events: &[QuakeEvent]) -> Vec<Bucket> {
    let mut counts = [0u64; 3];

    for event in events {
        let depth = event.depth_km.unwrap_or(0.0);
        let index = if depth < SHALLOW_MAX_KM {
            0
        } else if depth < INTERMEDIATE_MAX_KM {
            1
        } else {
            2
        };
        counts[index] += 1;
    }

    DEPTH_LABELS
        .iter()
        .zip(counts)
        .map(|(label, count)| Bucket::new(*label, count))
        .collect()
}
