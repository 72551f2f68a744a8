//! The core data pipeline: normalize, filter, sort, aggregate.
//!
//! Every stage here is a pure function over locally-scoped data; the
//! dashboard orchestrator wires them together each refresh cycle.

pub mod aggregate;
pub mod filter;

pub use aggregate::{bucket_by_depth, bucket_by_magnitude, bucket_by_time, Bucket};
pub use filter::{apply, sort_by_recency, FilterCriteria};

use crate::events::QuakeEvent;
use crate::feeds::FeedWindow;

/// Everything one refresh cycle hands to the presentation layer.
#[derive(Debug, Clone)]
pub struct CycleOutput {
    /// Filtered events, sorted most recent first.
    pub events: Vec<QuakeEvent>,
    pub time_series: Vec<Bucket>,
    pub magnitude: Vec<Bucket>,
    pub depth: Vec<Bucket>,
}

/// Runs filter, recency sort, and all three aggregations over normalized
/// events.
pub fn process(events: &[QuakeEvent], criteria: &FilterCriteria, window: FeedWindow) -> CycleOutput {
    let mut filtered = apply(events, criteria);
    sort_by_recency(&mut filtered);

    CycleOutput {
        time_series: bucket_by_time(&filtered, window),
        magnitude: bucket_by_magnitude(&filtered),
        depth: bucket_by_depth(&filtered),
        events: filtered,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connectors::{RawFeature, RawGeometry, RawProperties};
    use crate::events::normalize;

    fn raw(id: &str, time: Option<i64>, mag: Option<f64>, place: Option<&str>) -> RawFeature {
        RawFeature {
            id: id.to_string(),
            properties: RawProperties {
                time,
                mag,
                place: place.map(str::to_string),
                url: None,
            },
            geometry: Some(RawGeometry {
                coordinates: vec![-150.0, 61.0, 35.0],
            }),
        }
    }

    #[test]
    fn test_end_to_end_normalize_filter_aggregate() {
        let features = vec![
            raw("ak1", Some(1_700_000_000_000), Some(2.5), Some("Alaska")),
            raw("ci2", Some(1_700_000_100_000), Some(5.2), Some("California")),
            raw("x3", Some(1_700_000_200_000), None, Some("Nowhere")),
        ];

        let normalized = normalize(features);
        assert_eq!(normalized.len(), 2);

        let criteria = FilterCriteria {
            min_mag: 3.0,
            region: String::new(),
        };
        let output = process(&normalized, &criteria, FeedWindow::Week);

        assert_eq!(output.events.len(), 1);
        assert_eq!(output.events[0].id, "ci2");

        let counts: Vec<u64> = output.magnitude.iter().map(|b| b.count).collect();
        assert_eq!(counts, vec![0, 0, 0, 0, 0, 1]);
    }

    #[test]
    fn test_process_sorts_most_recent_first() {
        let normalized = normalize(vec![
            raw("old", Some(1_000), Some(1.0), None),
            raw("new", Some(3_000), Some(1.0), None),
            raw("mid", Some(2_000), Some(1.0), None),
        ]);
        let output = process(&normalized, &FilterCriteria::default(), FeedWindow::Hour);
        let ids: Vec<&str> = output.events.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["new", "mid", "old"]);
    }

    #[test]
    fn test_process_on_empty_input_emits_fixed_buckets() {
        let output = process(&[], &FilterCriteria::default(), FeedWindow::Day);
        assert!(output.events.is_empty());
        assert!(output.time_series.is_empty());
        assert_eq!(output.magnitude.len(), 6);
        assert_eq!(output.depth.len(), 3);
    }
}
