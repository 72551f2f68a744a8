//! User-supplied magnitude and region predicates.

use std::cmp::Reverse;

use serde::{Deserialize, Serialize};

use crate::events::QuakeEvent;

/// Filter criteria supplied by the user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterCriteria {
    /// Minimum magnitude, inclusive. Never negative.
    pub min_mag: f64,
    /// Case-insensitive substring matched against the place description.
    /// Empty means no region filtering.
    pub region: String,
}

impl Default for FilterCriteria {
    fn default() -> Self {
        Self {
            min_mag: 0.0,
            region: String::new(),
        }
    }
}

impl FilterCriteria {
    /// Builds criteria from raw user input, defaulting an unparseable
    /// magnitude to 0.
    pub fn from_inputs(min_mag: &str, region: &str) -> Self {
        Self {
            min_mag: min_mag.trim().parse::<f64>().unwrap_or(0.0).max(0.0),
            region: region.trim().to_string(),
        }
    }

    /// Returns true if the event satisfies both predicates.
    ///
    /// An event with no place description is excluded whenever a region
    /// filter is active.
    pub fn matches(&self, event: &QuakeEvent) -> bool {
        if event.mag < self.min_mag {
            return false;
        }

        if self.region.is_empty() {
            return true;
        }

        match &event.place {
            Some(place) => place
                .to_lowercase()
                .contains(&self.region.to_lowercase()),
            None => false,
        }
    }
}

/// Retains the events matching the criteria, preserving input order.
pub fn apply(events: &[QuakeEvent], criteria: &FilterCriteria) -> Vec<QuakeEvent> {
    events
        .iter()
        .filter(|e| criteria.matches(e))
        .cloned()
        .collect()
}

/// Sorts events by descending occurrence time, most recent first.
pub fn sort_by_recency(events: &mut [QuakeEvent]) {
    events.sort_by_key(|e| Reverse(e.time_ms));
}
