//! Feed window definitions for the USGS summary feeds.
//!
//! Each window maps to exactly one fixed endpoint. Selection is a pure
//! lookup with no failure mode: unrecognized window keys fall back to
//! the week feed.

use std::fmt;

/// Default base URL for the USGS GeoJSON summary feeds.
pub const DEFAULT_FEED_BASE_URL: &str =
    "https://earthquake.usgs.gov/earthquakes/feed/v1.0/summary";

/// Time span of events requested from the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeedWindow {
    Hour,
    Day,
    Week,
}

impl FeedWindow {
    /// Returns all supported feed windows.
    pub fn all() -> Vec<FeedWindow> {
        vec![FeedWindow::Hour, FeedWindow::Day, FeedWindow::Week]
    }

    /// Parses a window key, falling back to week for anything unrecognized.
    pub fn parse(key: &str) -> FeedWindow {
        match key.trim().to_ascii_lowercase().as_str() {
            "hour" => FeedWindow::Hour,
            "day" => FeedWindow::Day,
            _ => FeedWindow::Week,
        }
    }

    /// Returns the window's key as used in feed selection and logging.
    pub fn key(&self) -> &'static str {
        match self {
            FeedWindow::Hour => "hour",
            FeedWindow::Day => "day",
            FeedWindow::Week => "week",
        }
    }

    /// Returns the window's display name for status lines.
    pub fn label(&self) -> &'static str {
        match self {
            FeedWindow::Hour => "past hour",
            FeedWindow::Day => "past day",
            FeedWindow::Week => "past week",
        }
    }

    /// Returns the feed file name for this window.
    pub fn endpoint_path(&self) -> &'static str {
        match self {
            FeedWindow::Hour => "all_hour.geojson",
            FeedWindow::Day => "all_day.geojson",
            FeedWindow::Week => "all_week.geojson",
        }
    }

    /// Resolves the full feed URL against a base URL.
    pub fn endpoint_url(&self, base_url: &str) -> String {
        format!("{}/{}", base_url.trim_end_matches('/'), self.endpoint_path())
    }
}

impl fmt::Display for FeedWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_windows() {
        assert_eq!(FeedWindow::parse("hour"), FeedWindow::Hour);
        assert_eq!(FeedWindow::parse("day"), FeedWindow::Day);
        assert_eq!(FeedWindow::parse("week"), FeedWindow::Week);
        assert_eq!(FeedWindow::parse(" Hour "), FeedWindow::Hour);
    }

    #[test]
    fn test_parse_falls_back_to_week() {
        assert_eq!(FeedWindow::parse("month"), FeedWindow::Week);
        assert_eq!(FeedWindow::parse(""), FeedWindow::Week);
    }

    #[test]
    fn test_endpoint_url() {
        let url = FeedWindow::Day.endpoint_url(DEFAULT_FEED_BASE_URL);
        assert_eq!(
            url,
            "https://earthquake.usgs.gov/earthquakes/feed/v1.0/summary/all_day.geojson"
        );

        // Trailing slash on the base must not double up.
        let url = FeedWindow::Hour.endpoint_url("http://localhost:8080/");
        assert_eq!(url, "http://localhost:8080/all_hour.geojson");
    }

    #[test]
    fn test_all_windows_returns_three() {
        assert_eq!(FeedWindow::all().len(), 3);
    }
}
