//! Connectors for the USGS earthquake feeds.
//!
//! This module provides the low-level REST client. All data fetched here
//! is raw and must be normalized through the events layer before use.

mod usgs;

pub use usgs::{
    FeedDocument, FeedMetadata, FetchError, RawFeature, RawGeometry, RawProperties, UsgsClient,
};
