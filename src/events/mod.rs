//! Event normalization layer.
//!
//! All feed data MUST be converted into normalized [`QuakeEvent`] records
//! before being consumed by the pipeline. Raw feed records never drive
//! filtering, aggregation, or presentation directly.

mod quake;

pub use quake::{normalize, QuakeEvent};
