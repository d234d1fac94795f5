//! Telemetry: a structured record of what a `segment()` run actually did.
//!
//! A "resolved parameters" dump in the same spirit as other pipelines in
//! this codebase: it exists so a run that produced a surprising result
//! (everything merged into one region, nothing merged at all) can be
//! debugged from a small JSON artifact instead of re-running with extra
//! logging. This engine produces far fewer resolved quantities than a
//! multi-stage vectorization pipeline, so the record shrinks down to the
//! handful of facts a single-kernel run can report.

use serde::Serialize;
use std::time::Duration;

/// Summary of one `segment()` call.
#[derive(Debug, Clone, Serialize)]
pub struct RunStats {
    /// Wall-clock time `segment()` started, as RFC 3339.
    pub started_at: String,
    /// `N`: total element count.
    pub elements: usize,
    /// `D`: 2 or 3.
    pub dims: usize,
    /// `G`: distinct intensity levels for the input type.
    pub levels: u64,
    /// `Q` as supplied.
    pub q: f64,
    /// Total adjacent-element pairs indexed.
    pub edges: usize,
    /// Edges actually visited by the merge driver.
    pub edges_visited: usize,
    /// Number of unions the driver performed.
    pub merges_performed: usize,
    /// Distinct regions before merging (always equal to `elements`).
    pub regions_before: usize,
    /// Distinct regions remaining after merging.
    pub regions_after: usize,
    /// Wall-clock time spent inside `segment()`, excluding raster validation.
    #[serde(with = "duration_secs")]
    pub elapsed: Duration,
}

mod duration_secs {
    use serde::Serializer;
    use std::time::Duration;

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(value.as_secs_f64())
    }
}
