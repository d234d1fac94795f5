//! # srm-core
//!
//! Statistical Region Merging segmentation core for 2D/3D integer-intensity
//! rasters. Given a raster of pixel or voxel intensities and a coarseness
//! parameter Q, partitions the raster into connected regions of statistically
//! similar intensity and returns, for every input element, the mean
//! intensity of the region it finally belongs to.
//!
//! Reading an image file, exposing the engine to a host environment, and
//! parallelization are all external collaborators left to callers; this
//! crate is single-threaded and touches only the five components described
//! below.

pub mod config;
pub mod driver;
pub mod edge_index;
pub mod error;
pub mod materializer;
pub mod predicate;
pub mod raster;
pub mod region_store;
pub mod telemetry;

pub use config::SegmentConfig;
pub use error::{SrmError, SrmResult};
pub use raster::{Intensity, Raster, Shape};
pub use telemetry::RunStats;

use std::time::Instant;

/// Output of a [`segment`] call: the resolved raster plus a record of what
/// the run did.
#[derive(Debug, Clone)]
pub struct SegmentationOutcome<T: Intensity> {
    pub output: Raster<T>,
    pub stats: RunStats,
}

/// Partition `input` into regions of statistically similar intensity under
/// `config.q`, returning a same-shape, same-type raster where every element
/// holds the mean intensity of the region it resolved to.
///
/// Wires the five components in dependency order: [`region_store::RegionStore`]
/// (per-element stats and the union-find forest), [`edge_index::EdgeIndex`]
/// (bucket-sorted adjacency edges), [`predicate::MergePredicate`] (the merge
/// test), [`driver::run`] (the bucket scan that performs merges), and
/// [`materializer::materialize`] (the final resolve-and-cast pass).
///
/// # Errors
/// Returns [`SrmError::InvalidInput`] if `input` is empty (a zero-sized axis
/// is already rejected when the `Raster` is constructed). Returns
/// [`SrmError::InternalInvariant`] if edge construction observes an
/// intensity difference that cannot fit in the type's level count --
/// this indicates a bug, not a caller error.
pub fn segment<T: Intensity>(input: &Raster<T>, config: &SegmentConfig) -> SrmResult<SegmentationOutcome<T>> {
    let start = Instant::now();
    let started_at = chrono::Utc::now().to_rfc3339();
    let shape = input.shape();
    let n = input.len();

    log::info!(
        "segment: starting N={n} D={dims} G={levels} Q={q}",
        dims = shape.dims(),
        levels = T::LEVELS,
        q = config.q,
    );

    let mut store = region_store::RegionStore::init(input.data())?;
    let edges = edge_index::EdgeIndex::build(input.data(), shape)?;
    let edge_count = edges.edge_count();
    log::debug!("segment: indexed {edge_count} edges");

    let merge_predicate = predicate::MergePredicate::new(T::LEVELS, n, config.q);
    let driver_stats = driver::run(&mut store, &edges, &shape, &merge_predicate);
    log::debug!(
        "segment: visited {} edges, performed {} merges",
        driver_stats.edges_visited,
        driver_stats.merges_performed
    );

    let output = materializer::materialize::<T>(&store, shape);
    let regions_after = store.distinct_roots();
    if regions_after == 1 && n > 1 {
        log::warn!("segment: entire raster merged into a single region");
    }

    let stats = RunStats {
        started_at,
        elements: n,
        dims: shape.dims(),
        levels: T::LEVELS,
        q: config.q,
        edges: edge_count,
        edges_visited: driver_stats.edges_visited,
        merges_performed: driver_stats.merges_performed,
        regions_before: n,
        regions_after,
        elapsed: start.elapsed(),
    };

    log::info!(
        "segment: done in {:?}, {} -> {} regions",
        stats.elapsed,
        stats.regions_before,
        stats.regions_after
    );

    Ok(SegmentationOutcome { output, stats })
}
