//! MergeDriver: the single linear scan over gradient buckets that resolves
//! endpoints, applies the merge predicate, and performs unions (§4.4).

use crate::edge_index::EdgeIndex;
use crate::predicate::MergePredicate;
use crate::raster::Shape;
use crate::region_store::RegionStore;

/// Outcome of a driver run, used by callers that want to report on a segmentation.
#[derive(Debug, Clone, Copy, Default)]
pub struct DriverStats {
    pub edges_visited: usize,
    pub merges_performed: usize,
}

/// Run the bucket scan to completion, merging regions in `store` wherever
/// `predicate` admits a candidate pair.
///
/// Visit order is fixed: primary key `d` ascending, secondary key the
/// bucket's linked-list order (itself fixed by [`EdgeIndex::build`]'s
/// reverse-insertion pass). Reproducing this order exactly is part of the
/// output contract (§4.4) -- reordering produces a different, still-valid
/// partition, not an equivalent one.
pub fn run(store: &mut RegionStore, edges: &EdgeIndex, shape: &Shape, predicate: &MergePredicate) -> DriverStats {
    let mut stats = DriverStats::default();

    for d in 0..edges.levels() {
        let mut cursor = edges.bucket_head(d);
        while let Some(e) = cursor {
            stats.edges_visited += 1;

            let (a, b) = edges.endpoints(e, shape);
            let root_a = store.find(a);
            let root_b = store.find(b);

            if root_a != root_b {
                let mu_a = store.average(root_a);
                let n_a = store.count(root_a);
                let mu_b = store.average(root_b);
                let n_b = store.count(root_b);

                if predicate.admits(mu_a, n_a, mu_b, n_b) {
                    store.union(root_a, root_b);
                    stats.merges_performed += 1;
                }
            }

            cursor = edges.next_edge(e);
        }
    }

    stats
}
