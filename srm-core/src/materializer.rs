//! ResultMaterializer: replaces every element's slot with its resolved
//! root's mean, then casts back to `T` to produce the output raster (§4.5).

use crate::raster::{Intensity, Raster, Shape};
use crate::region_store::RegionStore;

/// Resolve every element to its root's mean and emit a freshly allocated
/// output raster of the same shape and element type as the input.
///
/// The cast truncates toward zero and saturates to `T`'s range (§4.5): means
/// should already be in range by construction, but saturation guards against
/// accumulated floating-point drift in the running-mean recurrence pushing a
/// value fractionally outside `[0, T::MAX]`.
pub fn materialize<T: Intensity>(store: &RegionStore, shape: Shape) -> Raster<T> {
    let n = store.len();
    let mut out = Vec::with_capacity(n);
    for i in 0..n {
        let root = store.find(i);
        out.push(T::saturating_from_f64(store.average(root)));
    }
    Raster::new(shape, out).expect("materializer preserves the input raster's element count")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::edge_index::EdgeIndex;
    use crate::predicate::MergePredicate;

    #[test]
    fn materializes_constant_region_to_its_mean() {
        let shape = Shape::Two { width: 2, height: 1 };
        let data = vec![10u8, 20];
        let mut store = RegionStore::init(&data).unwrap();
        store.union(0, 1);
        let out = materialize::<u8>(&store, shape);
        assert_eq!(out.data(), &[15u8, 15]);
    }

    #[test]
    fn unmerged_elements_keep_their_own_intensity() {
        let shape = Shape::Two { width: 2, height: 1 };
        let data = vec![10u8, 200];
        let edges = EdgeIndex::build(&data, shape).unwrap();
        let mut store = RegionStore::init(&data).unwrap();
        let predicate = MergePredicate::new(<u8 as Intensity>::LEVELS, data.len(), 25.0);
        crate::driver::run(&mut store, &edges, &shape, &predicate);
        let out = materialize::<u8>(&store, shape);
        assert_eq!(out.data(), &[10u8, 200]);
    }
}
