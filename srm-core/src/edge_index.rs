//! EdgeIndex: every adjacent-element pair, bucket-sorted by absolute
//! intensity difference and threaded through a dense array (§4.2).
//!
//! Edge identifiers are derived positionally rather than stored as explicit
//! pairs: element `i` reserves `D` consecutive identifiers starting at
//! `D*i`, one per axis. This, plus the intrusive `next` links, avoids a
//! separate allocation per edge -- the same dense-bucket-sort trick the
//! radix-sort literature uses for counting buckets.

use crate::error::{SrmError, SrmResult};
use crate::raster::{Intensity, Shape};

const EMPTY: i64 = -1;

pub struct EdgeIndex {
    bucket: Vec<i64>,
    next: Vec<i64>,
    dims: usize,
}

impl EdgeIndex {
    /// Build the bucket-sorted edge index for `intensities` laid out per `shape`.
    ///
    /// Construction walks the raster in *reverse* linear-index order. Because
    /// linear index decomposes as the slowest-to-fastest axis nesting (§3),
    /// walking it in reverse visits every axis in reverse coordinate order
    /// simultaneously, so each bucket's list ends up ordered by ascending
    /// element index along each axis once every insertion (a list prepend)
    /// has happened. That ordering is observable by the merge driver and is
    /// part of the engine's deterministic output contract (§4.2).
    pub fn build<T: Intensity>(intensities: &[T], shape: Shape) -> SrmResult<Self> {
        let n = intensities.len();
        if n != shape.element_count() {
            return Err(SrmError::invalid_input(
                "intensity slice length does not match raster shape",
            ));
        }

        let dims = shape.dims();
        let strides = shape.axis_strides();
        let extents = shape.axis_extents();
        let levels = T::LEVELS;

        let mut bucket = vec![EMPTY; usize::try_from(levels).map_err(|_| {
            SrmError::resource_exhausted("intensity level count does not fit in this platform's usize")
        })?];
        let mut next = vec![EMPTY; dims * n];

        for i in (0..n).rev() {
            let coords = shape.coords_of(i);
            // Highest axis first: each insertion prepends, so within one
            // origin element the bucket list ends up head-to-tail in
            // ascending axis order (x before y before z) once every same-
            // origin, same-bucket edge has been inserted.
            for axis in (0..dims).rev() {
                if coords[axis] + 1 >= extents[axis] {
                    continue; // at the boundary in the positive direction: no wraparound (§4.2)
                }
                let neighbor = i + strides[axis];
                let d = abs_diff(intensities[i], intensities[neighbor]);
                if d as u64 >= levels {
                    return Err(SrmError::internal_invariant(
                        "intensity difference exceeds the type's level count",
                    ));
                }

                let e = (dims * i + axis) as i64;
                next[e as usize] = bucket[d];
                bucket[d] = e;
            }
        }

        Ok(Self { bucket, next, dims })
    }

    /// Head of bucket `d`'s linked list, or `None` if empty.
    pub fn bucket_head(&self, d: usize) -> Option<i64> {
        let head = self.bucket[d];
        (head != EMPTY).then_some(head)
    }

    /// Next edge identifier in the same bucket's list, or `None` at the end.
    pub fn next_edge(&self, e: i64) -> Option<i64> {
        let next = self.next[e as usize];
        (next != EMPTY).then_some(next)
    }

    /// Number of buckets, `G`.
    pub fn levels(&self) -> usize {
        self.bucket.len()
    }

    /// Decode an edge identifier into its two endpoint element indices (§4.2).
    pub fn endpoints(&self, e: i64, shape: &Shape) -> (usize, usize) {
        let e = e as usize;
        let origin = e / self.dims;
        let axis = e % self.dims;
        let strides = shape.axis_strides();
        (origin, origin + strides[axis])
    }

    /// Total number of edges actually inserted, summed across all buckets.
    /// Used by tests to check I5 (`(W-1)*H + W*(H-1)` in 2D, and its 3D
    /// generalization).
    pub fn edge_count(&self) -> usize {
        let mut total = 0;
        for d in 0..self.levels() {
            let mut cur = self.bucket_head(d);
            while let Some(e) = cur {
                total += 1;
                cur = self.next_edge(e);
            }
        }
        total
    }
}

fn abs_diff<T: Intensity>(a: T, b: T) -> usize {
    let ia = a.to_i64();
    let ib = b.to_i64();
    (ia - ib).unsigned_abs() as usize
}
