//! RegionStore: per-element running statistics and the signed-index
//! union-find forest that encodes the segmentation's region structure (§4.1).
//!
//! `parent[i] >= 0` marks `i` as a root (`parent[i] == i`); `parent[i] < 0`
//! encodes the parent as `-1 - parent[i]`. The `-1 - x` transform, not `-x`,
//! is what lets a child point at root `0` without colliding with the
//! root-marker encoding (§9).

use crate::error::{SrmError, SrmResult};
use crate::raster::Intensity;

pub struct RegionStore {
    average: Vec<f64>,
    count: Vec<u64>,
    parent: Vec<i64>,
}

impl RegionStore {
    /// Every element starts as a singleton region of itself.
    pub fn init<T: Intensity>(intensities: &[T]) -> SrmResult<Self> {
        let n = intensities.len();
        if n == 0 {
            return Err(SrmError::invalid_input("cannot build a RegionStore over an empty raster"));
        }

        let mut average = Vec::with_capacity(n);
        let mut count = Vec::with_capacity(n);
        let mut parent = Vec::with_capacity(n);
        for (i, &v) in intensities.iter().enumerate() {
            average.push(v.to_f64());
            count.push(1);
            parent.push(i as i64);
        }

        Ok(Self { average, count, parent })
    }

    pub fn len(&self) -> usize {
        self.parent.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parent.is_empty()
    }

    /// Number of distinct regions currently in the forest (P1: partition check).
    pub fn distinct_roots(&self) -> usize {
        let mut seen = std::collections::HashSet::with_capacity(self.len());
        for i in 0..self.len() {
            seen.insert(self.find(i));
        }
        seen.len()
    }

    /// Follow the signed parent chain until a root (non-negative slot) is found.
    /// No path compression: the algorithm does not require it, and adding it
    /// would only be safe if it left the final materialized output
    /// unchanged, which is easiest to guarantee by not adding it at all.
    pub fn find(&self, i: usize) -> usize {
        let mut cur = i;
        loop {
            let p = self.parent[cur];
            if p >= 0 {
                return cur;
            }
            cur = (-1 - p) as usize;
        }
    }

    pub fn is_root(&self, i: usize) -> bool {
        self.parent[i] >= 0
    }

    /// Mean intensity of the region rooted at `root`. Only meaningful when
    /// `root` is actually a root.
    pub fn average(&self, root: usize) -> f64 {
        self.average[root]
    }

    /// Member count of the region rooted at `root`. Only meaningful when
    /// `root` is actually a root.
    pub fn count(&self, root: usize) -> u64 {
        self.count[root]
    }

    /// Merge the regions rooted at `a` and `b`, both of which must already be
    /// roots. A no-op if `a == b`.
    ///
    /// The smaller index always survives as the new root (§4.1): this is not
    /// an optimization, it fixes which slot carries the region's final
    /// statistics and is therefore part of the engine's bitwise-determinism
    /// contract, not an implementation detail.
    pub fn union(&mut self, a: usize, b: usize) {
        if a == b {
            return;
        }
        let (survivor, demoted) = if a < b { (a, b) } else { (b, a) };

        let merged_count = self.count[survivor] + self.count[demoted];
        let merged_average = (self.average[survivor] * self.count[survivor] as f64
            + self.average[demoted] * self.count[demoted] as f64)
            / merged_count as f64;

        self.average[survivor] = merged_average;
        self.count[survivor] = merged_count;
        self.parent[demoted] = -1 - survivor as i64;
    }
}
