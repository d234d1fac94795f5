//! Raster types: the owned row-major input/output buffer and the
//! dimensionality-specific indexing glue (§3, §9 "2D vs 3D symmetry").
//!
//! 2D is not a degenerate 3D case; [`Shape::Two`] and [`Shape::Three`] carry
//! their own axis-stride tables (`{1, W}` vs `{1, W, W*H}`) rather than
//! sharing one through a padded depth of 1.

use crate::error::{SrmError, SrmResult};

mod sealed {
    pub trait Sealed {}
    impl Sealed for u8 {}
    impl Sealed for u16 {}
    impl Sealed for u32 {}
}

/// An unsigned integer intensity type supported by the engine: `u8`, `u16`, or `u32` (§3).
///
/// Sealed so the "only these three widths" contract is a compile-time fact
/// rather than a runtime check alone.
pub trait Intensity: sealed::Sealed + Copy + Clone + PartialEq + Eq + std::fmt::Debug + Send + Sync + 'static {
    /// Number of distinct intensity levels, `G = 2^b`. Held as `u64` because
    /// `u32`'s `G` (2^32) does not fit in a 32-bit `usize`; the engine
    /// assumes a 64-bit target, so region indices stay addressable.
    const LEVELS: u64;

    fn to_f64(self) -> f64;
    fn to_i64(self) -> i64;

    /// Truncating, saturating cast from a double-precision mean back to `Self` (§4.5).
    fn saturating_from_f64(value: f64) -> Self;
}

impl Intensity for u8 {
    const LEVELS: u64 = 1 << 8;
    fn to_f64(self) -> f64 {
        self as f64
    }
    fn to_i64(self) -> i64 {
        self as i64
    }
    fn saturating_from_f64(value: f64) -> Self {
        value.trunc().clamp(0.0, u8::MAX as f64) as u8
    }
}

impl Intensity for u16 {
    const LEVELS: u64 = 1 << 16;
    fn to_f64(self) -> f64 {
        self as f64
    }
    fn to_i64(self) -> i64 {
        self as i64
    }
    fn saturating_from_f64(value: f64) -> Self {
        value.trunc().clamp(0.0, u16::MAX as f64) as u16
    }
}

impl Intensity for u32 {
    const LEVELS: u64 = 1 << 32;
    fn to_f64(self) -> f64 {
        self as f64
    }
    fn to_i64(self) -> i64 {
        self as i64
    }
    fn saturating_from_f64(value: f64) -> Self {
        value.trunc().clamp(0.0, u32::MAX as f64) as u32
    }
}

/// Shape of a raster: either a 2D plane or a 3D volume.
///
/// In 3D the slowest axis is depth, then height, then width, so linear index
/// `z*H*W + y*W + x` addresses element `(z, y, x)` — the canonical layout the
/// original implementation's final revision got wrong in one case (§9).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    Two { width: usize, height: usize },
    Three { width: usize, height: usize, depth: usize },
}

impl Shape {
    /// `D`: 2 or 3.
    pub fn dims(&self) -> usize {
        match self {
            Shape::Two { .. } => 2,
            Shape::Three { .. } => 3,
        }
    }

    /// `N`: total element count.
    pub fn element_count(&self) -> usize {
        match *self {
            Shape::Two { width, height } => width * height,
            Shape::Three { width, height, depth } => width * height * depth,
        }
    }

    pub fn width(&self) -> usize {
        match *self {
            Shape::Two { width, .. } | Shape::Three { width, .. } => width,
        }
    }

    pub fn height(&self) -> usize {
        match *self {
            Shape::Two { height, .. } | Shape::Three { height, .. } => height,
        }
    }

    pub fn depth(&self) -> Option<usize> {
        match *self {
            Shape::Two { .. } => None,
            Shape::Three { depth, .. } => Some(depth),
        }
    }

    /// Axis strides in `{x, y, z}` order: `{1}`, `{1, W}`, `{1, W, W*H}` (§9).
    /// The unused trailing slot(s) for 2D are `0` and never read by callers,
    /// which always loop `0..self.dims()`.
    pub fn axis_strides(&self) -> [usize; 3] {
        match *self {
            Shape::Two { width, .. } => [1, width, 0],
            Shape::Three { width, height, .. } => [1, width, width * height],
        }
    }

    /// Element extent along each axis, in the same `{x, y, z}` order.
    pub fn axis_extents(&self) -> [usize; 3] {
        match *self {
            Shape::Two { width, height } => [width, height, 1],
            Shape::Three { width, height, depth } => [width, height, depth],
        }
    }

    /// Decompose a linear index into `{x, y, z}` coordinates.
    pub fn coords_of(&self, index: usize) -> [usize; 3] {
        match *self {
            Shape::Two { width, .. } => [index % width, index / width, 0],
            Shape::Three { width, height, .. } => {
                let plane = width * height;
                let z = index / plane;
                let rem = index % plane;
                [rem % width, rem / width, z]
            }
        }
    }

    fn validate(&self) -> SrmResult<()> {
        let zero_axis = match *self {
            Shape::Two { width, height } => width == 0 || height == 0,
            Shape::Three { width, height, depth } => width == 0 || height == 0 || depth == 0,
        };
        if zero_axis {
            return Err(SrmError::invalid_input("raster has a zero-sized axis"));
        }
        Ok(())
    }
}

/// A row-major, contiguous buffer of intensities with an explicit [`Shape`].
/// The engine never mutates an input raster; `segment()` always returns a
/// freshly allocated one (§5).
#[derive(Debug, Clone)]
pub struct Raster<T: Intensity> {
    shape: Shape,
    data: Vec<T>,
}

impl<T: Intensity> Raster<T> {
    /// Wrap `data` with `shape`, validating the element count and axis sizes.
    pub fn new(shape: Shape, data: Vec<T>) -> SrmResult<Self> {
        shape.validate()?;
        if data.len() != shape.element_count() {
            return Err(SrmError::invalid_input(format!(
                "raster buffer has {} elements, shape requires {}",
                data.len(),
                shape.element_count()
            )));
        }
        Ok(Self { shape, data })
    }

    pub fn shape(&self) -> Shape {
        self.shape
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn data(&self) -> &[T] {
        &self.data
    }

    pub fn into_data(self) -> Vec<T> {
        self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_d_coords_round_trip() {
        let shape = Shape::Two { width: 4, height: 3 };
        for y in 0..3 {
            for x in 0..4 {
                let i = y * 4 + x;
                assert_eq!(shape.coords_of(i), [x, y, 0]);
            }
        }
    }

    #[test]
    fn three_d_coords_round_trip() {
        let shape = Shape::Three { width: 4, height: 3, depth: 2 };
        for z in 0..2 {
            for y in 0..3 {
                for x in 0..4 {
                    let i = z * 3 * 4 + y * 4 + x;
                    assert_eq!(shape.coords_of(i), [x, y, z]);
                }
            }
        }
    }

    #[test]
    fn rejects_zero_sized_axis() {
        let err = Raster::<u8>::new(Shape::Two { width: 0, height: 4 }, vec![]).unwrap_err();
        assert!(matches!(err, SrmError::InvalidInput { .. }));
    }

    #[test]
    fn rejects_mismatched_length() {
        let err = Raster::<u8>::new(Shape::Two { width: 2, height: 2 }, vec![0, 1, 2]).unwrap_err();
        assert!(matches!(err, SrmError::InvalidInput { .. }));
    }

    #[test]
    fn saturating_cast_clamps_and_truncates() {
        assert_eq!(u8::saturating_from_f64(-3.2), 0);
        assert_eq!(u8::saturating_from_f64(254.9), 254);
        assert_eq!(u8::saturating_from_f64(300.0), 255);
    }
}
