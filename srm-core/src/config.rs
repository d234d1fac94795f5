//! Configuration for a segmentation run.

use crate::error::{SrmError, SrmResult};
use serde::{Deserialize, Serialize};

/// Parameters for a single `segment()` call.
///
/// Mirrors the one-struct-per-algorithm-with-a-validated-constructor shape
/// used throughout this codebase's configuration types, but this engine has
/// exactly one tunable: `Q`. The merge predicate's `0.1` multiplier (§4.3) is
/// deliberately not a field here -- it is part of the engine's behavioral
/// contract, not a user knob, and lives as a named constant next to the
/// predicate it belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SegmentConfig {
    /// Coarseness control; larger Q yields finer segmentation. Must be `> 0`.
    pub q: f64,
}

impl SegmentConfig {
    /// Build a config, rejecting non-positive `Q` up front (§6).
    pub fn new(q: f64) -> SrmResult<Self> {
        if !(q > 0.0) {
            return Err(SrmError::invalid_input(format!("Q must be positive, got {q}")));
        }
        Ok(Self { q })
    }
}
