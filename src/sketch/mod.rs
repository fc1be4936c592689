//! Sketch capability contract and the built-in scaled minhash.
//!
//! The index never looks inside a sketch. Everything it needs is behind the
//! [`Sketch`] trait: downsampling to a coarser resolution, estimating the
//! intersection size with another sketch, subtracting another sketch's
//! elements, and producing a content [`Fingerprint`] for exact-equality
//! grouping. [`ScaledSketch`] implements the contract as a fraction minhash
//! (keep every hash below `u64::MAX / scaled`), which is what genomic
//! sketching pipelines produce.

mod scaled;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use scaled::ScaledSketch;

/// Identifies a sketch's exact content at a given resolution.
///
/// Two sketches at the same scaled value with identical hash content produce
/// equal fingerprints. Used only for grouping, never for ordering or
/// similarity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Fingerprint(pub u64);

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016x}", self.0)
    }
}

/// The capability contract the index consumes.
///
/// `downsample` is only ever called with a scaled value at least as coarse as
/// the sketch's own; the index validates resolutions before delegating.
pub trait Sketch: Clone {
    /// Native sampling resolution ("scaled" value) of this sketch.
    fn scaled(&self) -> u64;

    /// A copy of this sketch resampled at a coarser resolution.
    fn downsample(&self, scaled: u64) -> Self;

    /// Estimated number of elements shared with `other`.
    fn intersection_size(&self, other: &Self) -> usize;

    /// Remove every element of `other` from this sketch.
    fn remove_elements_of(&mut self, other: &Self);

    /// Content-equality fingerprint at this sketch's resolution.
    fn fingerprint(&self) -> Fingerprint;

    /// Number of retained hash values.
    fn len(&self) -> usize;

    /// True when no hash values are retained.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
