//! Fraction minhash ("scaled") sketch.
//!
//! A scaled sketch retains every hash value below `u64::MAX / scaled`, so a
//! sketch at scaled 1000 keeps roughly one hash in a thousand. Unlike a
//! fixed-length minhash signature, the retained fraction of two sketches can
//! be intersected directly, which makes containment (overlap count) a
//! first-class estimate rather than a derived one.
//!
//! Downsampling to a coarser scaled value just tightens the bound: the hashes
//! kept at scaled 100_000 are a subset of those kept at scaled 1000, so every
//! layer of a multi-resolution index sees a consistent sample.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use super::{Fingerprint, Sketch};

/// Largest hash value retained at a given scaled.
fn max_hash_for(scaled: u64) -> u64 {
    u64::MAX / scaled
}

/// A scaled minhash sketch: sorted, deduplicated hash values, all below
/// `u64::MAX / scaled`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScaledSketch {
    scaled: u64,
    hashes: Vec<u64>,
}

impl ScaledSketch {
    /// Create an empty sketch at the given resolution.
    ///
    /// `scaled` must be nonzero; a zero value would retain the whole hash
    /// space and is treated as 1.
    pub fn new(scaled: u64) -> Self {
        Self {
            scaled: scaled.max(1),
            hashes: Vec::new(),
        }
    }

    /// Build a sketch from raw hash values, dropping any at or above the
    /// scaled bound.
    pub fn from_hashes<I: IntoIterator<Item = u64>>(hashes: I, scaled: u64) -> Self {
        let scaled = scaled.max(1);
        let bound = max_hash_for(scaled);
        let mut hashes: Vec<u64> = hashes.into_iter().filter(|&h| h <= bound).collect();
        hashes.sort_unstable();
        hashes.dedup();
        Self { scaled, hashes }
    }

    /// Insert a single hash value. Values above the scaled bound are ignored.
    pub fn insert(&mut self, hash: u64) {
        if hash > max_hash_for(self.scaled) {
            return;
        }
        if let Err(pos) = self.hashes.binary_search(&hash) {
            self.hashes.insert(pos, hash);
        }
    }

    /// The retained hash values, sorted ascending.
    pub fn hashes(&self) -> &[u64] {
        &self.hashes
    }
}

impl Sketch for ScaledSketch {
    fn scaled(&self) -> u64 {
        self.scaled
    }

    fn downsample(&self, scaled: u64) -> Self {
        debug_assert!(scaled >= self.scaled, "downsample must coarsen");
        if scaled <= self.scaled {
            return self.clone();
        }
        let bound = max_hash_for(scaled);
        // Sorted ascending, so the surviving hashes are a prefix.
        let keep = self.hashes.partition_point(|&h| h <= bound);
        Self {
            scaled,
            hashes: self.hashes[..keep].to_vec(),
        }
    }

    fn intersection_size(&self, other: &Self) -> usize {
        let (mut i, mut j) = (0, 0);
        let mut common = 0;
        while i < self.hashes.len() && j < other.hashes.len() {
            match self.hashes[i].cmp(&other.hashes[j]) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    common += 1;
                    i += 1;
                    j += 1;
                }
            }
        }
        common
    }

    fn remove_elements_of(&mut self, other: &Self) {
        self.hashes
            .retain(|h| other.hashes.binary_search(h).is_err());
    }

    fn fingerprint(&self) -> Fingerprint {
        let mut hasher = DefaultHasher::new();
        self.scaled.hash(&mut hasher);
        self.hashes.hash(&mut hasher);
        Fingerprint(hasher.finish())
    }

    fn len(&self) -> usize {
        self.hashes.len()
    }
}
