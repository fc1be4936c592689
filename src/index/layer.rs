//! One resolution layer of the index.

use std::collections::HashSet;

use tracing::debug;

use crate::error::Result;
use crate::sketch::Sketch;

use super::{ClusterIndex, ReferenceId};

/// A complete view of the reference set at one scaled value.
///
/// Every incoming sketch is downsampled to the layer's resolution before it
/// is clustered, so everything a layer stores lives at exactly one scaled
/// value. The minimum-overlap gate is fixed at construction alongside the
/// resolution.
#[derive(Debug, Clone)]
pub struct Layer<S> {
    scaled: u64,
    min_overlap: usize,
    clusters: ClusterIndex<S>,
}

impl<S: Sketch> Layer<S> {
    pub fn new(scaled: u64, min_overlap: usize) -> Self {
        Self {
            scaled,
            min_overlap,
            clusters: ClusterIndex::new(),
        }
    }

    /// The scaled value this layer indexes at.
    pub fn scaled(&self) -> u64 {
        self.scaled
    }

    /// Downsample a full-resolution reference to this layer and cluster it.
    pub fn add_sketch(&mut self, id: ReferenceId, full: &S) -> Result<()> {
        let downsampled = full.downsample(self.scaled);
        self.clusters.add(id, downsampled)
    }

    /// Best-overlapping cluster for `query`, optionally restricted to
    /// clusters containing a candidate id.
    ///
    /// Returns the winning overlap count and the winning cluster's full
    /// member set. A cluster qualifies only when its overlap reaches the
    /// minimum-overlap gate; ties keep the cluster encountered first, and
    /// encounter order is unspecified. `(0, {})` when nothing qualifies.
    pub fn best_match(
        &self,
        query: &S,
        candidates: Option<&HashSet<ReferenceId>>,
    ) -> (usize, HashSet<ReferenceId>) {
        let query = query.downsample(self.scaled);

        let mut best_count = 0;
        let mut best_fingerprint = None;
        let mut scanned = 0usize;
        for (fingerprint, representative) in self.clusters.representatives(candidates) {
            scanned += 1;
            let count = query.intersection_size(representative);
            if count >= self.min_overlap && count > best_count {
                best_count = count;
                best_fingerprint = Some(fingerprint);
            }
        }
        debug!(scaled = self.scaled, scanned, best_count, "layer scan");

        let members = match best_fingerprint {
            Some(fp) => self.clusters.members_of(fp),
            None => HashSet::new(),
        };
        (best_count, members)
    }

    /// Number of distinct clusters at this resolution.
    pub fn num_clusters(&self) -> usize {
        self.clusters.num_clusters()
    }
}
