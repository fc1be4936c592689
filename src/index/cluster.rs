//! Exact-equality clustering of downsampled sketches.

use std::collections::{HashMap, HashSet};

use crate::error::{Error, Result};
use crate::sketch::{Fingerprint, Sketch};

use super::ReferenceId;

/// Groups reference sketches by content fingerprint.
///
/// Many references collapse to the same sketch once downsampled to a coarse
/// resolution; only one representative sketch is stored per distinct
/// fingerprint, and searches compare against representatives rather than
/// against every reference. Clusters only grow, never split or shrink.
///
/// Cluster iteration order is unspecified (`HashMap` order); callers must not
/// rely on it.
#[derive(Debug, Clone, Default)]
pub struct ClusterIndex<S> {
    members: HashMap<Fingerprint, HashSet<ReferenceId>>,
    id_to_fingerprint: HashMap<ReferenceId, Fingerprint>,
    representatives: HashMap<Fingerprint, S>,
}

impl<S: Sketch> ClusterIndex<S> {
    pub fn new() -> Self {
        Self {
            members: HashMap::new(),
            id_to_fingerprint: HashMap::new(),
            representatives: HashMap::new(),
        }
    }

    /// Add a sketch under `id`, joining or founding its content cluster.
    ///
    /// When the fingerprint has been seen before the incoming sketch instance
    /// is discarded; its content is identical to the stored representative.
    pub fn add(&mut self, id: ReferenceId, sketch: S) -> Result<()> {
        if self.id_to_fingerprint.contains_key(&id) {
            return Err(Error::DuplicateReference { id });
        }

        let fingerprint = sketch.fingerprint();
        self.representatives.entry(fingerprint).or_insert(sketch);
        self.id_to_fingerprint.insert(id, fingerprint);
        self.members.entry(fingerprint).or_default().insert(id);
        Ok(())
    }

    /// Iterate each distinct cluster's `(fingerprint, representative)` once.
    ///
    /// With `candidates`, only clusters containing at least one candidate id
    /// are yielded; this is what keeps coarse-to-fine narrowing cheap, since
    /// a finer layer only compares against clusters the coarser layer already
    /// vouched for.
    pub fn representatives<'a>(
        &'a self,
        candidates: Option<&HashSet<ReferenceId>>,
    ) -> Box<dyn Iterator<Item = (Fingerprint, &'a S)> + 'a> {
        match candidates {
            None => Box::new(self.representatives.iter().map(|(&fp, s)| (fp, s))),
            Some(ids) => {
                let fingerprints: HashSet<Fingerprint> = ids
                    .iter()
                    .filter_map(|id| self.id_to_fingerprint.get(id).copied())
                    .collect();
                Box::new(
                    fingerprints
                        .into_iter()
                        .filter_map(move |fp| self.representatives.get(&fp).map(|s| (fp, s))),
                )
            }
        }
    }

    /// The full member set of a cluster; empty when the fingerprint is absent.
    pub fn members_of(&self, fingerprint: Fingerprint) -> HashSet<ReferenceId> {
        self.members.get(&fingerprint).cloned().unwrap_or_default()
    }

    /// Number of distinct clusters.
    pub fn num_clusters(&self) -> usize {
        self.representatives.len()
    }

    /// Number of references added.
    pub fn len(&self) -> usize {
        self.id_to_fingerprint.len()
    }

    pub fn is_empty(&self) -> bool {
        self.id_to_fingerprint.is_empty()
    }
}
