//! Cross-layer orchestration.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};
use crate::gather::Gather;
use crate::sketch::Sketch;

use super::{Layer, ReferenceId};

/// Configuration for a [`MultiResolutionIndex`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexParams {
    /// Scaled values to build layers at, one layer per value. The smallest
    /// value is the canonical full resolution references must arrive at.
    pub scaled_layers: Vec<u64>,
    /// Smallest overlap count that counts as a match anywhere in the index.
    pub min_overlap: usize,
}

impl Default for IndexParams {
    fn default() -> Self {
        Self {
            scaled_layers: vec![1000, 10_000, 100_000],
            min_overlap: 10,
        }
    }
}

/// Containment index over reference sketches at several resolutions at once.
///
/// References are ingested at the finest configured resolution and
/// downsampled into every layer. A query walks the layers coarsest to
/// finest; each layer's winning cluster restricts the clusters the next
/// layer compares against, and only the finest layer's verdict is reported.
///
/// Build fully before searching: `add_reference` takes `&mut self`, searches
/// take `&self`, so the borrow checker already rules out interleaving.
/// Searching a fully built index is read-only and safe to run from several
/// threads at once.
#[derive(Debug, Clone)]
pub struct MultiResolutionIndex<S> {
    /// Ascending by scaled value: `layers[0]` is the finest.
    layers: Vec<Layer<S>>,
    references: HashMap<ReferenceId, S>,
    next_id: u32,
    params: IndexParams,
}

impl<S: Sketch> MultiResolutionIndex<S> {
    /// Build an empty index from `params`.
    ///
    /// Rejects an empty layer list, a zero scaled value, and repeated scaled
    /// values with [`Error::InvalidParameter`].
    pub fn new(params: IndexParams) -> Result<Self> {
        if params.scaled_layers.is_empty() {
            return Err(Error::InvalidParameter(
                "at least one scaled layer is required".into(),
            ));
        }
        if params.scaled_layers.contains(&0) {
            return Err(Error::InvalidParameter("scaled must be nonzero".into()));
        }

        let mut scaled_values = params.scaled_layers.clone();
        scaled_values.sort_unstable();
        if scaled_values.windows(2).any(|w| w[0] == w[1]) {
            return Err(Error::InvalidParameter(
                "scaled layer values must be distinct".into(),
            ));
        }

        let layers = scaled_values
            .into_iter()
            .map(|scaled| Layer::new(scaled, params.min_overlap))
            .collect();
        Ok(Self {
            layers,
            references: HashMap::new(),
            next_id: 1,
            params,
        })
    }

    /// The resolution references must be ingested at.
    pub fn finest_scaled(&self) -> u64 {
        self.layers[0].scaled()
    }

    pub fn params(&self) -> &IndexParams {
        &self.params
    }

    /// Number of indexed references.
    pub fn len(&self) -> usize {
        self.references.len()
    }

    pub fn is_empty(&self) -> bool {
        self.references.is_empty()
    }

    /// The full-resolution sketch stored for `id`.
    pub fn reference(&self, id: ReferenceId) -> Option<&S> {
        self.references.get(&id)
    }

    /// Ingest a reference sketch into every layer and return its id.
    ///
    /// The sketch's native resolution must equal the finest configured layer.
    /// Validation happens before any state is touched and the freshly
    /// assigned id cannot collide in any layer, so a reference is never left
    /// indexed in some layers but not others.
    pub fn add_reference(&mut self, sketch: S) -> Result<ReferenceId> {
        let expected = self.finest_scaled();
        if sketch.scaled() != expected {
            return Err(Error::ResolutionMismatch {
                expected,
                actual: sketch.scaled(),
            });
        }

        let id = ReferenceId(self.next_id);
        self.next_id += 1;

        for layer in &mut self.layers {
            layer.add_sketch(id, &sketch)?;
        }
        self.references.insert(id, sketch);
        debug!(%id, "reference indexed");
        Ok(id)
    }

    /// Single best-overlapping reference for `query`, with its overlap count
    /// as measured at the finest layer.
    ///
    /// Walks the layers coarsest to finest, narrowing the candidate set with
    /// each layer that finds a qualifying cluster; a layer that finds nothing
    /// leaves the previous restriction in place (narrowing never widens).
    /// The finest layer alone decides the outcome: if its restricted search
    /// comes up empty the result is `(0, None)` even when a coarser layer had
    /// a hit. The returned id is an arbitrary member of the winning cluster;
    /// members are content-identical at full resolution, so any of them is an
    /// equally valid answer.
    pub fn best_overlap(&self, query: &S) -> (usize, Option<ReferenceId>) {
        let mut restriction: Option<HashSet<ReferenceId>> = None;
        let mut count = 0;
        let mut members: HashSet<ReferenceId> = HashSet::new();

        for layer in self.layers.iter().rev() {
            let (layer_count, layer_members) = layer.best_match(query, restriction.as_ref());
            debug!(
                scaled = layer.scaled(),
                best = layer_count,
                matched = layer_members.len(),
                "layer verdict"
            );
            count = layer_count;
            members = layer_members;
            if !members.is_empty() {
                restriction = Some(members.clone());
            }
        }

        match members.iter().next().copied() {
            Some(id) => (count, Some(id)),
            None => (0, None),
        }
    }

    /// Greedily decompose `query` into best-matching references.
    ///
    /// Returns a lazy iterator; each step emits the current best match and
    /// subtracts that reference's full-resolution sketch from an internal
    /// residual copy of the query. See [`Gather`].
    pub fn gather(&self, query: &S) -> Gather<'_, S> {
        Gather::new(self, query.clone())
    }
}
