//! Greedy decomposition of a query into best-matching references.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::index::{MultiResolutionIndex, ReferenceId};
use crate::sketch::Sketch;

/// One step of a gather decomposition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatherMatch {
    /// Overlap between the residual query and the matched reference at the
    /// moment this match was emitted, measured at the finest layer.
    pub overlap: usize,
    pub reference: ReferenceId,
}

/// Lazy gather iterator returned by [`MultiResolutionIndex::gather`].
///
/// Owns a residual copy of the query. Each `next` finds the best-overlapping
/// reference for the current residual, emits it, and subtracts that
/// reference's full-resolution sketch from the residual, so later elements
/// depend on earlier ones and the iterator cannot be restarted. It ends the
/// first time no reference reaches the minimum-overlap gate; every emitted
/// match removes at least that many elements from the residual, so the
/// sequence is finite and never repeats a reference.
#[derive(Debug)]
pub struct Gather<'a, S> {
    index: &'a MultiResolutionIndex<S>,
    residual: S,
    done: bool,
}

impl<'a, S: Sketch> Gather<'a, S> {
    pub(crate) fn new(index: &'a MultiResolutionIndex<S>, residual: S) -> Self {
        Self {
            index,
            residual,
            done: false,
        }
    }

    /// The not-yet-explained remainder of the query.
    pub fn residual(&self) -> &S {
        &self.residual
    }

    /// Drive the decomposition to completion.
    pub fn run(self) -> Vec<GatherMatch> {
        self.collect()
    }
}

impl<S: Sketch> Iterator for Gather<'_, S> {
    type Item = GatherMatch;

    fn next(&mut self) -> Option<GatherMatch> {
        if self.done {
            return None;
        }

        let (overlap, best) = self.index.best_overlap(&self.residual);
        let Some(reference) = best else {
            self.done = true;
            return None;
        };

        if let Some(full) = self.index.reference(reference) {
            self.residual.remove_elements_of(full);
        }
        debug!(%reference, overlap, remaining = self.residual.len(), "gather match");
        Some(GatherMatch { overlap, reference })
    }
}

impl<S: Sketch> std::iter::FusedIterator for Gather<'_, S> {}
