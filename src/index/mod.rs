//! Multi-resolution containment index.
//!
//! Three pieces, leaves first:
//!
//! - [`ClusterIndex`]: groups references whose downsampled sketches are
//!   content-identical, keeping one representative sketch per group.
//! - [`Layer`]: a complete view of the reference set at one scaled value;
//!   owns a cluster index and answers best-overlap queries against it.
//! - [`MultiResolutionIndex`]: an ordered stack of layers plus the canonical
//!   full-resolution sketch per reference; searches coarsest to finest,
//!   narrowing candidates at every step.

mod cluster;
mod layer;
mod multires;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use cluster::ClusterIndex;
pub use layer::Layer;
pub use multires::{IndexParams, MultiResolutionIndex};

/// Opaque identifier for an indexed reference sketch.
///
/// Assigned sequentially starting at 1 by [`MultiResolutionIndex::add_reference`];
/// never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ReferenceId(pub u32);

impl fmt::Display for ReferenceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
