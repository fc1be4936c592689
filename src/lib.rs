//! strata: multi-resolution containment search over scaled minhash sketches.
//!
//! Given a collection of reference sketches (bounded hash samples of genomic
//! k-mer sets), strata answers two questions:
//!
//! - **best overlap**: which single reference shares the most hashes with a
//!   query? ([`MultiResolutionIndex::best_overlap`])
//! - **gather**: what minimal ordered list of references explains the query?
//!   ([`MultiResolutionIndex::gather`])
//!
//! ## How it works
//!
//! The index keeps one [`index::Layer`] per sampling resolution ("scaled"
//! value). Each layer downsamples every reference to its resolution and
//! groups content-identical sketches into clusters, storing a single
//! representative per cluster. A search walks the layers coarsest to finest:
//! the coarse layers are tiny (few surviving hashes, heavy deduplication) and
//! cheap to scan exhaustively, and each layer's winning cluster restricts
//! which clusters the next, finer layer has to compare against. Only the
//! finest layer's verdict is ever reported; coarse hits are narrowing hints.
//!
//! Gather is the greedy decomposition on top: query the index, emit the best
//! match, subtract its hashes from a residual copy of the query, repeat until
//! no reference overlaps the residual by at least the configured minimum.
//!
//! ## Example
//!
//! ```rust
//! use strata::{IndexParams, MultiResolutionIndex, ScaledSketch};
//!
//! let mut index = MultiResolutionIndex::new(IndexParams::default())?;
//!
//! // Hash values come from an external sketching pipeline; small values
//! // survive every layer here.
//! let genome = ScaledSketch::from_hashes((1..=500u64).map(|i| i * 131), 1000);
//! let id = index.add_reference(genome.clone())?;
//!
//! let (overlap, best) = index.best_overlap(&genome);
//! assert_eq!(best, Some(id));
//! assert_eq!(overlap, 500);
//!
//! let matches: Vec<_> = index.gather(&genome).collect();
//! assert_eq!(matches.len(), 1);
//! # Ok::<(), strata::Error>(())
//! ```
//!
//! ## What strata does not do
//!
//! Sketch construction from raw sequence (k-mer extraction and hashing),
//! signature file formats, and CLI plumbing all live outside this crate. The
//! index is generic over the [`Sketch`] trait; [`ScaledSketch`] is the
//! built-in fraction-minhash implementation. All overlap counts are estimates
//! derived from bounded samples, not exact set intersections.

pub mod error;
pub mod gather;
pub mod index;
pub mod sketch;

pub use error::{Error, Result};
pub use gather::{Gather, GatherMatch};
pub use index::{ClusterIndex, IndexParams, Layer, MultiResolutionIndex, ReferenceId};
pub use sketch::{Fingerprint, ScaledSketch, Sketch};
