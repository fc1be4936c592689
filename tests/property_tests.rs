//! Property-based tests for the multi-resolution index.
//!
//! These verify invariants that should hold for any reference collection:
//! - a self query reports the reference's own element count
//! - `best_overlap` is a pure function of (index, query)
//! - gather terminates, never repeats a reference, and shrinks its residual
//!   by exactly the overlap it reports at every step

use proptest::prelude::*;
use std::collections::BTreeSet;

use strata::{IndexParams, MultiResolutionIndex, ScaledSketch, Sketch};

const SCALED: u64 = 1000;
const MIN_OVERLAP: usize = 10;

fn build_index(references: &[BTreeSet<u64>]) -> MultiResolutionIndex<ScaledSketch> {
    let mut index = MultiResolutionIndex::new(IndexParams {
        scaled_layers: vec![SCALED, 10_000, 100_000],
        min_overlap: MIN_OVERLAP,
    })
    .expect("valid params");
    for hashes in references {
        let sketch = ScaledSketch::from_hashes(hashes.iter().copied(), SCALED);
        index.add_reference(sketch).expect("fresh reference");
    }
    index
}

/// Reference collections: 1-8 sketches of 10-60 distinct small hashes.
/// Small values survive downsampling to every configured layer.
fn arb_references() -> impl Strategy<Value = Vec<BTreeSet<u64>>> {
    prop::collection::vec(
        prop::collection::btree_set(0u64..1_000_000, MIN_OVERLAP..60),
        1..8,
    )
}

fn arb_query() -> impl Strategy<Value = BTreeSet<u64>> {
    prop::collection::btree_set(0u64..1_000_000, 0..200)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn self_query_reports_own_element_count(references in arb_references()) {
        let index = build_index(&references);

        for hashes in &references {
            let query = ScaledSketch::from_hashes(hashes.iter().copied(), SCALED);
            let (count, best) = index.best_overlap(&query);
            // No reference can overlap a query by more than the query's own
            // size, and the query is itself indexed.
            prop_assert_eq!(count, query.len());
            prop_assert!(best.is_some());
        }
    }

    #[test]
    fn best_overlap_is_deterministic_per_index(
        references in arb_references(),
        query in arb_query(),
    ) {
        let index = build_index(&references);
        let query = ScaledSketch::from_hashes(query.iter().copied(), SCALED);
        prop_assert_eq!(index.best_overlap(&query), index.best_overlap(&query));
    }

    #[test]
    fn gather_terminates_without_repeats(
        references in arb_references(),
        query in arb_query(),
    ) {
        let index = build_index(&references);
        let query = ScaledSketch::from_hashes(query.iter().copied(), SCALED);

        let matches = index.gather(&query).run();
        prop_assert!(matches.len() <= references.len());

        let mut seen = std::collections::HashSet::new();
        for m in &matches {
            prop_assert!(seen.insert(m.reference));
        }
    }

    #[test]
    fn residual_shrinks_by_reported_overlap(
        references in arb_references(),
        query in arb_query(),
    ) {
        let index = build_index(&references);
        let query = ScaledSketch::from_hashes(query.iter().copied(), SCALED);

        let mut gather = index.gather(&query);
        let mut remaining = gather.residual().len();
        while let Some(m) = gather.next() {
            prop_assert!(m.overlap >= MIN_OVERLAP);
            let now = gather.residual().len();
            prop_assert_eq!(remaining - now, m.overlap);
            remaining = now;
        }
    }

    #[test]
    fn matched_overlap_never_exceeds_query_size(
        references in arb_references(),
        query in arb_query(),
    ) {
        let index = build_index(&references);
        let query = ScaledSketch::from_hashes(query.iter().copied(), SCALED);

        let (count, best) = index.best_overlap(&query);
        prop_assert!(count <= query.len());
        if count == 0 {
            prop_assert!(best.is_none());
        } else {
            prop_assert!(best.is_some());
        }
    }
}
