//! Property-based tests for list reconciliation and defect clustering.
//!
//! The merge diff underlies every list comparison, so its alignment
//! invariants are checked over random sorted inputs.

use abicmp::defects::{AttributeKind, DefectType, Location, SummaryReport};
use abicmp::diff::{reconcile, MISSING};
use proptest::prelude::*;
use std::collections::BTreeSet;

/// Sorted, duplicate-free lists of member-like ids.
fn sorted_ids() -> impl Strategy<Value = Vec<String>> {
    prop::collection::btree_set("[a-z]{1,6}\\(\\)V", 0..40)
        .prop_map(|set: BTreeSet<String>| set.into_iter().collect())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn absent_iff_equal(a in sorted_ids(), b in sorted_ids()) {
        prop_assert_eq!(reconcile(&a, &b).is_none(), a == b);
    }

    #[test]
    fn equal_inputs_always_absent(a in sorted_ids()) {
        prop_assert!(reconcile(&a, &a).is_none());
    }

    #[test]
    fn rows_aligned_and_never_both_missing(a in sorted_ids(), b in sorted_ids()) {
        if let Some(diff) = reconcile(&a, &b) {
            prop_assert_eq!(diff.left.len(), diff.right.len());
            for (l, r) in diff.rows() {
                prop_assert!(!(l == MISSING && r == MISSING));
            }
        }
    }

    #[test]
    fn swapping_inputs_swaps_sides(a in sorted_ids(), b in sorted_ids()) {
        let forward = reconcile(&a, &b);
        let backward = reconcile(&b, &a);
        match (forward, backward) {
            (None, None) => {}
            (Some(f), Some(r)) => {
                prop_assert_eq!(f.left, r.right);
                prop_assert_eq!(f.right, r.left);
            }
            _ => prop_assert!(false, "one direction absent, the other present"),
        }
    }

    #[test]
    fn rows_are_exactly_the_symmetric_difference(a in sorted_ids(), b in sorted_ids()) {
        let set_a: BTreeSet<&String> = a.iter().collect();
        let set_b: BTreeSet<&String> = b.iter().collect();
        let only_a: Vec<&str> = set_a.difference(&set_b).map(|s| s.as_str()).collect();
        let only_b: Vec<&str> = set_b.difference(&set_a).map(|s| s.as_str()).collect();

        let diff = reconcile(&a, &b).unwrap_or_default();
        prop_assert_eq!(diff.only_left().collect::<Vec<_>>(), only_a);
        prop_assert_eq!(diff.only_right().collect::<Vec<_>>(), only_b);
    }

    #[test]
    fn summary_counts_distinct_pairs(
        observations in prop::collection::vec((0u8..5, 0u8..5), 0..60)
    ) {
        let missing = DefectType::new("class.missing", "Missing [CLASS]", &[AttributeKind::Class]);
        let mut summary = SummaryReport::new();
        for (class, archive) in &observations {
            let info = missing
                .info([(AttributeKind::Class, format!("a/C{class}"))])
                .expect("complete info");
            summary.record(info, Location::archive(format!("lib{archive}.jar")));
        }

        let distinct: BTreeSet<_> = observations.iter().collect();
        let classes: BTreeSet<_> = observations.iter().map(|(c, _)| c).collect();
        prop_assert_eq!(summary.total_defects(), distinct.len());
        prop_assert_eq!(summary.total_unique_defects(), classes.len());
        for entry in summary.summarize() {
            let mut sorted = entry.locations.clone();
            sorted.sort();
            prop_assert_eq!(entry.locations, sorted);
        }
    }
}
