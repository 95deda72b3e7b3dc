//! Annotation list diff.

use super::list::{ListDiff, MISSING};
use crate::model::AnnotationEntry;
use std::cmp::Ordering;

/// Platform metadata annotations that are never worth reporting.
pub const DEFAULT_IGNORED_ANNOTATIONS: &[&str] = &[
    "Lkotlin/Metadata;",
    "Lkotlin/coroutines/jvm/internal/DebugMetadata;",
];

/// Align two annotation lists by descriptor and deep-compare matched pairs.
///
/// Rows are prefixed `==` (unchanged), `!=` (same descriptor, different
/// values, rendered in full) or `+` (present on one side, other side
/// [`MISSING`]). Returns `None` when every entry matched with equal values.
pub fn diff_annotations(
    entries1: &[AnnotationEntry],
    entries2: &[AnnotationEntry],
    ignore: &[String],
) -> Option<ListDiff> {
    let anns1 = preprocess(entries1, ignore);
    let anns2 = preprocess(entries2, ignore);

    let mut has_diff = false;
    let mut diff = ListDiff::default();
    let (mut i1, mut i2) = (0, 0);

    loop {
        match (anns1.get(i1), anns2.get(i2)) {
            (None, None) => break,
            (Some(a1), None) => {
                has_diff = true;
                diff.left.push(format!("+ {}", a1.short_string()));
                diff.right.push(MISSING.to_string());
                i1 += 1;
            }
            (None, Some(a2)) => {
                has_diff = true;
                diff.left.push(MISSING.to_string());
                diff.right.push(format!("+ {}", a2.short_string()));
                i2 += 1;
            }
            (Some(a1), Some(a2)) => {
                let (full1, full2) = (a1.full_string(), a2.full_string());
                if full1 == full2 {
                    diff.left.push(format!("== {}", a1.short_string()));
                    diff.right.push(format!("== {}", a2.short_string()));
                    i1 += 1;
                    i2 += 1;
                    continue;
                }
                has_diff = true;
                match a1.desc.cmp(&a2.desc) {
                    Ordering::Equal => {
                        diff.left.push(format!("!= {full1}"));
                        diff.right.push(format!("!= {full2}"));
                        i1 += 1;
                        i2 += 1;
                    }
                    Ordering::Less => {
                        diff.left.push(format!("+ {}", a1.short_string()));
                        diff.right.push(MISSING.to_string());
                        i1 += 1;
                    }
                    Ordering::Greater => {
                        diff.left.push(MISSING.to_string());
                        diff.right.push(format!("+ {}", a2.short_string()));
                        i2 += 1;
                    }
                }
            }
        }
    }

    has_diff.then_some(diff)
}

fn preprocess<'a>(entries: &'a [AnnotationEntry], ignore: &[String]) -> Vec<&'a AnnotationEntry> {
    let mut kept: Vec<&AnnotationEntry> = entries
        .iter()
        .filter(|e| !ignore.iter().any(|d| *d == e.desc))
        .collect();
    // Stable, so repeated descriptors keep declaration order.
    kept.sort_by(|a, b| a.desc.cmp(&b.desc));
    kept
}
