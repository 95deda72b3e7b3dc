//! Sorted two-list reconciliation.
//!
//! Every list-shaped comparison (member ids, inner classes, missing classes)
//! goes through [`reconcile`]. Inputs must already be sorted by the same total
//! order and free of duplicates; the result aligns elements present on only
//! one side against the [`MISSING`] sentinel.

use serde::{Deserialize, Serialize};

/// Placeholder for "no counterpart on this side".
pub const MISSING: &str = "---";

/// Aligned rows of a list comparison. `left[i]` and `right[i]` are never both
/// [`MISSING`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListDiff {
    pub left: Vec<String>,
    pub right: Vec<String>,
}

impl ListDiff {
    #[must_use]
    pub fn len(&self) -> usize {
        self.left.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.left.is_empty()
    }

    /// Row pairs in display order.
    pub fn rows(&self) -> impl Iterator<Item = (&str, &str)> {
        self.left
            .iter()
            .map(String::as_str)
            .zip(self.right.iter().map(String::as_str))
    }

    /// Rewrite every non-sentinel row, e.g. to append flags to a bare id.
    #[must_use]
    pub fn map<F1, F2>(self, mut left: F1, mut right: F2) -> Self
    where
        F1: FnMut(&str) -> String,
        F2: FnMut(&str) -> String,
    {
        let render = |row: String, f: &mut dyn FnMut(&str) -> String| {
            if row == MISSING {
                row
            } else {
                f(&row)
            }
        };
        Self {
            left: self.left.into_iter().map(|r| render(r, &mut left)).collect(),
            right: self.right.into_iter().map(|r| render(r, &mut right)).collect(),
        }
    }

    /// Entries present on the left only.
    pub fn only_left(&self) -> impl Iterator<Item = &str> {
        self.rows().filter(|(_, r)| *r == MISSING).map(|(l, _)| l)
    }

    /// Entries present on the right only.
    pub fn only_right(&self) -> impl Iterator<Item = &str> {
        self.rows().filter(|(l, _)| *l == MISSING).map(|(_, r)| r)
    }
}

/// Merge-diff two sorted, duplicate-free sequences.
///
/// Returns `None` when both sequences are element-wise equal. Elements present
/// on both sides produce no row; deep comparison of matched pairs is up to the
/// caller.
///
/// # Examples
///
/// ```
/// use abicmp::diff::{reconcile, MISSING};
///
/// let diff = reconcile(&["bar()V", "foo()V"], &["baz()V", "foo()V"]).unwrap();
/// assert_eq!(diff.left, vec!["bar()V", MISSING]);
/// assert_eq!(diff.right, vec![MISSING, "baz()V"]);
/// assert!(reconcile(&["a"], &["a"]).is_none());
/// ```
pub fn reconcile<S: AsRef<str>>(list1: &[S], list2: &[S]) -> Option<ListDiff> {
    let mut diff = ListDiff::default();
    let (mut i1, mut i2) = (0, 0);

    loop {
        match (list1.get(i1), list2.get(i2)) {
            (None, None) => break,
            (Some(s1), None) => {
                diff.left.push(s1.as_ref().to_string());
                diff.right.push(MISSING.to_string());
                i1 += 1;
            }
            (None, Some(s2)) => {
                diff.left.push(MISSING.to_string());
                diff.right.push(s2.as_ref().to_string());
                i2 += 1;
            }
            (Some(s1), Some(s2)) => {
                let (s1, s2) = (s1.as_ref(), s2.as_ref());
                match s1.cmp(s2) {
                    std::cmp::Ordering::Equal => {
                        i1 += 1;
                        i2 += 1;
                    }
                    std::cmp::Ordering::Less => {
                        diff.left.push(s1.to_string());
                        diff.right.push(MISSING.to_string());
                        i1 += 1;
                    }
                    std::cmp::Ordering::Greater => {
                        diff.left.push(MISSING.to_string());
                        diff.right.push(s2.to_string());
                        i2 += 1;
                    }
                }
            }
        }
    }

    if diff.is_empty() {
        None
    } else {
        Some(diff)
    }
}
