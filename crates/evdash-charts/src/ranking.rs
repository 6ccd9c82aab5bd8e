//! Top-N ranking over summary rows.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Sort direction of a ranking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    /// Smallest first; used for chronological axes.
    Ascending,
    /// Largest first; used for volume rankings.
    Descending,
}

/// How many rows a ranking keeps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Limit {
    /// At most this many rows.
    Top(usize),
    /// Every row.
    All,
}

impl Limit {
    fn apply(self, len: usize) -> usize {
        match self {
            Self::Top(n) => n.min(len),
            Self::All => len,
        }
    }
}

impl From<usize> for Limit {
    fn from(n: usize) -> Self {
        Self::Top(n)
    }
}

/// Sorts rows by `sort_key` and keeps the first `limit`.
///
/// The sort is stable, so rows with equal keys keep their input order.
/// Keys compare with [`f64::total_cmp`]; a `NaN` key ranks above every
/// number.
pub fn top_n<R>(
    mut rows: Vec<R>,
    sort_key: impl Fn(&R) -> f64,
    limit: Limit,
    direction: SortDirection,
) -> Vec<R> {
    rows.sort_by(|a, b| {
        let ord: Ordering = sort_key(a).total_cmp(&sort_key(b));
        match direction {
            SortDirection::Ascending => ord,
            SortDirection::Descending => ord.reverse(),
        }
    });
    let keep = limit.apply(rows.len());
    rows.truncate(keep);
    rows
}

/// Drops rows failing `keep`, then ranks the rest with [`top_n`].
///
/// Filtering comes first so that excluded rows can never occupy one of the
/// `limit` slots.
pub fn top_n_where<R>(
    rows: Vec<R>,
    keep: impl Fn(&R) -> bool,
    sort_key: impl Fn(&R) -> f64,
    limit: Limit,
    direction: SortDirection,
) -> Vec<R> {
    let kept: Vec<R> = rows.into_iter().filter(|row| keep(row)).collect();
    top_n(kept, sort_key, limit, direction)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn labelled(rows: &[(&'static str, u32)]) -> Vec<(&'static str, u32)> {
        rows.to_vec()
    }

    #[test]
    fn test_ties_keep_input_order() {
        let rows = labelled(&[("A", 5), ("B", 5), ("C", 3)]);
        let top = top_n(rows, |r| f64::from(r.1), Limit::Top(2), SortDirection::Descending);
        assert_eq!(top, vec![("A", 5), ("B", 5)]);
    }

    #[test]
    fn test_fewer_rows_than_limit() {
        let rows = labelled(&[("A", 1), ("B", 9)]);
        let top = top_n(rows, |r| f64::from(r.1), Limit::Top(10), SortDirection::Descending);
        assert_eq!(top, vec![("B", 9), ("A", 1)]);
    }

    #[test]
    fn test_ascending_all() {
        let rows = labelled(&[("2021", 2021), ("2012", 2012), ("2019", 2019)]);
        let sorted = top_n(rows, |r| f64::from(r.1), Limit::All, SortDirection::Ascending);
        let years: Vec<_> = sorted.iter().map(|r| r.0).collect();
        assert_eq!(years, vec!["2012", "2019", "2021"]);
    }

    #[test]
    fn test_zero_limit_is_empty() {
        let rows = labelled(&[("A", 1)]);
        assert!(top_n(rows, |r| f64::from(r.1), Limit::Top(0), SortDirection::Descending).is_empty());
    }

    #[test]
    fn test_filter_applies_before_slicing() {
        // Filtering after slicing would leave only one row.
        let rows = labelled(&[("A", 50), ("B", 40), ("C", 30), ("D", 20)]);
        let top = top_n_where(
            rows,
            |r| r.0 != "A",
            |r| f64::from(r.1),
            Limit::Top(2),
            SortDirection::Descending,
        );
        assert_eq!(top, vec![("B", 40), ("C", 30)]);
    }

    #[test]
    fn test_nan_keys_do_not_panic() {
        let rows = vec![("x", f64::NAN), ("y", 1.0), ("z", 2.0)];
        let top = top_n(rows, |r| r.1, Limit::All, SortDirection::Ascending);
        assert_eq!(top[0].0, "y");
        assert_eq!(top[2].0, "x");
    }

    proptest! {
        #[test]
        fn test_property_descending_order_and_length(
            values in prop::collection::vec(0u32..20, 0..60),
            n in 0usize..80,
        ) {
            let rows: Vec<(usize, u32)> = values.iter().copied().enumerate().collect();
            let top = top_n(rows.clone(), |r| f64::from(r.1), Limit::Top(n), SortDirection::Descending);

            prop_assert_eq!(top.len(), n.min(rows.len()));
            for pair in top.windows(2) {
                prop_assert!(pair[0].1 >= pair[1].1);
                // stable: equal keys keep original positions in order
                if pair[0].1 == pair[1].1 {
                    prop_assert!(pair[0].0 < pair[1].0);
                }
            }

            // prefix of the fully sorted input
            let full = top_n(rows, |r| f64::from(r.1), Limit::All, SortDirection::Descending);
            prop_assert_eq!(&full[..top.len()], &top[..]);
        }

        #[test]
        fn test_property_ascending_order(values in prop::collection::vec(-50i32..50, 0..60)) {
            let sorted = top_n(values, |v| f64::from(*v), Limit::All, SortDirection::Ascending);
            prop_assert!(sorted.windows(2).all(|w| w[0] <= w[1]));
        }

        #[test]
        fn test_property_ranking_is_idempotent(values in prop::collection::vec(0u32..10, 0..40)) {
            let first = top_n(values.clone(), |v| f64::from(*v), Limit::Top(5), SortDirection::Descending);
            let second = top_n(values, |v| f64::from(*v), Limit::Top(5), SortDirection::Descending);
            prop_assert_eq!(first, second);
        }
    }
}
