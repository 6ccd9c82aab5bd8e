//! The "group by key, reduce to summary" primitive every count chart builds on.

use indexmap::IndexMap;
use std::hash::Hash;

/// Result of [`group_by`]: one reduced value per distinct key.
///
/// Iteration follows the order in which keys were first seen. Rankings
/// rely on that for their tie order, but nothing else should; sort
/// explicitly when order matters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Groups<K: Hash + Eq, V> {
    inner: IndexMap<K, V>,
}

impl<K: Hash + Eq, V> Groups<K, V> {
    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// True when the input was empty.
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Reduced value for a key.
    pub fn get(&self, key: &K) -> Option<&V> {
        self.inner.get(key)
    }

    /// Keys in first-seen order.
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.inner.keys()
    }

    /// Key/value pairs in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.inner.iter()
    }

    /// Turns each group into a summary row.
    pub fn into_rows<R>(self, mut to_row: impl FnMut(K, V) -> R) -> Vec<R> {
        self.inner.into_iter().map(|(k, v)| to_row(k, v)).collect()
    }
}

impl<K: Hash + Eq, V> IntoIterator for Groups<K, V> {
    type Item = (K, V);
    type IntoIter = indexmap::map::IntoIter<K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.inner.into_iter()
    }
}

/// Partitions `items` by `key_fn` and reduces each partition with `reduce_fn`.
///
/// Every item lands in exactly one group and each reducer sees exactly the
/// members of its group, in input order. Empty input gives empty groups.
pub fn group_by<'a, T, K, V>(
    items: &'a [T],
    key_fn: impl Fn(&T) -> K,
    reduce_fn: impl Fn(&[&'a T]) -> V,
) -> Groups<K, V>
where
    K: Hash + Eq,
{
    let mut members: IndexMap<K, Vec<&'a T>> = IndexMap::new();
    for item in items {
        members.entry(key_fn(item)).or_default().push(item);
    }

    Groups {
        inner: members
            .into_iter()
            .map(|(key, group)| {
                let value = reduce_fn(&group);
                (key, value)
            })
            .collect(),
    }
}

/// Number of items per key.
pub fn count_by<T, K>(items: &[T], key_fn: impl Fn(&T) -> K) -> Groups<K, usize>
where
    K: Hash + Eq,
{
    let mut counts: IndexMap<K, usize> = IndexMap::new();
    for item in items {
        *counts.entry(key_fn(item)).or_insert(0) += 1;
    }
    Groups { inner: counts }
}

#[cfg(test)]
mod tests {
    use super::*;
    use evdash_common::test_utils::property_testing::table_strategy;
    use evdash_common::test_utils::record_fixtures::sample_table;
    use evdash_common::VehicleRecord;
    use proptest::prelude::*;

    #[test]
    fn test_empty_input_gives_empty_groups() {
        let records: Vec<VehicleRecord> = Vec::new();
        let groups = group_by(&records, |r| r.make.clone(), <[&VehicleRecord]>::len);
        assert!(groups.is_empty());
        assert!(count_by(&records, |r| r.county.clone()).is_empty());
    }

    #[test]
    fn test_groups_keep_first_seen_order() {
        let groups = count_by(&sample_table(), |r| r.make.clone());
        let makes: Vec<_> = groups.keys().cloned().collect();
        assert_eq!(makes, vec!["TESLA", "TOYOTA", "NISSAN", "CHEVROLET"]);
        assert_eq!(groups.get(&"TESLA".to_string()), Some(&6));
    }

    #[test]
    fn test_reducer_sees_only_its_members() {
        let groups = group_by(
            &sample_table(),
            |r| r.county.clone(),
            |members| members.iter().all(|r| r.county == members[0].county),
        );
        assert!(groups.iter().all(|(_, same)| *same));
    }

    #[test]
    fn test_into_rows_maps_each_group() {
        let rows = count_by(&[3, 1, 3, 3, 2], |n| *n).into_rows(|k, v| (k, v));
        assert_eq!(rows, vec![(3, 3), (1, 1), (2, 1)]);
    }

    proptest! {
        #[test]
        fn test_property_group_by_is_a_partition(records in table_strategy(80)) {
            let groups = group_by(&records, |r| r.city.clone(), |members| members.to_vec());

            let total: usize = groups.iter().map(|(_, members)| members.len()).sum();
            prop_assert_eq!(total, records.len());

            for (city, members) in groups.iter() {
                prop_assert!(members.iter().all(|r| &r.city == city));
            }

            // disjoint and complete: each input position is claimed once
            let mut claimed = vec![0usize; records.len()];
            for (_, members) in groups.iter() {
                for member in members {
                    let idx = records
                        .iter()
                        .position(|r| std::ptr::eq(r, *member))
                        .unwrap();
                    claimed[idx] += 1;
                }
            }
            prop_assert!(claimed.iter().all(|&c| c == 1));
        }

        #[test]
        fn test_property_count_by_matches_group_sizes(records in table_strategy(80)) {
            let counts = count_by(&records, |r| r.make.clone());
            let groups = group_by(&records, |r| r.make.clone(), <[&VehicleRecord]>::len);
            prop_assert_eq!(counts, groups);
        }
    }
}
