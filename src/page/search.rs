//! Position finder - order-preserving binary search over a page's entries.

use std::cmp::Ordering;

use crate::common::KeyOrder;
use crate::page::Entry;

/// Find where `key` belongs in an ordered entry run.
///
/// Returns the smallest index `i` such that `key <= entries[i].key` under
/// the comparator `C`, or `entries.len()` if no such index exists (the key
/// belongs past the last entry). With duplicates this lands on the
/// *leftmost* equal entry, which is what keeps insertion and removal of
/// equal keys consistent with each other.
///
/// Runs in `O(log n)`.
#[inline]
pub(crate) fn lower_bound<K, C: KeyOrder<K>>(entries: &[Entry<K>], key: &K) -> usize {
    entries.partition_point(|e| C::cmp(&e.key, key) == Ordering::Less)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::{Ascending, Descending, RefId};

    fn run(keys: &[i32]) -> Vec<Entry<i32>> {
        keys.iter().map(|&k| Entry::new(k, RefId::new(0))).collect()
    }

    #[test]
    fn test_lower_bound_hit_and_miss() {
        let entries = run(&[10, 20, 30, 40]);
        assert_eq!(lower_bound::<_, Ascending>(&entries, &10), 0);
        assert_eq!(lower_bound::<_, Ascending>(&entries, &25), 2);
        assert_eq!(lower_bound::<_, Ascending>(&entries, &40), 3);
        assert_eq!(lower_bound::<_, Ascending>(&entries, &99), 4);
        assert_eq!(lower_bound::<_, Ascending>(&entries, &5), 0);
    }

    #[test]
    fn test_lower_bound_empty() {
        let entries = run(&[]);
        assert_eq!(lower_bound::<_, Ascending>(&entries, &1), 0);
    }

    #[test]
    fn test_lower_bound_leftmost_duplicate() {
        let entries = run(&[10, 20, 20, 20, 30]);
        assert_eq!(lower_bound::<_, Ascending>(&entries, &20), 1);
    }

    #[test]
    fn test_lower_bound_descending() {
        let entries = run(&[40, 30, 20, 10]);
        assert_eq!(lower_bound::<_, Descending>(&entries, &30), 1);
        assert_eq!(lower_bound::<_, Descending>(&entries, &35), 1);
        assert_eq!(lower_bound::<_, Descending>(&entries, &50), 0);
        assert_eq!(lower_bound::<_, Descending>(&entries, &5), 4);
    }
}
