//! Configuration constants and capacity formulas for pagetree.

/// Smallest supported page order (keys per non-root page).
///
/// The three-way split partitions a run built from two adjacent pages plus
/// one parent separator. For the partition to produce three pages that all
/// respect the minimum fill, the run needs at least [`MIN_SPLIT_RUN_KEYS`]
/// keys. The smallest run occurs when an overflowing page (`order + 1`
/// keys) pairs with a full sibling (`order` keys):
///
/// ```text
/// (order + 1) + order + 1 separator = 2*order + 2  >=  8
/// ```
///
/// which holds exactly from `order = 3` upward. Tree construction rejects
/// anything smaller instead of relying on an internal assertion.
pub const MIN_ORDER: usize = 3;

/// Minimum number of keys in a run for a 2-into-3 split to be valid.
pub const MIN_SPLIT_RUN_KEYS: usize = 8;

/// Minimum number of child slots in a split run (always one more than keys).
pub const MIN_SPLIT_RUN_CHILDREN: usize = MIN_SPLIT_RUN_KEYS + 1;

/// Minimum fill for a page of the given capacity.
///
/// A page underflows when it holds fewer than `floor(2 * max_keys / 3)`
/// keys. This ratio keeps the three-way merge exact: three pages at the
/// minimum hold `3*min - 1` keys after one deletion, and together with the
/// two separators they redistribute into two pages without violating
/// either bound (`3*min <= 2*max_keys` for every `max_keys`).
#[inline]
pub const fn min_keys_for(max_keys: usize) -> usize {
    2 * max_keys / 3
}

/// Capacity of the root page for a tree of the given order.
///
/// The root is sized to `2*order + 1` keys:
/// - An overflowing root holds `2*order + 2` keys, exactly the smallest
///   valid split run for `order >= 3`, so a root split always partitions
///   cleanly into three children of capacity `order`.
/// - A root merge pours `3*min - 1` child keys plus two separators back
///   into the root; `3*min + 1 <= 2*order + 1` holds for every order.
#[inline]
pub const fn root_capacity_for(order: usize) -> usize {
    2 * order + 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_min_order_satisfies_split_run() {
        // Overflowing page + full sibling + separator at the minimum order.
        assert_eq!((MIN_ORDER + 1) + MIN_ORDER + 1, MIN_SPLIT_RUN_KEYS);
    }

    #[test]
    fn test_min_keys_ratio() {
        assert_eq!(min_keys_for(3), 2);
        assert_eq!(min_keys_for(4), 2);
        assert_eq!(min_keys_for(6), 4);
        assert_eq!(min_keys_for(7), 4);
    }

    #[test]
    fn test_merge_fits_two_pages() {
        // The merge run holds 3*min - 1 keys plus 2 separators; one of
        // those is promoted into the parent, so 3*min keys must fit into
        // two pages of capacity max.
        for max in MIN_ORDER..=64 {
            let min = min_keys_for(max);
            assert!(3 * min <= 2 * max, "merge overflows at order {max}");
            // The right page receives the remainder after the left absorbs max.
            assert!(3 * min >= max, "merge underflows right page at order {max}");
        }
    }

    #[test]
    fn test_root_capacity() {
        for order in MIN_ORDER..=64 {
            let root = root_capacity_for(order);
            // Overflowing root is a valid split run.
            assert!(root + 1 >= MIN_SPLIT_RUN_KEYS);
            // Merged root contents always fit.
            assert!(3 * min_keys_for(order) + 1 <= root);
        }
    }
}
