//! Key ordering traits.
//!
//! Every comparison the tree performs goes through a [`KeyOrder`]
//! implementation chosen at the type level, so one tree type covers both
//! ascending and descending indexes without storing a comparator per page.

use std::cmp::Ordering;

/// Total order over keys of type `K`.
///
/// Implementations are zero-sized marker types; the tree carries them as a
/// type parameter (`BTree<K, Ascending>` by default).
pub trait KeyOrder<K> {
    /// Compare two keys under this ordering.
    fn cmp(a: &K, b: &K) -> Ordering;

    /// Whether two keys are equal under this ordering.
    #[inline]
    fn eq(a: &K, b: &K) -> bool {
        Self::cmp(a, b) == Ordering::Equal
    }
}

/// Natural (ascending) key order.
#[derive(Debug, Clone, Copy, Default)]
pub struct Ascending;

impl<K: Ord> KeyOrder<K> for Ascending {
    #[inline]
    fn cmp(a: &K, b: &K) -> Ordering {
        a.cmp(b)
    }
}

/// Reversed (descending) key order.
#[derive(Debug, Clone, Copy, Default)]
pub struct Descending;

impl<K: Ord> KeyOrder<K> for Descending {
    #[inline]
    fn cmp(a: &K, b: &K) -> Ordering {
        a.cmp(b).reverse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascending() {
        assert_eq!(<Ascending as KeyOrder<i32>>::cmp(&1, &2), Ordering::Less);
        assert!(<Ascending as KeyOrder<i32>>::eq(&3, &3));
    }

    #[test]
    fn test_descending() {
        assert_eq!(<Descending as KeyOrder<i32>>::cmp(&1, &2), Ordering::Greater);
        assert_eq!(<Descending as KeyOrder<i32>>::cmp(&5, &2), Ordering::Less);
    }
}
