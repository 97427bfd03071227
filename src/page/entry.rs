//! Entry - a single key/reference pair stored in a page.

use crate::common::RefId;

/// A key, the reference it indexes, and a hit counter.
///
/// `use_count` increments on every successful search that lands on this
/// entry; misses and operations on other keys never touch it.
#[derive(Debug, Clone)]
pub struct Entry<K> {
    /// The search key.
    pub key: K,
    /// Opaque reference to the indexed object.
    pub ref_id: RefId,
    /// How many times a search has hit this entry.
    pub use_count: u64,
}

impl<K> Entry<K> {
    /// Create a new entry with a zeroed hit counter.
    #[inline]
    pub fn new(key: K, ref_id: RefId) -> Self {
        Self {
            key,
            ref_id,
            use_count: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_new() {
        let e = Entry::new(10, RefId::new(100));
        assert_eq!(e.key, 10);
        assert_eq!(e.ref_id, RefId::new(100));
        assert_eq!(e.use_count, 0);
    }
}
