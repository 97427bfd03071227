//! Tree wrapper - owns the root page and fronts the public API.
//!
//! [`BTree`] holds the root [`Page`] behind a single `parking_lot::Mutex`
//! and reacts to the outcome codes the page layer reports upward:
//! - root `Overflow` grows the tree by splitting the root in place;
//! - root `Underflow` is absorbed (the root is exempt from the minimum);
//! - `RootMerged` is absorbed (the merge already flattened the tree);
//! - `Duplicate` / `NotFound` surface as [`Error`] values.
//!
//! # Thread Safety
//! Coarse-grained: every public operation holds the tree lock for its
//! entire recursive descent, including any splitting or merging it
//! triggers. Two structural mutations can never interleave within one
//! tree. No per-page locking is attempted.

use std::fmt;
use std::fmt::Write as _;

use parking_lot::Mutex;

use crate::common::config::MIN_ORDER;
use crate::common::{Ascending, Error, KeyOrder, RefId, Result};
use crate::page::{Entry, InsertOutcome, Page, RemoveOutcome};

/// A caller-facing snapshot of one entry.
///
/// Returned by value: references into pages cannot outlive the tree lock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryView<K> {
    /// The search key.
    pub key: K,
    /// Opaque reference to the indexed object.
    pub ref_id: RefId,
    /// Successful search hits recorded for this key so far.
    pub use_count: u64,
}

impl<K> EntryView<K> {
    fn of(entry: &Entry<K>) -> Self
    where
        K: Clone,
    {
        Self {
            key: entry.key.clone(),
            ref_id: entry.ref_id,
            use_count: entry.use_count,
        }
    }
}

/// State guarded by the tree lock.
struct TreeInner<K, C> {
    root: Page<K, C>,
    len: usize,
}

/// An ordered index of key/reference pairs over fixed-capacity pages.
///
/// `order` is the capacity of every non-root page; the root is sized to
/// `2 * order + 1` keys so three-way splits and merges always have enough
/// material to work with (see [`crate::common::config`]).
///
/// The ordering is a type parameter: `BTree<K>` is ascending,
/// `BTree<K, Descending>` descending, and any [`KeyOrder`] implementation
/// works.
///
/// # Example
/// ```
/// use pagetree::{BTree, RefId};
///
/// let tree: BTree<i32> = BTree::new(3, true).unwrap();
/// tree.insert(42, RefId::new(420)).unwrap();
/// let hit = tree.search(&42).unwrap();
/// assert_eq!(hit.ref_id, RefId::new(420));
/// assert_eq!(hit.use_count, 1);
/// ```
pub struct BTree<K, C = Ascending> {
    inner: Mutex<TreeInner<K, C>>,
    /// Page capacity (immutable after construction).
    order: usize,
    /// Duplicate-key policy (immutable after construction).
    unique: bool,
}

impl<K, C: KeyOrder<K>> BTree<K, C> {
    /// Create an empty tree.
    ///
    /// # Arguments
    /// * `order` - Keys per non-root page
    /// * `unique` - Reject duplicate keys?
    ///
    /// # Errors
    /// `Error::InvalidOrder` if `order` is below [`MIN_ORDER`]: smaller
    /// pages cannot satisfy the minimum three-way split run.
    pub fn new(order: usize, unique: bool) -> Result<Self> {
        if order < MIN_ORDER {
            return Err(Error::InvalidOrder(order));
        }
        Ok(Self {
            inner: Mutex::new(TreeInner {
                root: Page::new_root(order, unique),
                len: 0,
            }),
            order,
            unique,
        })
    }

    // ========================================================================
    // Public API: mutation
    // ========================================================================

    /// Insert a key/reference pair.
    ///
    /// If the root overflows, it is split in place and the tree grows one
    /// level; all other overflows are absorbed inside the page layer.
    ///
    /// # Errors
    /// `Error::DuplicateKey` if the key exists and the tree is unique.
    pub fn insert(&self, key: K, ref_id: RefId) -> Result<()> {
        let mut inner = self.inner.lock();
        match inner.root.insert(key, ref_id) {
            InsertOutcome::Ok => {}
            InsertOutcome::Overflow => inner.root.split_root(),
            InsertOutcome::Duplicate => return Err(Error::DuplicateKey),
        }
        inner.len += 1;
        Ok(())
    }

    /// Remove a key.
    ///
    /// Underflow reported by the root itself is benign (the root has no
    /// minimum fill), and a `RootMerged` signal means the page layer
    /// already folded the root's children back into it.
    ///
    /// # Errors
    /// `Error::KeyNotFound` if the key is not present.
    pub fn remove(&self, key: &K, ref_id: RefId) -> Result<()> {
        let mut inner = self.inner.lock();
        match inner.root.remove(key, ref_id) {
            RemoveOutcome::NotFound => Err(Error::KeyNotFound),
            RemoveOutcome::Ok | RemoveOutcome::Underflow | RemoveOutcome::RootMerged => {
                inner.len -= 1;
                Ok(())
            }
        }
    }

    // ========================================================================
    // Public API: lookup and traversal
    // ========================================================================

    /// Look up a key, bumping its use counter on a hit.
    pub fn search(&self, key: &K) -> Option<EntryView<K>>
    where
        K: Clone,
    {
        let mut inner = self.inner.lock();
        inner.root.search(key).map(|e| EntryView::of(e))
    }

    /// Visit every entry in comparator order as `(entry view, depth)`;
    /// depth is 0 at the root and grows downward.
    pub fn for_each_in_order<F>(&self, mut f: F)
    where
        K: Clone,
        F: FnMut(EntryView<K>, usize),
    {
        let inner = self.inner.lock();
        inner
            .root
            .for_each_in_order(0, &mut |e, depth| f(EntryView::of(e), depth));
    }

    /// Visit every entry in pre-order (each page's entries before the
    /// subtrees hanging left of them).
    pub fn for_each_pre_order<F>(&self, mut f: F)
    where
        K: Clone,
        F: FnMut(EntryView<K>, usize),
    {
        let inner = self.inner.lock();
        inner
            .root
            .for_each_pre_order(0, &mut |e, depth| f(EntryView::of(e), depth));
    }

    /// Visit every entry in post-order (subtrees before their page's
    /// entries).
    pub fn for_each_post_order<F>(&self, mut f: F)
    where
        K: Clone,
        F: FnMut(EntryView<K>, usize),
    {
        let inner = self.inner.lock();
        inner
            .root
            .for_each_post_order(0, &mut |e, depth| f(EntryView::of(e), depth));
    }

    /// First entry (in comparator order) satisfying the predicate.
    pub fn first_that<F>(&self, mut pred: F) -> Option<EntryView<K>>
    where
        K: Clone,
        F: FnMut(&K, usize) -> bool,
    {
        let inner = self.inner.lock();
        inner
            .root
            .first_that(0, &mut |e, depth| pred(&e.key, depth))
            .map(EntryView::of)
    }

    // ========================================================================
    // Public API: info
    // ========================================================================

    /// Number of entries in the tree.
    pub fn len(&self) -> usize {
        self.inner.lock().len
    }

    /// Whether the tree holds no entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Page capacity this tree was built with.
    pub fn order(&self) -> usize {
        self.order
    }

    /// Whether duplicate keys are accepted.
    pub fn allows_duplicates(&self) -> bool {
        !self.unique
    }

    /// Number of page levels; 0 for an empty tree, 1 while the root is a
    /// leaf.
    pub fn height(&self) -> usize {
        let inner = self.inner.lock();
        if inner.len == 0 {
            0
        } else {
            inner.root.height()
        }
    }

    // ========================================================================
    // Diagnostics
    // ========================================================================

    /// Check every structural invariant of the tree.
    ///
    /// Walks all pages verifying slot bookkeeping, capacity bounds (root
    /// exempt from the minimum), per-page ordering and child sizing, then
    /// re-checks global ordering and the entry count via a full in-order
    /// traversal.
    ///
    /// # Errors
    /// `Error::InvariantViolation` describing the first violation found.
    /// Any violation indicates a bug, not a recoverable condition.
    pub fn validate(&self) -> Result<()>
    where
        K: Clone,
    {
        let inner = self.inner.lock();
        inner.root.check_invariants()?;

        let mut prev: Option<K> = None;
        let mut counted = 0usize;
        let mut ordered = true;
        inner.root.for_each_in_order(0, &mut |e, _| {
            if let Some(p) = &prev {
                let ord = C::cmp(p, &e.key);
                if ord == std::cmp::Ordering::Greater
                    || (self.unique && ord == std::cmp::Ordering::Equal)
                {
                    ordered = false;
                }
            }
            prev = Some(e.key.clone());
            counted += 1;
        });
        if !ordered {
            return Err(Error::InvariantViolation(
                "in-order traversal is out of comparator order".into(),
            ));
        }
        if counted != inner.len {
            return Err(Error::InvariantViolation(format!(
                "traversal found {} entries but the tree counts {}",
                counted, inner.len
            )));
        }
        Ok(())
    }
}

impl<K: fmt::Display, C: KeyOrder<K>> fmt::Display for BTree<K, C> {
    /// One `key->ref` line per entry, in order, tab-indented by depth.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.lock();
        let mut out = String::new();
        inner.root.for_each_in_order(0, &mut |e, depth| {
            for _ in 0..depth {
                out.push('\t');
            }
            let _ = writeln!(out, "{}->{}", e.key, e.ref_id.0);
        });
        f.write_str(&out)
    }
}

impl<K: Clone, C: KeyOrder<K>> Clone for BTree<K, C> {
    /// Deep copy, taken under the source tree's lock.
    fn clone(&self) -> Self {
        let inner = self.inner.lock();
        Self {
            inner: Mutex::new(TreeInner {
                root: inner.root.clone(),
                len: inner.len,
            }),
            order: self.order,
            unique: self.unique,
        }
    }
}
