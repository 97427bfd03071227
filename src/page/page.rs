//! Page - a fixed-capacity node of the multiway search tree.
//!
//! A [`Page`] owns an ordered run of entries and one more child slot than
//! it has entries. Insert/remove/search recurse through child pages; the
//! page that sees a child report [`InsertOutcome::Overflow`] or
//! [`RemoveOutcome::Underflow`] repairs it on the way back up, first by
//! shuffling single keys between siblings and only then by a three-way
//! split or merge.
//!
//! # Capacity discipline
//! Pages are sized as if they were disk pages: each one reserves exactly
//! `max_keys + 1` entry slots and `max_keys + 2` child slots up front (the
//! extra slot is the transient overflow headroom) and never reallocates.
//! A page overflows above `max_keys` and underflows below
//! `floor(2 * max_keys / 3)`; the root is exempt from the minimum.
//!
//! # Ownership
//! Children are `Option<Box<Page>>`: every subtree has exactly one owner,
//! and splits/merges transfer boxes instead of copying pages, so a page can
//! never end up with two parents.

use std::marker::PhantomData;
use std::mem;

use crate::common::config::{
    min_keys_for, root_capacity_for, MIN_SPLIT_RUN_CHILDREN, MIN_SPLIT_RUN_KEYS,
};
use crate::common::{Error, KeyOrder, RefId, Result};
use crate::page::search::lower_bound;
use crate::page::slots;
use crate::page::{Entry, InsertOutcome, RemoveOutcome};

/// A node holding up to `max_keys` entries and `max_keys + 1` children.
pub(crate) struct Page<K, C> {
    /// Capacity of this page.
    max_keys: usize,
    /// Minimum fill: `floor(2 * max_keys / 3)`.
    min_keys: usize,
    /// Capacity pages below this one use (the root is sized larger than
    /// its children; every other page passes its own capacity down).
    max_keys_for_children: usize,
    /// Reject duplicate keys?
    unique: bool,
    /// Set only on the page the tree wrapper owns directly. Root-only
    /// operations key off this flag, never off a capacity mismatch.
    is_root: bool,
    /// The ordered entry run. `entries.len()` is the live key count.
    entries: Vec<Entry<K>>,
    /// Child slots; `children.len() == entries.len() + 1` at every stable
    /// point. All `None` iff this page is a leaf.
    children: Vec<Option<Box<Page<K, C>>>>,
    marker: PhantomData<C>,
}

impl<K, C: KeyOrder<K>> Page<K, C> {
    /// Create an empty non-root page of the given capacity.
    pub(crate) fn new(max_keys: usize, unique: bool) -> Self {
        let mut children = Vec::with_capacity(max_keys + 2);
        children.push(None);
        Self {
            max_keys,
            min_keys: min_keys_for(max_keys),
            max_keys_for_children: max_keys,
            unique,
            is_root: false,
            entries: Vec::with_capacity(max_keys + 1),
            children,
            marker: PhantomData,
        }
    }

    /// Create an empty root page for a tree of the given order.
    ///
    /// The root is sized to `2 * order + 1` keys so that a root split is
    /// always a valid three-way partition and a root merge always fits
    /// (see [`root_capacity_for`]).
    pub(crate) fn new_root(order: usize, unique: bool) -> Self {
        let mut page = Self::new(root_capacity_for(order), unique);
        page.max_keys_for_children = order;
        page.is_root = true;
        page
    }

    // ========================================================================
    // Capacity predicates
    // ========================================================================

    /// Number of live entries.
    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    fn overflows(&self) -> bool {
        self.len() > self.max_keys
    }

    #[inline]
    fn underflows(&self) -> bool {
        self.len() < self.min_keys
    }

    #[inline]
    fn is_full(&self) -> bool {
        self.len() >= self.max_keys
    }

    #[inline]
    fn free_cells(&self) -> usize {
        self.max_keys.saturating_sub(self.len())
    }

    /// A page is a leaf iff all its child slots are empty.
    #[inline]
    pub(crate) fn is_leaf(&self) -> bool {
        self.children[0].is_none()
    }

    #[inline]
    fn child(&self, pos: usize) -> &Page<K, C> {
        self.children[pos].as_deref().expect("missing child page")
    }

    #[inline]
    fn child_mut(&mut self, pos: usize) -> &mut Page<K, C> {
        self.children[pos].as_deref_mut().expect("missing child page")
    }

    // ========================================================================
    // Search
    // ========================================================================

    /// Locate `key`, bumping its use counter on a hit.
    pub(crate) fn search(&mut self, key: &K) -> Option<&mut Entry<K>> {
        let pos = lower_bound::<K, C>(&self.entries, key);
        if pos < self.len() && C::eq(&self.entries[pos].key, key) {
            let entry = &mut self.entries[pos];
            entry.use_count += 1;
            return Some(entry);
        }
        // No exact hit here; the key can only live below the slot it
        // sorts into.
        match self.children[pos].as_deref_mut() {
            Some(child) => child.search(key),
            None => None,
        }
    }

    // ========================================================================
    // Insert
    // ========================================================================

    /// Insert a key into the subtree rooted at this page.
    ///
    /// Reports `Overflow` upward when this page itself exceeds capacity
    /// after the insertion (and after repairing any child overflow).
    pub(crate) fn insert(&mut self, key: K, ref_id: RefId) -> InsertOutcome {
        let pos = lower_bound::<K, C>(&self.entries, &key);

        if self.unique && pos < self.len() && C::eq(&self.entries[pos].key, &key) {
            return InsertOutcome::Duplicate;
        }

        if self.children[pos].is_none() {
            // Leaf at the insertion point: the entry lands here.
            slots::insert_at(&mut self.entries, pos, Entry::new(key, ref_id));
            slots::insert_at(&mut self.children, pos + 1, None);
            return if self.overflows() {
                InsertOutcome::Overflow
            } else {
                InsertOutcome::Ok
            };
        }

        match self.child_mut(pos).insert(key, ref_id) {
            InsertOutcome::Overflow => {
                let mut pos = pos;
                if !self.redistribute_one(&mut pos) {
                    self.split_child(pos);
                }
                if self.overflows() {
                    InsertOutcome::Overflow
                } else {
                    InsertOutcome::Ok
                }
            }
            other => other,
        }
    }

    // ========================================================================
    // Remove
    // ========================================================================

    /// Remove a key from the subtree rooted at this page.
    ///
    /// Only the key is matched; `ref_id` is carried for signature
    /// compatibility with insertion.
    pub(crate) fn remove(&mut self, key: &K, ref_id: RefId) -> RemoveOutcome {
        let mut pos = lower_bound::<K, C>(&self.entries, key);
        let outcome;

        if pos < self.len() && C::eq(&self.entries[pos].key, key) {
            if self.children[pos + 1].is_none() {
                // Matched in a leaf: delete directly.
                slots::remove_at(&mut self.entries, pos);
                slots::remove_at(&mut self.children, pos + 1);
                return if self.underflows() {
                    RemoveOutcome::Underflow
                } else {
                    RemoveOutcome::Ok
                };
            }
            // Matched in an interior page: swap with the in-order
            // successor (leftmost entry of the right subtree), then chase
            // the key down into that subtree.
            {
                let (entries, children) = (&mut self.entries, &mut self.children);
                let successor = children[pos + 1]
                    .as_deref_mut()
                    .expect("interior match has a right child")
                    .leftmost_entry_mut();
                mem::swap(&mut entries[pos], successor);
            }
            pos += 1;
            outcome = self.child_mut(pos).remove(key, ref_id);
        } else {
            // No match at this level. `pos == len` means the key sorts past
            // the last entry; otherwise it sorts left of `entries[pos]`
            // (equal keys insert on the left, so duplicates resolve
            // leftmost too).
            match self.children[pos].as_deref_mut() {
                Some(child) => outcome = child.remove(key, ref_id),
                None => return RemoveOutcome::NotFound,
            }
        }

        match outcome {
            RemoveOutcome::Underflow => {
                if self.treat_underflow(&mut pos) {
                    return RemoveOutcome::Ok;
                }
                if self.is_root && self.len() == 2 {
                    return self.merge_root();
                }
                self.merge(pos)
            }
            RemoveOutcome::NotFound => RemoveOutcome::NotFound,
            _ => RemoveOutcome::Ok,
        }
    }

    /// Leftmost entry of the subtree rooted at this page.
    fn leftmost_entry_mut(&mut self) -> &mut Entry<K> {
        match self.children[0] {
            Some(ref mut child) => child.leftmost_entry_mut(),
            None => &mut self.entries[0],
        }
    }

    // ========================================================================
    // Redistribution
    // ========================================================================

    /// Try to fix the child at `pos` by borrowing through one sibling.
    ///
    /// Handles both directions: an overflowing child sheds keys into the
    /// sibling with more free space; an underflowing child borrows from the
    /// sibling with more slack above its minimum.
    ///
    /// On failure in the underflow case, `pos` is nudged toward a position
    /// that has both neighbors, so the caller's two-sibling retry and merge
    /// always operate on a full triple.
    fn redistribute_one(&mut self, pos: &mut usize) -> bool {
        let p = *pos;
        if self.child(p).underflows() {
            let left_keys = if p > 0 { self.child(p - 1).len() } else { 0 };
            let right_keys = if p < self.len() { self.child(p + 1).len() } else { 0 };

            if left_keys > right_keys {
                // Left sibling is the richer one.
                if left_keys > self.child(p - 1).min_keys {
                    self.rotate_left_to_right(p - 1);
                } else if p == self.len() {
                    *pos = p - 1;
                    return false;
                } else {
                    return false;
                }
            } else {
                // Right sibling is the richer one (or the only one).
                if p < self.len() && right_keys > self.child(p + 1).min_keys {
                    self.rotate_right_to_left(p + 1);
                } else if p == 0 {
                    *pos = p + 1;
                    return false;
                } else {
                    return false;
                }
            }
        } else {
            // Child overflow: shed keys toward the roomier sibling.
            let free_left = if p > 0 { self.child(p - 1).free_cells() } else { 0 };
            let free_right = if p < self.len() {
                self.child(p + 1).free_cells()
            } else {
                0
            };

            if free_left == 0 && free_right == 0 && self.child(p).is_full() {
                return false;
            }
            if free_left > free_right {
                self.rotate_right_to_left(p);
            } else {
                self.rotate_left_to_right(p);
            }
        }
        true
    }

    /// Try to fix an underflow by rotating through both neighbors of `pos`
    /// at once. If this fails too, the only remaining remedy is a merge.
    fn redistribute_two(&mut self, pos: usize) -> bool {
        if pos == 0 || pos >= self.len() {
            return false;
        }
        debug_assert!(
            self.child(pos - 1).underflows()
                || self.child(pos).underflows()
                || self.child(pos + 1).underflows()
        );

        if self.child(pos - 1).underflows() {
            self.rotate_right_to_left(pos + 1);
            self.rotate_right_to_left(pos);
            !self.child(pos - 1).underflows()
        } else if self.child(pos + 1).underflows() {
            self.rotate_left_to_right(pos - 1);
            self.rotate_left_to_right(pos);
            !self.child(pos + 1).underflows()
        } else {
            // The short page is exactly at pos; feed it from both sides.
            self.rotate_left_to_right(pos - 1);
            self.rotate_right_to_left(pos + 1);
            !self.child(pos).underflows()
        }
    }

    /// Single-sibling first, then the two-sibling rotation.
    fn treat_underflow(&mut self, pos: &mut usize) -> bool {
        self.redistribute_one(pos) || self.redistribute_two(*pos)
    }

    /// Rotate keys from the child at `pos` into its *left* sibling, one key
    /// per step through the parent separator, until the pair is balanced or
    /// the source reaches its minimum.
    fn rotate_right_to_left(&mut self, pos: usize) {
        loop {
            let src = self.child(pos);
            let dst = self.child(pos - 1);
            if src.len() <= src.min_keys || dst.len() >= src.len() {
                break;
            }
            // Detach the source's leftmost entry and child.
            let src = self.child_mut(pos);
            let first_entry = slots::remove_at(&mut src.entries, 0);
            let first_child = slots::remove_at(&mut src.children, 0);
            // Separator drops into the target's right end; the detached
            // entry replaces it in the parent.
            let separator = mem::replace(&mut self.entries[pos - 1], first_entry);
            let dst = self.child_mut(pos - 1);
            dst.entries.push(separator);
            dst.children.push(first_child);
        }
    }

    /// Mirror of [`Self::rotate_right_to_left`]: rotate keys from the child
    /// at `pos` into its *right* sibling.
    fn rotate_left_to_right(&mut self, pos: usize) {
        loop {
            let src = self.child(pos);
            let dst = self.child(pos + 1);
            if src.len() <= src.min_keys || dst.len() >= src.len() {
                break;
            }
            let src = self.child_mut(pos);
            let last_entry = src.entries.pop().expect("rotation source has keys");
            let last_child = src.children.pop().expect("rotation source has children");
            let separator = mem::replace(&mut self.entries[pos], last_entry);
            let dst = self.child_mut(pos + 1);
            slots::insert_at(&mut dst.entries, 0, separator);
            slots::insert_at(&mut dst.children, 0, last_child);
        }
    }

    // ========================================================================
    // Three-way split
    // ========================================================================

    /// Split two adjacent pages around `pos` into three.
    ///
    /// Reached only when redistribution failed, which guarantees every
    /// *existing* neighbor of the overflowing child is full. The pair is
    /// the overflowing child plus its left neighbor when that one is full,
    /// else its right neighbor; if neither neighbor is full (a degenerate
    /// layout no cascade produces) it pairs with whichever neighbor exists.
    /// The parent gains one key and one child slot.
    fn split_child(&mut self, pos: usize) {
        let mut p = pos;
        if p > 0 && self.child(p - 1).is_full() {
            p -= 1;
        } else if p >= self.len() {
            // Rightmost child with a non-full left neighbor; pair left
            // anyway, there is no right neighbor.
            p -= 1;
        }

        let left = self.children[p].take().expect("split pair left page");
        let right = self.children[p + 1].take().expect("split pair right page");
        let separator = slots::remove_at(&mut self.entries, p);

        let key_count = left.len() + right.len() + 1;
        let mut run_entries = Vec::with_capacity(key_count);
        let mut run_children = Vec::with_capacity(key_count + 1);
        Self::drain_page(left, &mut run_entries, &mut run_children);
        run_entries.push(separator);
        Self::drain_page(right, &mut run_entries, &mut run_children);

        let (page1, sep1, page2, sep2, page3) = self.split_run(run_entries, run_children);

        slots::insert_at(&mut self.entries, p, sep1);
        slots::insert_at(&mut self.entries, p + 1, sep2);
        self.children[p] = Some(page1);
        slots::insert_at(&mut self.children, p + 1, Some(page2));
        self.children[p + 2] = Some(page3);
    }

    /// Split an overflowing root in place: its whole run becomes three
    /// fresh children below it, with the two partition boundaries as the
    /// root's only keys. The root allocation itself never moves, so the
    /// tree wrapper's pointer stays valid. Grows tree height by one.
    pub(crate) fn split_root(&mut self) {
        let entries = mem::take(&mut self.entries);
        let children = mem::take(&mut self.children);
        let (page1, sep1, page2, sep2, page3) = self.split_run(entries, children);

        self.entries = Vec::with_capacity(self.max_keys + 1);
        self.entries.push(sep1);
        self.entries.push(sep2);
        self.children = Vec::with_capacity(self.max_keys + 2);
        self.children.push(Some(page1));
        self.children.push(Some(page2));
        self.children.push(Some(page3));
    }

    /// Partition an ordered run into three roughly equal pages plus the two
    /// boundary keys to promote.
    ///
    /// The run must hold at least 8 keys and 9 child slots; construction
    /// validation (`order >= 3` and the oversized root) keeps that true for
    /// every split this tree can trigger.
    fn split_run(
        &self,
        entries: Vec<Entry<K>>,
        children: Vec<Option<Box<Page<K, C>>>>,
    ) -> (
        Box<Page<K, C>>,
        Entry<K>,
        Box<Page<K, C>>,
        Entry<K>,
        Box<Page<K, C>>,
    ) {
        debug_assert!(entries.len() >= MIN_SPLIT_RUN_KEYS);
        debug_assert!(children.len() >= MIN_SPLIT_RUN_CHILDREN);
        debug_assert_eq!(children.len(), entries.len() + 1);

        let third = (entries.len() - 2) / 3;
        let last = entries.len() - 2 * third - 2;
        let mut entries = entries.into_iter();
        let mut children = children.into_iter();

        let page1 = self.fill_page(third, &mut entries, &mut children);
        let sep1 = entries.next().expect("split run first separator");
        let page2 = self.fill_page(third, &mut entries, &mut children);
        let sep2 = entries.next().expect("split run second separator");
        let page3 = self.fill_page(last, &mut entries, &mut children);

        (page1, sep1, page2, sep2, page3)
    }

    /// Pour a page's entries and children into a run, consuming the page.
    fn drain_page(
        mut page: Box<Page<K, C>>,
        run_entries: &mut Vec<Entry<K>>,
        run_children: &mut Vec<Option<Box<Page<K, C>>>>,
    ) {
        run_entries.append(&mut page.entries);
        run_children.append(&mut page.children);
    }

    /// Build a fresh child-capacity page from the next `key_count` keys
    /// (and `key_count + 1` child slots) of a run.
    fn fill_page(
        &self,
        key_count: usize,
        entries: &mut impl Iterator<Item = Entry<K>>,
        children: &mut impl Iterator<Item = Option<Box<Page<K, C>>>>,
    ) -> Box<Page<K, C>> {
        let mut page = Box::new(Page::new(self.max_keys_for_children, self.unique));
        page.children.clear();
        for _ in 0..key_count {
            page.entries.push(entries.next().expect("run entry"));
            page.children.push(children.next().expect("run child slot"));
        }
        page.children.push(children.next().expect("run child slot"));
        page
    }

    // ========================================================================
    // Three-way merge
    // ========================================================================

    /// Merge the three children around `pos` (plus their two separators)
    /// into two pages. The inverse of the three-way split: the parent loses
    /// one key and one child slot, and may itself underflow.
    fn merge(&mut self, pos: usize) -> RemoveOutcome {
        debug_assert!(pos >= 1 && pos < self.len());
        // Reached only when redistribution failed: both neighbors sit at
        // the minimum and the short page one below it.
        debug_assert_eq!(
            self.child(pos - 1).len() + self.child(pos).len() + self.child(pos + 1).len(),
            3 * self.child(pos).min_keys - 1
        );

        let left = self.children[pos - 1].take().expect("merge left page");
        let mid = self.children[pos].take().expect("merge middle page");
        let right = self.children[pos + 1].take().expect("merge right page");
        let sep_right = slots::remove_at(&mut self.entries, pos);
        let sep_left = slots::remove_at(&mut self.entries, pos - 1);
        slots::remove_at(&mut self.children, pos);

        let key_count = left.len() + mid.len() + right.len() + 2;
        let mut run_entries = Vec::with_capacity(key_count);
        let mut run_children = Vec::with_capacity(key_count + 1);
        Self::drain_page(left, &mut run_entries, &mut run_children);
        run_entries.push(sep_left);
        Self::drain_page(mid, &mut run_entries, &mut run_children);
        run_entries.push(sep_right);
        Self::drain_page(right, &mut run_entries, &mut run_children);

        // Left page absorbs a full page's worth; the promoted key becomes
        // the separator; the right page takes the remainder (always at or
        // above the minimum under the floor(2*max/3) rule).
        let child_cap = self.max_keys_for_children;
        let mut entries = run_entries.into_iter();
        let mut children = run_children.into_iter();
        let new_left = self.fill_page(child_cap, &mut entries, &mut children);
        let promoted = entries.next().expect("merge separator");
        let new_right = self.fill_page(key_count - child_cap - 1, &mut entries, &mut children);

        slots::insert_at(&mut self.entries, pos - 1, promoted);
        self.children[pos - 1] = Some(new_left);
        self.children[pos] = Some(new_right);

        if self.underflows() {
            RemoveOutcome::Underflow
        } else {
            RemoveOutcome::Ok
        }
    }

    /// Fold the root's three children back into the root's own storage.
    ///
    /// Invoked when the root holds exactly two keys and its children
    /// collectively underflow beyond redistribution. The only operation
    /// that reduces tree height.
    fn merge_root(&mut self) -> RemoveOutcome {
        debug_assert!(self.is_root && self.len() == 2);
        debug_assert_eq!(
            self.child(0).len() + self.child(1).len() + self.child(2).len(),
            3 * self.child(1).min_keys - 1
        );

        let left = self.children[0].take().expect("root merge left page");
        let mid = self.children[1].take().expect("root merge middle page");
        let right = self.children[2].take().expect("root merge right page");
        let sep_right = self.entries.pop().expect("root merge separator");
        let sep_left = self.entries.pop().expect("root merge separator");
        self.children.clear();

        let key_count = left.len() + mid.len() + right.len() + 2;
        let mut run_entries = Vec::with_capacity(key_count);
        let mut run_children = Vec::with_capacity(key_count + 1);
        Self::drain_page(left, &mut run_entries, &mut run_children);
        run_entries.push(sep_left);
        Self::drain_page(mid, &mut run_entries, &mut run_children);
        run_entries.push(sep_right);
        Self::drain_page(right, &mut run_entries, &mut run_children);

        // The merged run always fits: 3*min + 1 <= 2*order + 1.
        self.entries.extend(run_entries);
        self.children.extend(run_children);

        RemoveOutcome::RootMerged
    }

    // ========================================================================
    // Traversal
    // ========================================================================

    /// In-order walk yielding `(entry, depth)`; depth grows downward.
    pub(crate) fn for_each_in_order<F>(&self, depth: usize, f: &mut F)
    where
        F: FnMut(&Entry<K>, usize),
    {
        for i in 0..self.len() {
            if let Some(child) = &self.children[i] {
                child.for_each_in_order(depth + 1, f);
            }
            f(&self.entries[i], depth);
        }
        if let Some(child) = &self.children[self.len()] {
            child.for_each_in_order(depth + 1, f);
        }
    }

    /// Pre-order walk: each entry before the subtree left of it.
    pub(crate) fn for_each_pre_order<F>(&self, depth: usize, f: &mut F)
    where
        F: FnMut(&Entry<K>, usize),
    {
        for i in 0..self.len() {
            f(&self.entries[i], depth);
            if let Some(child) = &self.children[i] {
                child.for_each_pre_order(depth + 1, f);
            }
        }
        if let Some(child) = &self.children[self.len()] {
            child.for_each_pre_order(depth + 1, f);
        }
    }

    /// Post-order walk: all subtrees, then this page's entries.
    pub(crate) fn for_each_post_order<F>(&self, depth: usize, f: &mut F)
    where
        F: FnMut(&Entry<K>, usize),
    {
        for child in self.children.iter().flatten() {
            child.for_each_post_order(depth + 1, f);
        }
        for entry in &self.entries {
            f(entry, depth);
        }
    }

    /// First entry (in order) satisfying the predicate.
    pub(crate) fn first_that<F>(&self, depth: usize, f: &mut F) -> Option<&Entry<K>>
    where
        F: FnMut(&Entry<K>, usize) -> bool,
    {
        for i in 0..self.len() {
            if let Some(child) = &self.children[i] {
                if let Some(found) = child.first_that(depth + 1, f) {
                    return Some(found);
                }
            }
            if f(&self.entries[i], depth) {
                return Some(&self.entries[i]);
            }
        }
        match &self.children[self.len()] {
            Some(child) => child.first_that(depth + 1, f),
            None => None,
        }
    }

    /// Number of levels below and including this page.
    pub(crate) fn height(&self) -> usize {
        match &self.children[0] {
            Some(child) => 1 + child.height(),
            None => 1,
        }
    }

    // ========================================================================
    // Diagnostics
    // ========================================================================

    /// Check the structural invariants of this subtree.
    ///
    /// Verifies slot bookkeeping, capacity bounds (the root is exempt from
    /// the minimum), leaf consistency, in-page ordering and the capacity
    /// every child was configured with.
    pub(crate) fn check_invariants(&self) -> Result<()> {
        if self.children.len() != self.len() + 1 {
            return Err(Error::InvariantViolation(format!(
                "page has {} entries but {} child slots",
                self.len(),
                self.children.len()
            )));
        }
        if self.overflows() {
            return Err(Error::InvariantViolation(format!(
                "page holds {} keys, above its capacity {}",
                self.len(),
                self.max_keys
            )));
        }
        if !self.is_root && self.underflows() {
            return Err(Error::InvariantViolation(format!(
                "non-root page holds {} keys, below its minimum {}",
                self.len(),
                self.min_keys
            )));
        }
        let live_children = self.children.iter().filter(|c| c.is_some()).count();
        if live_children != 0 && live_children != self.children.len() {
            return Err(Error::InvariantViolation(
                "page mixes live and empty child slots".into(),
            ));
        }
        for i in 1..self.len() {
            let ord = C::cmp(&self.entries[i - 1].key, &self.entries[i].key);
            let out_of_order = if self.unique {
                ord != std::cmp::Ordering::Less
            } else {
                ord == std::cmp::Ordering::Greater
            };
            if out_of_order {
                return Err(Error::InvariantViolation(format!(
                    "entries {} and {} are out of order",
                    i - 1,
                    i
                )));
            }
        }
        for child in self.children.iter().flatten() {
            if child.max_keys != self.max_keys_for_children {
                return Err(Error::InvariantViolation(format!(
                    "child page sized for {} keys under a parent expecting {}",
                    child.max_keys, self.max_keys_for_children
                )));
            }
            child.check_invariants()?;
        }
        Ok(())
    }
}

// Deep copy; reserves full slot capacity on every cloned page so the copy
// rebalances exactly like the original.
impl<K: Clone, C> Clone for Page<K, C> {
    fn clone(&self) -> Self {
        let mut entries = Vec::with_capacity(self.max_keys + 1);
        entries.extend(self.entries.iter().cloned());
        let mut children = Vec::with_capacity(self.max_keys + 2);
        children.extend(self.children.iter().cloned());
        Self {
            max_keys: self.max_keys,
            min_keys: self.min_keys,
            max_keys_for_children: self.max_keys_for_children,
            unique: self.unique,
            is_root: self.is_root,
            entries,
            children,
            marker: PhantomData,
        }
    }
}
