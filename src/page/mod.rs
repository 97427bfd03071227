//! Page layer - the fixed-capacity nodes of the tree.
//!
//! A [`Page`] holds an ordered run of [`Entry`] values plus one more child
//! slot than it has entries. All rebalancing (redistribution, three-way
//! split, three-way merge) lives here; the tree wrapper only reacts to the
//! outcome codes pages report upward.

mod entry;
mod page;
mod search;
mod slots;

pub use entry::Entry;
pub(crate) use page::Page;

/// Status a page reports after an insertion.
///
/// `Overflow` is an expected, recoverable control signal consumed by the
/// parent page (or by the tree wrapper when the root reports it); it never
/// reaches an end user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    /// Key inserted; this page is within capacity.
    Ok,
    /// Key inserted, but this page now exceeds `max_keys`. The caller must
    /// redistribute or split.
    Overflow,
    /// Key already present in a unique tree; nothing changed.
    Duplicate,
}

/// Status a page reports after a removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoveOutcome {
    /// Key removed; this page is within capacity.
    Ok,
    /// Key removed, but this page now holds fewer than `min_keys`. The
    /// caller must redistribute or merge.
    Underflow,
    /// Key was not present. Terminal: no structural change happened.
    NotFound,
    /// The root absorbed its three children; tree height shrank by one.
    /// Terminal: only the root merge produces it.
    RootMerged,
}
