//! pagetree - an ordered in-memory index of fixed-capacity pages.
//!
//! # Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                         pagetree                            │
//! ├─────────────────────────────────────────────────────────────┤
//! │  ┌─────────────────────────────────────────────────────┐   │
//! │  │                Tree Layer (tree/)                    │   │
//! │  │   BTree: coarse per-tree lock, root split/merge,     │   │
//! │  │   insert/remove/search, traversal visitors           │   │
//! │  └─────────────────────────────────────────────────────┘   │
//! │                            ↓  outcome codes                 │
//! │  ┌─────────────────────────────────────────────────────┐   │
//! │  │                Page Layer (page/)                    │   │
//! │  │  ┌───────────────────────────────────────────────┐  │   │
//! │  │  │ Rebalancing: sibling redistribution →         │  │   │
//! │  │  │ three-way split ⟷ three-way merge             │  │   │
//! │  │  └───────────────────────────────────────────────┘  │   │
//! │  │   Page + Entry + position finder + slot helpers      │   │
//! │  └─────────────────────────────────────────────────────┘   │
//! │                            ↓                                │
//! │  ┌─────────────────────────────────────────────────────┐   │
//! │  │              Common Layer (common/)                  │   │
//! │  │   config + Error + RefId + key ordering traits       │   │
//! │  └─────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Pages hold up to `order` keys and `order + 1` children, and never drop
//! below `floor(2 * order / 3)` keys (root excepted). Overflow is repaired
//! by shuffling single keys into a sibling or, failing that, splitting two
//! full pages into three; underflow by the mirror moves, merging three
//! short pages into two. Only the root split and the root merge change
//! tree height. Pages are in-memory structures sized as if they were disk
//! pages: fixed slot counts, reserved up front, never reallocated.
//!
//! # Modules
//! - [`common`] - Shared primitives (config, Error, RefId, key ordering)
//! - [`page`] - Fixed-capacity pages and all rebalancing logic
//! - [`tree`] - The `BTree` wrapper and public API
//!
//! # Quick Start
//! ```
//! use pagetree::{BTree, RefId};
//!
//! let tree: BTree<u32> = BTree::new(3, true).unwrap();
//! for key in [50, 30, 70, 20, 40, 60, 80] {
//!     tree.insert(key, RefId::new(key as u64)).unwrap();
//! }
//!
//! let mut keys = Vec::new();
//! tree.for_each_in_order(|entry, _depth| keys.push(entry.key));
//! assert_eq!(keys, vec![20, 30, 40, 50, 60, 70, 80]);
//! ```

pub mod common;
pub mod page;
pub mod tree;

// Re-export commonly used items at crate root for convenience
pub use common::config::MIN_ORDER;
pub use common::{Ascending, Descending, Error, KeyOrder, RefId, Result};
pub use page::{Entry, InsertOutcome, RemoveOutcome};
pub use tree::{BTree, EntryView};
