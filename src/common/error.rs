//! Error types for pagetree.
//!
//! These are the *fatal* conditions surfaced to callers. The high-frequency
//! rebalancing signals (overflow, underflow, root merged) are not errors:
//! they travel as [`crate::page::InsertOutcome`] / [`crate::page::RemoveOutcome`]
//! return values between pages and are always absorbed before a public call
//! returns.

use thiserror::Error;

use crate::common::config::MIN_ORDER;

/// Convenient Result type alias.
///
/// Instead of writing `Result<T, Error>` everywhere, we can write
/// `Result<T>`. This is a common Rust pattern (see `std::io::Result`).
pub type Result<T> = std::result::Result<T, Error>;

/// All possible errors in pagetree.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// The requested page order is too small for three-way rebalancing.
    ///
    /// Orders below [`MIN_ORDER`] cannot satisfy the minimum split-run
    /// size, so they are rejected at construction time.
    #[error("page order {0} is below the minimum supported order {MIN_ORDER}")]
    InvalidOrder(usize),

    /// Insertion rejected because the key already exists in a unique tree.
    #[error("duplicate key rejected by unique tree")]
    DuplicateKey,

    /// Removal target was not present in the tree.
    #[error("key not found")]
    KeyNotFound,

    /// A structural invariant does not hold.
    ///
    /// Reported by [`crate::tree::BTree::validate`]; indicates a bug, not a
    /// runtime condition to retry.
    #[error("tree invariant violated: {0}")]
    InvariantViolation(String),
}
