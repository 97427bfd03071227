//! Reference identifier type.

use std::fmt;

/// Identifies the object a tree entry points at.
///
/// The tree never interprets this value; it is an opaque handle the caller
/// uses to reach the indexed object (a record id, an offset, ...).
/// Using `u64` keeps entries `Copy`-cheap while covering any practical
/// address space.
///
/// # Example
/// ```
/// use pagetree::RefId;
///
/// let id = RefId::new(42);
/// assert_eq!(id.0, 42);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RefId(pub u64);

impl RefId {
    /// Create a new RefId.
    #[inline]
    pub fn new(id: u64) -> Self {
        RefId(id)
    }
}

impl From<u64> for RefId {
    fn from(id: u64) -> Self {
        RefId(id)
    }
}

impl fmt::Display for RefId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Ref({})", self.0)
    }
}
