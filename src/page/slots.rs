//! Bounded slot helpers - shifting insert/remove over a page's sequences.
//!
//! Pages reserve their full transient capacity up front, so these never
//! reallocate; the capacity check catches any page that would grow past
//! the bounds rebalancing assumes.

/// Insert `value` at `pos`, shifting later slots right.
#[inline]
pub(crate) fn insert_at<T>(slots: &mut Vec<T>, pos: usize, value: T) {
    debug_assert!(
        slots.len() < slots.capacity(),
        "slot sequence exceeded its reserved capacity"
    );
    slots.insert(pos, value);
}

/// Remove and return the slot at `pos`, shifting later slots left.
#[inline]
pub(crate) fn remove_at<T>(slots: &mut Vec<T>, pos: usize) -> T {
    slots.remove(pos)
}
