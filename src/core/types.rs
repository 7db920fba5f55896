/*!
 * Core Types
 * Common types used across the allocator
 */

use super::limits::ALIGNMENT;

/// Byte offset into an arena
pub type Offset = usize;

/// Size type for arena operations
pub type Size = usize;

/// Round `value` up to the next multiple of [`ALIGNMENT`].
///
/// Returns `None` when the rounded value does not fit in a `usize`.
///
/// ```
/// use arena_heap::core::align4;
///
/// assert_eq!(align4(0), Some(0));
/// assert_eq!(align4(13), Some(16));
/// assert_eq!(align4(16), Some(16));
/// assert_eq!(align4(usize::MAX), None);
/// ```
#[inline]
pub const fn align4(value: Size) -> Option<Size> {
    match value.checked_add(ALIGNMENT - 1) {
        Some(padded) => Some(padded & !(ALIGNMENT - 1)),
        None => None,
    }
}
