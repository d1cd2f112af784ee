//! Standalone thread fences.

use crate::ordering::FenceOrdering;
use core::sync::atomic;

/// Issues a memory fence with the given ordering.
///
/// A release fence followed by a relaxed store synchronizes with a relaxed
/// load followed by an acquire fence, exactly as the corresponding
/// release-store / acquire-load pair would.
#[inline(always)]
pub fn thread_fence(ordering: FenceOrdering) {
    atomic::fence(ordering.to_ordering());
}
