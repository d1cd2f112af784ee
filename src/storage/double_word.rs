//! `DoubleWord`: two pointer-sized halves updated as one atomic unit.
//!
//! The halves are packed into an integer twice the pointer width
//! (`high << usize::BITS | low`), and that integer is what the hardware sees.
//! Packing keeps the adapter pure and lets the generic operation set treat a
//! double word like any other value.
//!
//! Operations exist only under `cfg(atomics_dword)`. Without it the value type
//! and [`DoubleWordStorageLayout`] remain, but `DoubleWord` is not an
//! [`AtomicValue`](super::AtomicValue).

use core::cell::UnsafeCell;

/// The packed representation: `u128` on 64-bit targets.
#[cfg(target_pointer_width = "64")]
pub type DoubleWordBits = u128;

/// The packed representation: `u64` on 32-bit targets.
#[cfg(target_pointer_width = "32")]
pub type DoubleWordBits = u64;

#[cfg(not(any(target_pointer_width = "32", target_pointer_width = "64")))]
compile_error!("double words require a 32-bit or 64-bit pointer width");

const HALF_BITS: u32 = usize::BITS;

/// A pair of pointer-sized words, typically a pointer and a version tag.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct DoubleWord {
    high: usize,
    low: usize,
}

impl DoubleWord {
    /// Constructs a double word from its halves.
    #[inline(always)]
    pub const fn new(high: usize, low: usize) -> Self {
        Self { high, low }
    }

    /// The high half.
    #[inline(always)]
    pub const fn high(self) -> usize {
        self.high
    }

    /// The low half.
    #[inline(always)]
    pub const fn low(self) -> usize {
        self.low
    }

    /// Packs both halves into one double-width integer.
    #[inline(always)]
    pub const fn to_bits(self) -> DoubleWordBits {
        ((self.high as DoubleWordBits) << HALF_BITS) | self.low as DoubleWordBits
    }

    /// Splits a double-width integer into its halves.
    #[inline(always)]
    #[allow(clippy::cast_possible_truncation)]
    pub const fn from_bits(bits: DoubleWordBits) -> Self {
        Self {
            high: (bits >> HALF_BITS) as usize,
            low: bits as usize,
        }
    }
}

impl From<(usize, usize)> for DoubleWord {
    fn from((high, low): (usize, usize)) -> Self {
        Self::new(high, low)
    }
}

/// The memory layout of a double-word storage location.
///
/// Aligned to twice the pointer width, as the double-width instructions
/// require. Present on every target so that foreign layouts stay stable even
/// where no operations are generated.
#[cfg_attr(target_pointer_width = "64", repr(C, align(16)))]
#[cfg_attr(target_pointer_width = "32", repr(C, align(8)))]
pub struct DoubleWordStorageLayout {
    _bits: UnsafeCell<DoubleWordBits>,
}

impl DoubleWordStorageLayout {
    /// Size in bytes.
    pub const SIZE: usize = core::mem::size_of::<Self>();
    /// Alignment in bytes.
    pub const ALIGN: usize = core::mem::align_of::<Self>();
}

#[cfg(atomics_dword)]
mod atomic {
    use super::{DoubleWord, DoubleWordBits};
    use crate::storage::AtomicValue;

    #[cfg(target_pointer_width = "64")]
    type Cell = portable_atomic::AtomicU128;
    #[cfg(target_pointer_width = "32")]
    type Cell = core::sync::atomic::AtomicU64;

    // A double-width CAS that needs run-time detection or a lock is rejected
    // here rather than by `prepare`. `AtomicU64` exists only where it is native.
    #[cfg(target_pointer_width = "64")]
    const _: () = assert!(
        Cell::is_always_lock_free(),
        "cfg(atomics_dword) is set but the 128-bit atomic is not always lock-free"
    );

    impl AtomicValue for DoubleWord {
        type Atomic = Cell;

        #[inline(always)]
        fn encode(self) -> DoubleWordBits {
            self.to_bits()
        }

        #[inline(always)]
        fn decode(repr: DoubleWordBits) -> Self {
            Self::from_bits(repr)
        }
    }
}
