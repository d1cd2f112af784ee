//! Atomic storage locations.
//!
//! An [`AtomicStorage<T>`] owns exactly one hardware atomic cell holding the
//! encoded form of a `T`. The cell is reachable only through the operation
//! set in [`crate::ops`]; there is no plain read or write.
//!
//! Layering:
//! - [`AtomicRepr`] and its extensions wrap the hardware cell.
//! - [`AtomicValue`] attaches an encode/decode adapter to a logical type.
//! - [`AtomicStorage`] ties the two together and is the only constructor path.

/// `DoubleWord` and its layout.
pub mod double_word;
/// Hardware atomic cells.
pub mod repr;
/// Encode/decode adapters.
pub mod value;

pub use double_word::{DoubleWord, DoubleWordBits, DoubleWordStorageLayout};
pub use repr::{AtomicArithmeticRepr, AtomicBitwiseRepr, AtomicRepr};
pub use value::AtomicValue;

use core::fmt;
use core::marker::PhantomData;
use core::sync::atomic::Ordering;

/// One atomic memory location holding a `T`.
///
/// `repr(transparent)` over the hardware cell, so a pointer to an
/// `AtomicStorage<T>` is a pointer to the atomic itself and the alignment is
/// the cell's natural alignment.
#[repr(transparent)]
pub struct AtomicStorage<T: AtomicValue> {
    inner: T::Atomic,
    _value: PhantomData<T>,
}

impl<T: AtomicValue> AtomicStorage<T> {
    /// Prepares a storage location holding `value`.
    ///
    /// # Panics
    ///
    /// Panics if the hardware cell for `T` is not lock-free. That is a
    /// configuration error of the build, not a condition callers handle.
    #[inline]
    pub fn prepare(value: T) -> Self {
        assert!(
            T::Atomic::is_lock_free(),
            "atomic storage for `{}` is not lock-free on this target",
            core::any::type_name::<T>()
        );
        Self {
            inner: T::Atomic::new(value.encode()),
            _value: PhantomData,
        }
    }

    /// Consumes the storage, returning its final value.
    #[inline]
    pub fn dispose(self) -> T {
        T::decode(self.inner.into_inner())
    }

    #[inline(always)]
    pub(crate) fn cell(&self) -> &T::Atomic {
        &self.inner
    }
}

impl<T: AtomicValue> From<T> for AtomicStorage<T> {
    fn from(value: T) -> Self {
        Self::prepare(value)
    }
}

impl<T: AtomicValue + Default> Default for AtomicStorage<T> {
    fn default() -> Self {
        Self::prepare(T::default())
    }
}

impl<T: AtomicValue + fmt::Debug> fmt::Debug for AtomicStorage<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("AtomicStorage")
            .field(&T::decode(self.inner.load(Ordering::Relaxed)))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prepare_then_dispose() {
        assert_eq!(AtomicStorage::prepare(-7i8).dispose(), -7);
        assert_eq!(AtomicStorage::prepare(u64::MAX).dispose(), u64::MAX);
        assert!(AtomicStorage::prepare(true).dispose());
        assert_eq!(AtomicStorage::<isize>::default().dispose(), 0);
        assert_eq!(AtomicStorage::from(9usize).dispose(), 9);
    }

    #[test]
    fn debug_shows_value() {
        assert_eq!(format!("{:?}", AtomicStorage::prepare(42u16)), "AtomicStorage(42)");
    }

    #[test]
    fn natural_alignment() {
        assert_eq!(core::mem::align_of::<AtomicStorage<u16>>(), 2);
        assert_eq!(core::mem::align_of::<AtomicStorage<u32>>(), 4);
        assert_eq!(core::mem::align_of::<AtomicStorage<u64>>(), 8);
    }
}
