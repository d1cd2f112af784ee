//! Hardware atomic representations.
//!
//! `AtomicRepr` is the narrow seam between this crate and whatever provides
//! the instructions: `core::sync::atomic` for the native widths and
//! `portable_atomic::AtomicU128` for 64-bit double words. Operations take a
//! plain `core::sync::atomic::Ordering`; the typed orderings have already
//! excluded illegal values by the time a call reaches this layer.

use core::sync::atomic::{
    AtomicBool, AtomicI16, AtomicI32, AtomicI8, AtomicIsize, AtomicU16, AtomicU32, AtomicU8,
    AtomicUsize, Ordering,
};
#[cfg(target_has_atomic = "64")]
use core::sync::atomic::{AtomicI64, AtomicU64};

/// A hardware atomic cell.
///
/// # Safety
///
/// Implementors must be lock-free whenever `is_lock_free` returns `true`, and
/// every method must be a single atomic access to the one location they own.
pub unsafe trait AtomicRepr: Send + Sync + Sized {
    /// The plain value held by the cell.
    type Value: Copy + Eq;

    /// Creates a cell holding `value`.
    fn new(value: Self::Value) -> Self;

    /// Consumes the cell, returning its value.
    fn into_inner(self) -> Self::Value;

    /// Whether the operations compile to lock-free instructions.
    fn is_lock_free() -> bool;

    /// Atomic load.
    fn load(&self, order: Ordering) -> Self::Value;

    /// Atomic store.
    fn store(&self, value: Self::Value, order: Ordering);

    /// Atomic swap, returning the previous value.
    fn swap(&self, value: Self::Value, order: Ordering) -> Self::Value;

    /// Strong compare-exchange.
    fn compare_exchange(
        &self,
        current: Self::Value,
        new: Self::Value,
        success: Ordering,
        failure: Ordering,
    ) -> Result<Self::Value, Self::Value>;

    /// Weak compare-exchange; may fail spuriously.
    fn compare_exchange_weak(
        &self,
        current: Self::Value,
        new: Self::Value,
        success: Ordering,
        failure: Ordering,
    ) -> Result<Self::Value, Self::Value>;
}

/// Atomic cells supporting bitwise read-modify-write.
pub trait AtomicBitwiseRepr: AtomicRepr {
    /// Bitwise or, returning the previous value.
    fn fetch_or(&self, value: Self::Value, order: Ordering) -> Self::Value;
    /// Bitwise xor, returning the previous value.
    fn fetch_xor(&self, value: Self::Value, order: Ordering) -> Self::Value;
    /// Bitwise and, returning the previous value.
    fn fetch_and(&self, value: Self::Value, order: Ordering) -> Self::Value;
}

/// Atomic cells supporting wrapping arithmetic.
pub trait AtomicArithmeticRepr: AtomicBitwiseRepr {
    /// Wrapping add, returning the previous value.
    fn fetch_add(&self, value: Self::Value, order: Ordering) -> Self::Value;
    /// Wrapping subtract, returning the previous value.
    fn fetch_sub(&self, value: Self::Value, order: Ordering) -> Self::Value;
}

macro_rules! impl_atomic_repr {
    ($atomic:ty, $value:ty) => {
        // SAFETY: `core` atomics exist only on targets where they are native,
        // and every method is a single access to the wrapped location.
        unsafe impl AtomicRepr for $atomic {
            type Value = $value;

            #[inline(always)]
            fn new(value: $value) -> Self {
                <$atomic>::new(value)
            }

            #[inline(always)]
            fn into_inner(self) -> $value {
                <$atomic>::into_inner(self)
            }

            #[inline(always)]
            fn is_lock_free() -> bool {
                true
            }

            #[inline(always)]
            fn load(&self, order: Ordering) -> $value {
                <$atomic>::load(self, order)
            }

            #[inline(always)]
            fn store(&self, value: $value, order: Ordering) {
                <$atomic>::store(self, value, order);
            }

            #[inline(always)]
            fn swap(&self, value: $value, order: Ordering) -> $value {
                <$atomic>::swap(self, value, order)
            }

            #[inline(always)]
            fn compare_exchange(
                &self,
                current: $value,
                new: $value,
                success: Ordering,
                failure: Ordering,
            ) -> Result<$value, $value> {
                <$atomic>::compare_exchange(self, current, new, success, failure)
            }

            #[inline(always)]
            fn compare_exchange_weak(
                &self,
                current: $value,
                new: $value,
                success: Ordering,
                failure: Ordering,
            ) -> Result<$value, $value> {
                <$atomic>::compare_exchange_weak(self, current, new, success, failure)
            }
        }

        impl AtomicBitwiseRepr for $atomic {
            #[inline(always)]
            fn fetch_or(&self, value: $value, order: Ordering) -> $value {
                <$atomic>::fetch_or(self, value, order)
            }

            #[inline(always)]
            fn fetch_xor(&self, value: $value, order: Ordering) -> $value {
                <$atomic>::fetch_xor(self, value, order)
            }

            #[inline(always)]
            fn fetch_and(&self, value: $value, order: Ordering) -> $value {
                <$atomic>::fetch_and(self, value, order)
            }
        }
    };
}

macro_rules! impl_atomic_integer_repr {
    ($($atomic:ty => $value:ty),* $(,)?) => {
        $(
            impl_atomic_repr!($atomic, $value);

            impl AtomicArithmeticRepr for $atomic {
                #[inline(always)]
                fn fetch_add(&self, value: $value, order: Ordering) -> $value {
                    <$atomic>::fetch_add(self, value, order)
                }

                #[inline(always)]
                fn fetch_sub(&self, value: $value, order: Ordering) -> $value {
                    <$atomic>::fetch_sub(self, value, order)
                }
            }
        )*
    };
}

impl_atomic_integer_repr! {
    AtomicI8 => i8,
    AtomicI16 => i16,
    AtomicI32 => i32,
    AtomicIsize => isize,
    AtomicU8 => u8,
    AtomicU16 => u16,
    AtomicU32 => u32,
    AtomicUsize => usize,
}

#[cfg(target_has_atomic = "64")]
impl_atomic_integer_repr! {
    AtomicI64 => i64,
    AtomicU64 => u64,
}

impl_atomic_repr!(AtomicBool, bool);

#[cfg(all(atomics_dword, target_pointer_width = "64"))]
mod wide {
    use super::AtomicRepr;
    use core::sync::atomic::Ordering;
    use portable_atomic::AtomicU128;

    // SAFETY: built without portable-atomic's `fallback` feature, so the type
    // only exists where a native 128-bit CAS does; `double_word` additionally
    // requires `is_always_lock_free` at compile time.
    unsafe impl AtomicRepr for AtomicU128 {
        type Value = u128;

        #[inline(always)]
        fn new(value: u128) -> Self {
            AtomicU128::new(value)
        }

        #[inline(always)]
        fn into_inner(self) -> u128 {
            AtomicU128::into_inner(self)
        }

        #[inline]
        fn is_lock_free() -> bool {
            AtomicU128::is_lock_free()
        }

        #[inline(always)]
        fn load(&self, order: Ordering) -> u128 {
            AtomicU128::load(self, order)
        }

        #[inline(always)]
        fn store(&self, value: u128, order: Ordering) {
            AtomicU128::store(self, value, order);
        }

        #[inline(always)]
        fn swap(&self, value: u128, order: Ordering) -> u128 {
            AtomicU128::swap(self, value, order)
        }

        #[inline(always)]
        fn compare_exchange(
            &self,
            current: u128,
            new: u128,
            success: Ordering,
            failure: Ordering,
        ) -> Result<u128, u128> {
            AtomicU128::compare_exchange(self, current, new, success, failure)
        }

        #[inline(always)]
        fn compare_exchange_weak(
            &self,
            current: u128,
            new: u128,
            success: Ordering,
            failure: Ordering,
        ) -> Result<u128, u128> {
            AtomicU128::compare_exchange_weak(self, current, new, success, failure)
        }
    }
}
