//! Encode/decode adapters between logical values and their atomic representation.

use super::repr::AtomicRepr;
use core::sync::atomic::{
    AtomicBool, AtomicI16, AtomicI32, AtomicI8, AtomicIsize, AtomicU16, AtomicU32, AtomicU8,
    AtomicUsize,
};
#[cfg(target_has_atomic = "64")]
use core::sync::atomic::{AtomicI64, AtomicU64};

/// A value that can live in an [`AtomicStorage`](super::AtomicStorage).
///
/// `encode` and `decode` form a bijection between `Self` and the value type of
/// `Self::Atomic`. They are pure and are applied only at operation boundaries,
/// so the operation set never needs to know which adapter is in play.
pub trait AtomicValue: Copy {
    /// The hardware cell holding the encoded value.
    type Atomic: AtomicRepr;

    /// Maps a value to its hardware representation.
    fn encode(self) -> <Self::Atomic as AtomicRepr>::Value;

    /// Maps a hardware representation back to the value.
    fn decode(repr: <Self::Atomic as AtomicRepr>::Value) -> Self;
}

macro_rules! impl_identity_value {
    ($($value:ty => $atomic:ty),* $(,)?) => {
        $(
            impl AtomicValue for $value {
                type Atomic = $atomic;

                #[inline(always)]
                fn encode(self) -> $value {
                    self
                }

                #[inline(always)]
                fn decode(repr: $value) -> Self {
                    repr
                }
            }
        )*
    };
}

impl_identity_value! {
    i8 => AtomicI8,
    i16 => AtomicI16,
    i32 => AtomicI32,
    isize => AtomicIsize,
    u8 => AtomicU8,
    u16 => AtomicU16,
    u32 => AtomicU32,
    usize => AtomicUsize,
    bool => AtomicBool,
}

// 32-bit targets without 64-bit atomics get no 64-bit storage at all.
#[cfg(target_has_atomic = "64")]
impl_identity_value! {
    i64 => AtomicI64,
    u64 => AtomicU64,
}
