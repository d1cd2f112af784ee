//! The `extern "C"` surface.
//!
//! One function per (type × operation × ordering), named
//! `_sa_<operation>[_<ordering>...]_<type>` so a foreign binding can link
//! against them without regenerating anything. Each function is a one-line
//! forward to the generic operation set with a constant ordering, which the
//! optimizer folds into a single instruction sequence.
//!
//! Storage is passed by reference (a non-null pointer on the C side) and must
//! come from the matching `_sa_prepare_<type>`. Nothing is checked at run
//! time.

mod fence;
mod refcount;

pub use fence::*;
pub use refcount::*;

use crate::ordering::{
    CompareExchangeOrdering, CompareExchangeStrength, FetchOp, LoadOrdering, StoreOrdering,
    UpdateOrdering,
};
use crate::storage::AtomicStorage;
#[cfg(atomics_dword)]
use crate::storage::DoubleWord;

macro_rules! ffi_lifecycle_fns {
    ($name:ident, $ty:ty) => {
        paste::paste! {
            #[doc = concat!("Prepares `", stringify!($ty), "` storage.")]
            #[no_mangle]
            pub extern "C" fn [<_sa_prepare_ $name>](value: $ty) -> AtomicStorage<$ty> {
                AtomicStorage::prepare(value)
            }

            #[doc = concat!("Disposes of `", stringify!($ty), "` storage, returning its value.")]
            #[no_mangle]
            pub extern "C" fn [<_sa_dispose_ $name>](storage: AtomicStorage<$ty>) -> $ty {
                storage.dispose()
            }
        }
    };
}

macro_rules! ffi_load_fns {
    ($name:ident, $ty:ty; $($order:ident => $variant:ident),*) => {
        paste::paste! {
            $(
                #[doc = concat!(
                    "`", stringify!($variant), "` load of `", stringify!($ty), "` storage."
                )]
                #[no_mangle]
                pub extern "C" fn [<_sa_load_ $order _ $name>](
                    storage: &AtomicStorage<$ty>,
                ) -> $ty {
                    storage.load(LoadOrdering::$variant)
                }
            )*
        }
    };
}

macro_rules! ffi_store_fns {
    ($name:ident, $ty:ty; $($order:ident => $variant:ident),*) => {
        paste::paste! {
            $(
                #[doc = concat!(
                    "`", stringify!($variant), "` store to `", stringify!($ty), "` storage."
                )]
                #[no_mangle]
                pub extern "C" fn [<_sa_store_ $order _ $name>](
                    storage: &AtomicStorage<$ty>,
                    desired: $ty,
                ) {
                    storage.store(desired, StoreOrdering::$variant);
                }
            )*
        }
    };
}

macro_rules! ffi_exchange_fns {
    ($name:ident, $ty:ty; $($order:ident => $variant:ident),*) => {
        paste::paste! {
            $(
                #[doc = concat!(
                    "`", stringify!($variant), "` exchange on `", stringify!($ty), "` storage."
                )]
                #[no_mangle]
                pub extern "C" fn [<_sa_exchange_ $order _ $name>](
                    storage: &AtomicStorage<$ty>,
                    desired: $ty,
                ) -> $ty {
                    storage.exchange(desired, UpdateOrdering::$variant)
                }
            )*
        }
    };
}

macro_rules! ffi_cmpxchg_fns {
    (
        $name:ident, $ty:ty; $kind:ident => $strength:ident;
        $($succ:ident $fail:ident => $variant:ident),*
    ) => {
        paste::paste! {
            $(
                #[doc = concat!(
                    "`", stringify!($strength), "` compare-exchange (`", stringify!($variant),
                    "`) on `", stringify!($ty), "` storage. ",
                    "On failure `expected` receives the observed value."
                )]
                #[no_mangle]
                pub extern "C" fn [<_sa_cmpxchg_ $kind _ $succ _ $fail _ $name>](
                    storage: &AtomicStorage<$ty>,
                    expected: &mut $ty,
                    desired: $ty,
                ) -> bool {
                    match storage.compare_exchange(
                        CompareExchangeStrength::$strength,
                        *expected,
                        desired,
                        CompareExchangeOrdering::$variant,
                    ) {
                        Ok(_) => true,
                        Err(observed) => {
                            *expected = observed;
                            false
                        }
                    }
                }
            )*
        }
    };
}

macro_rules! ffi_fetch_fns {
    ($name:ident, $ty:ty; $op:ident => $fetch:ident; $($order:ident => $variant:ident),*) => {
        paste::paste! {
            $(
                #[doc = concat!(
                    "`", stringify!($variant), "` fetch-", stringify!($op),
                    " on `", stringify!($ty), "` storage."
                )]
                #[no_mangle]
                pub extern "C" fn [<_sa_fetch_ $op _ $order _ $name>](
                    storage: &AtomicStorage<$ty>,
                    operand: $ty,
                ) -> $ty {
                    storage.fetch_modify(FetchOp::$fetch, operand, UpdateOrdering::$variant)
                }
            )*
        }
    };
}

macro_rules! ffi_bitwise_fns {
    ($name:ident, $ty:ty; $op:ident => $method:ident; $($order:ident => $variant:ident),*) => {
        paste::paste! {
            $(
                #[doc = concat!(
                    "`", stringify!($variant), "` fetch-", stringify!($op),
                    " on `", stringify!($ty), "` storage."
                )]
                #[no_mangle]
                pub extern "C" fn [<_sa_fetch_ $op _ $order _ $name>](
                    storage: &AtomicStorage<$ty>,
                    operand: $ty,
                ) -> $ty {
                    storage.$method(operand, UpdateOrdering::$variant)
                }
            )*
        }
    };
}

macro_rules! ffi_cmpxchg_kind {
    ($name:ident, $ty:ty; $kind:ident => $strength:ident) => {
        ffi_cmpxchg_fns!($name, $ty; $kind => $strength;
            relaxed relaxed => RelaxedRelaxed,
            acquire relaxed => AcquireRelaxed,
            release relaxed => ReleaseRelaxed,
            acq_rel relaxed => AcqRelRelaxed,
            seq_cst relaxed => SeqCstRelaxed,
            acquire acquire => AcquireAcquire,
            acq_rel acquire => AcqRelAcquire,
            seq_cst acquire => SeqCstAcquire,
            seq_cst seq_cst => SeqCstSeqCst
        );
    };
}

/// Lifecycle, load, store, exchange and both compare-exchange families.
macro_rules! ffi_atomic_type {
    ($name:ident, $ty:ty) => {
        ffi_lifecycle_fns!($name, $ty);
        ffi_load_fns!($name, $ty; relaxed => Relaxed, acquire => Acquire, seq_cst => SeqCst);
        ffi_store_fns!($name, $ty; relaxed => Relaxed, release => Release, seq_cst => SeqCst);
        ffi_exchange_fns!($name, $ty;
            relaxed => Relaxed, acquire => Acquire, release => Release,
            acq_rel => AcqRel, seq_cst => SeqCst
        );
        ffi_cmpxchg_kind!($name, $ty; strong => Strong);
        ffi_cmpxchg_kind!($name, $ty; weak => Weak);
    };
}

macro_rules! ffi_fetch_op {
    ($name:ident, $ty:ty; $op:ident => $fetch:ident) => {
        ffi_fetch_fns!($name, $ty; $op => $fetch;
            relaxed => Relaxed, acquire => Acquire, release => Release,
            acq_rel => AcqRel, seq_cst => SeqCst
        );
    };
}

macro_rules! ffi_integer_type {
    ($($name:ident => $ty:ty),* $(,)?) => {
        $(
            ffi_atomic_type!($name, $ty);
            ffi_fetch_op!($name, $ty; add => Add);
            ffi_fetch_op!($name, $ty; sub => Sub);
            ffi_fetch_op!($name, $ty; or => Or);
            ffi_fetch_op!($name, $ty; xor => Xor);
            ffi_fetch_op!($name, $ty; and => And);
        )*
    };
}

macro_rules! ffi_bitwise_op {
    ($name:ident, $ty:ty; $op:ident => $method:ident) => {
        ffi_bitwise_fns!($name, $ty; $op => $method;
            relaxed => Relaxed, acquire => Acquire, release => Release,
            acq_rel => AcqRel, seq_cst => SeqCst
        );
    };
}

ffi_integer_type! {
    int8 => i8,
    int16 => i16,
    int32 => i32,
    int => isize,
    uint8 => u8,
    uint16 => u16,
    uint32 => u32,
    uint => usize,
}

#[cfg(target_has_atomic = "64")]
ffi_integer_type! {
    int64 => i64,
    uint64 => u64,
}

ffi_atomic_type!(bool, bool);
ffi_bitwise_op!(bool, bool; or => fetch_or);
ffi_bitwise_op!(bool, bool; xor => fetch_xor);
ffi_bitwise_op!(bool, bool; and => fetch_and);

// The storage argument wraps a 128-bit integer on 64-bit targets, which the
// C ABI lint flags; the value crossing the boundary is the `repr(C)` pair.
#[cfg(atomics_dword)]
#[allow(improper_ctypes_definitions)]
mod double_word {
    use super::*;

    ffi_atomic_type!(double_word, DoubleWord);
}

#[cfg(atomics_dword)]
pub use double_word::*;
