//! # `atomics-shims` - Explicitly Ordered Atomic Primitives
//!
//! A foundation layer exposing hardware atomic operations with explicit,
//! per-operation memory-ordering control. Higher-level concurrent data
//! structures (queues, reference-counted handles, flags) build on top of it,
//! and foreign callers bind to its stable `extern "C"` surface.
//!
//! ## Key Features
//!
//! - **Orthogonal operation set**: load, store, exchange, compare-exchange and
//!   fetch-modify for every supported storage type, with the ordering passed
//!   per call.
//! - **Typed orderings**: each operation family takes its own ordering enum, so
//!   an illegal ordering (a `Release` load, an `AcqRel` compare-exchange
//!   failure) cannot be written down.
//! - **Encode/decode adapters**: a logical type is mapped onto the hardware
//!   representation only at operation boundaries ([`AtomicValue`]).
//! - **Double-width atomics**: [`DoubleWord`] packs two pointer-sized halves
//!   into one lock-free location where the hardware allows it.
//! - **Deferred symbol resolution**: [`refcount::retain_n`] and
//!   [`refcount::release_n`] bind to an externally owned runtime at most once.
//!
//! ## Architecture
//!
//! 1. **Orderings** ([`ordering`]): `LoadOrdering`, `StoreOrdering`,
//!    `UpdateOrdering`, `FenceOrdering` and the nine legal
//!    `CompareExchangeOrdering` pairs.
//! 2. **Storage** ([`storage`]): `AtomicRepr` over the hardware atomics,
//!    `AtomicValue` adapters on top, `AtomicStorage<T>` owning one location.
//! 3. **Operations** ([`ops`]): the operation set on `AtomicStorage<T>`.
//! 4. **Fences** ([`fence`]): standalone barriers.
//! 5. **Reference counting** ([`refcount`]): the one-time resolver.
//! 6. **FFI** ([`ffi`]): `_sa_`-prefixed symbols stamped from the generic core.
//!
//! ## Example
//!
//! ```rust
//! use atomics_shims::{AtomicStorage, LoadOrdering, StoreOrdering, UpdateOrdering};
//!
//! let counter = AtomicStorage::prepare(0u32);
//! counter.fetch_add(5, UpdateOrdering::Relaxed);
//! counter.store(counter.load(LoadOrdering::Acquire) * 2, StoreOrdering::Release);
//! assert_eq!(counter.dispose(), 10);
//! ```

#![warn(missing_docs, clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod fence;
pub mod ffi;
pub mod ops;
pub mod ordering;
pub mod refcount;
pub mod storage;

#[cfg(test)]
#[path = "../build/target.rs"]
mod build_target;

pub use fence::thread_fence;
pub use ordering::{
    BitwiseOp, CompareExchangeOrdering, CompareExchangeStrength, FenceOrdering, FetchOp,
    LoadOrdering, StoreOrdering, UpdateOrdering,
};
pub use refcount::{ResolveError, ResolverState};
pub use storage::{
    AtomicArithmeticRepr, AtomicBitwiseRepr, AtomicRepr, AtomicStorage, AtomicValue, DoubleWord,
    DoubleWordStorageLayout,
};

/// Whether this build provides lock-free double-word operations.
pub const DOUBLE_WORD_ATOMICS: bool = cfg!(atomics_dword);

// Compile-time layout assertions
const _: () = {
    use core::mem;

    // Storage is exactly the hardware atomic; nothing else travels across FFI.
    assert!(mem::size_of::<AtomicStorage<i8>>() == 1);
    #[cfg(target_has_atomic = "64")]
    assert!(mem::size_of::<AtomicStorage<i64>>() == 8);
    #[cfg(target_has_atomic = "64")]
    assert!(mem::align_of::<AtomicStorage<i64>>() == 8);
    assert!(mem::size_of::<AtomicStorage<usize>>() == mem::size_of::<usize>());
    assert!(mem::size_of::<AtomicStorage<bool>>() == 1);

    // The double-word layout exists on every target.
    assert!(mem::size_of::<DoubleWordStorageLayout>() == 2 * mem::size_of::<usize>());
    assert!(mem::align_of::<DoubleWordStorageLayout>() == 2 * mem::size_of::<usize>());
    assert!(mem::size_of::<DoubleWord>() == 2 * mem::size_of::<usize>());
};

#[cfg(atomics_dword)]
const _: () = {
    use core::mem;

    assert!(
        mem::size_of::<AtomicStorage<DoubleWord>>() == mem::size_of::<DoubleWordStorageLayout>()
    );
    assert!(
        mem::align_of::<AtomicStorage<DoubleWord>>() == mem::align_of::<DoubleWordStorageLayout>()
    );
};
