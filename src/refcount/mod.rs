//! Reference-count call points backed by an externally owned runtime.
//!
//! [`retain_n`] and [`release_n`] forward to two functions that live in
//! another runtime. How they are bound is a build-time choice:
//!
//! - **Lazy dynamic binding** (default): the first call from any thread
//!   attaches to the runtime module, which must already be loaded, and
//!   resolves both functions by name. Later calls cost one acquire load.
//!   A missing module or symbol aborts the process.
//! - **Static binding** (`static-binding` feature): the functions are declared
//!   `extern "C"` and called directly. Only valid when the final link
//!   includes the runtime.
//!
//! Module and symbol names come from [`config`].

pub mod config;
mod error;
mod platform;
mod resolver;

pub use error::ResolveError;
pub use resolver::{
    LazySymbols, RefCountFn, ResidentModule, ResolverState, SymbolSource, SymbolTable,
};

use core::ffi::c_void;

#[cfg(not(feature = "static-binding"))]
static SYMBOLS: LazySymbols<ResidentModule> = LazySymbols::new(ResidentModule::configured());

#[cfg(feature = "static-binding")]
mod linked {
    use core::ffi::c_void;

    extern "C" {
        pub(super) fn rt_retain_n(object: *mut c_void, n: u32);
        pub(super) fn rt_release_n(object: *mut c_void, n: u32);
    }
}

/// State of the process-wide resolver.
///
/// Always [`ResolverState::Ready`] with static binding.
pub fn resolver_state() -> ResolverState {
    #[cfg(not(feature = "static-binding"))]
    {
        SYMBOLS.state()
    }
    #[cfg(feature = "static-binding")]
    {
        ResolverState::Ready
    }
}

/// Increments the reference count of `object` by `n`.
///
/// # Safety
///
/// `object` must be a live object of the owning runtime, and the runtime must
/// be loaded (dynamic binding) or linked (static binding).
#[inline]
pub unsafe fn retain_n(object: *mut c_void, n: u32) {
    #[cfg(not(feature = "static-binding"))]
    (SYMBOLS.get().retain_n())(object, n);
    #[cfg(feature = "static-binding")]
    linked::rt_retain_n(object, n);
}

/// Decrements the reference count of `object` by `n`.
///
/// # Safety
///
/// As for [`retain_n`]; additionally the caller must own `n` references.
#[inline]
pub unsafe fn release_n(object: *mut c_void, n: u32) {
    #[cfg(not(feature = "static-binding"))]
    (SYMBOLS.get().release_n())(object, n);
    #[cfg(feature = "static-binding")]
    linked::rt_release_n(object, n);
}
