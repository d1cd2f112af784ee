//! One-time resolution of the reference-count entry points.

use core::ffi::c_void;
use core::fmt;
use core::sync::atomic::{AtomicBool, Ordering};
use std::sync::OnceLock;

use super::{config, platform, ResolveError};

/// Signature shared by both entry points: `(object, n)`.
pub type RefCountFn = unsafe extern "C" fn(object: *mut c_void, n: u32);

/// The two resolved entry points.
#[derive(Clone, Copy)]
pub struct SymbolTable {
    retain_n: RefCountFn,
    release_n: RefCountFn,
}

impl SymbolTable {
    /// Pairs an increment and a decrement function.
    pub const fn new(retain_n: RefCountFn, release_n: RefCountFn) -> Self {
        Self { retain_n, release_n }
    }

    /// The increment-by-`n` function.
    #[inline(always)]
    pub fn retain_n(&self) -> RefCountFn {
        self.retain_n
    }

    /// The decrement-by-`n` function.
    #[inline(always)]
    pub fn release_n(&self) -> RefCountFn {
        self.release_n
    }
}

impl fmt::Debug for SymbolTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SymbolTable")
            .field("retain_n", &(self.retain_n as *const c_void))
            .field("release_n", &(self.release_n as *const c_void))
            .finish()
    }
}

/// Produces a [`SymbolTable`]; run at most once per [`LazySymbols`].
pub trait SymbolSource: Sync {
    /// Resolves both entry points.
    ///
    /// # Errors
    ///
    /// Returns a [`ResolveError`] if the owning module or either symbol cannot
    /// be found.
    fn resolve(&self) -> Result<SymbolTable, ResolveError>;
}

/// Resolves the entry points from a module that is already loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResidentModule {
    module: Option<&'static str>,
    retain_symbol: &'static str,
    release_symbol: &'static str,
}

impl ResidentModule {
    /// A source for `module` (or the global namespace when `None`) exporting
    /// the two named symbols.
    pub const fn new(
        module: Option<&'static str>,
        retain_symbol: &'static str,
        release_symbol: &'static str,
    ) -> Self {
        Self {
            module,
            retain_symbol,
            release_symbol,
        }
    }

    /// The source described by the build-time configuration.
    pub const fn configured() -> Self {
        Self::new(config::RUNTIME_MODULE, config::RETAIN_N_SYMBOL, config::RELEASE_N_SYMBOL)
    }

    /// The module this source attaches to.
    pub const fn module(&self) -> Option<&'static str> {
        self.module
    }
}

impl SymbolSource for ResidentModule {
    fn resolve(&self) -> Result<SymbolTable, ResolveError> {
        #[cfg(feature = "tracing")]
        tracing::debug!(
            module = self.module.unwrap_or("<global>"),
            retain = self.retain_symbol,
            release = self.release_symbol,
            "attaching to resident runtime module"
        );

        let module = platform::attach(self.module)?;
        let retain_n = platform::lookup(&module, self.retain_symbol)?;
        let release_n = platform::lookup(&module, self.release_symbol)?;
        Ok(SymbolTable::new(retain_n, release_n))
    }
}

/// Lifecycle of a [`LazySymbols`] gate. Monotonic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolverState {
    /// Nobody has asked for the symbols yet.
    Uninitialized,
    /// One thread is running the source; others wait.
    Initializing,
    /// The table is resolved and immutable.
    Ready,
}

/// A one-time gate around a [`SymbolSource`].
///
/// The first caller of [`get`](Self::get) runs the source; concurrent callers
/// block until it finishes; afterwards `get` is a single acquire load. If the
/// source fails the process aborts, since nothing that reaches these entry
/// points can proceed without them.
pub struct LazySymbols<S> {
    source: S,
    initializing: AtomicBool,
    table: OnceLock<SymbolTable>,
}

impl<S: SymbolSource> LazySymbols<S> {
    /// Creates an unresolved gate.
    pub const fn new(source: S) -> Self {
        Self {
            source,
            initializing: AtomicBool::new(false),
            table: OnceLock::new(),
        }
    }

    /// Returns the resolved table, resolving it on first use.
    ///
    /// Aborts the process if resolution fails.
    #[inline]
    pub fn get(&self) -> &SymbolTable {
        self.table.get_or_init(|| self.initialize())
    }

    /// Current lifecycle state.
    pub fn state(&self) -> ResolverState {
        if self.table.get().is_some() {
            ResolverState::Ready
        } else if self.initializing.load(Ordering::Relaxed) {
            ResolverState::Initializing
        } else {
            ResolverState::Uninitialized
        }
    }

    /// The underlying source.
    pub fn source(&self) -> &S {
        &self.source
    }

    #[cold]
    fn initialize(&self) -> SymbolTable {
        self.initializing.store(true, Ordering::Relaxed);
        match self.source.resolve() {
            Ok(table) => {
                #[cfg(feature = "tracing")]
                tracing::debug!(?table, "reference-count entry points resolved");
                table
            }
            Err(err) => fatal(&err),
        }
    }
}

impl<S: fmt::Debug> fmt::Debug for LazySymbols<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LazySymbols")
            .field("source", &self.source)
            .field("table", &self.table.get())
            .finish_non_exhaustive()
    }
}

#[cold]
fn fatal(err: &ResolveError) -> ! {
    #[cfg(feature = "tracing")]
    tracing::error!(error = %err, "cannot resolve reference-count entry points");
    eprintln!("atomics-shims: cannot resolve reference-count entry points: {err}");
    std::process::abort()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    unsafe extern "C" fn noop(_object: *mut c_void, _n: u32) {}

    struct Fixed;

    impl SymbolSource for Fixed {
        fn resolve(&self) -> Result<SymbolTable, ResolveError> {
            Ok(SymbolTable::new(noop, noop))
        }
    }

    #[test]
    fn states_advance_once() {
        let gate = LazySymbols::new(Fixed);
        assert_eq!(gate.state(), ResolverState::Uninitialized);
        let first = gate.get() as *const SymbolTable;
        assert_eq!(gate.state(), ResolverState::Ready);
        assert_eq!(first, gate.get() as *const SymbolTable);
    }

    #[test]
    fn initializer_sees_initializing_state() {
        static GATE: LazySymbols<Observer> = LazySymbols::new(Observer);
        static SEEN: AtomicUsize = AtomicUsize::new(0);

        struct Observer;

        impl SymbolSource for Observer {
            fn resolve(&self) -> Result<SymbolTable, ResolveError> {
                if GATE.state() == ResolverState::Initializing {
                    SEEN.fetch_add(1, Ordering::Relaxed);
                }
                Ok(SymbolTable::new(noop, noop))
            }
        }

        GATE.get();
        assert_eq!(SEEN.load(Ordering::Relaxed), 1);
        assert_eq!(GATE.state(), ResolverState::Ready);
    }

    #[test]
    fn configured_defaults() {
        let source = ResidentModule::configured();
        assert_eq!(source.module(), config::RUNTIME_MODULE);
    }
}
