//! Attaching to an already-resident module and looking up its exports.
//!
//! Each backend provides `ModuleHandle`, `attach` and `lookup`. `attach` must
//! never map a new image: a module that is not loaded yet is an error.

#[cfg(unix)]
mod unix;

#[cfg(windows)]
mod windows;

#[cfg(unix)]
pub(crate) use unix::*;

#[cfg(windows)]
pub(crate) use windows::*;

#[cfg(not(any(unix, windows)))]
mod unsupported {
    use crate::refcount::{RefCountFn, ResolveError};

    pub(crate) enum ModuleHandle {}

    pub(crate) fn attach(_module: Option<&str>) -> Result<ModuleHandle, ResolveError> {
        Err(ResolveError::Unsupported)
    }

    pub(crate) fn lookup(module: &ModuleHandle, _symbol: &str) -> Result<RefCountFn, ResolveError> {
        match *module {}
    }
}

#[cfg(not(any(unix, windows)))]
pub(crate) use unsupported::*;
