#![cfg(unix)]

use core::ffi::c_void;
use std::ffi::CString;

use libc::{dlopen, dlsym, RTLD_DEFAULT, RTLD_LAZY, RTLD_NOLOAD};

use crate::refcount::{RefCountFn, ResolveError};

/// A `dlopen` handle, or `RTLD_DEFAULT` for the global namespace.
///
/// Never closed: the resolved pointers must stay valid for the process.
pub(crate) struct ModuleHandle(*mut c_void);

fn c_string(name: &str) -> Result<CString, ResolveError> {
    CString::new(name).map_err(|_| ResolveError::InvalidName { name: name.to_owned() })
}

pub(crate) fn attach(module: Option<&str>) -> Result<ModuleHandle, ResolveError> {
    let Some(name) = module else {
        return Ok(ModuleHandle(RTLD_DEFAULT));
    };

    let path = c_string(name)?;
    // SAFETY: `path` is NUL-terminated; RTLD_NOLOAD only returns a handle to an
    // image that is already mapped and never runs initializers of a new one.
    let handle = unsafe { dlopen(path.as_ptr(), RTLD_LAZY | RTLD_NOLOAD) };
    if handle.is_null() {
        Err(ResolveError::NotResident { module: name.to_owned() })
    } else {
        Ok(ModuleHandle(handle))
    }
}

pub(crate) fn lookup(module: &ModuleHandle, symbol: &str) -> Result<RefCountFn, ResolveError> {
    let name = c_string(symbol)?;
    // SAFETY: `module.0` is a live handle (or RTLD_DEFAULT) and `name` is NUL-terminated.
    let address = unsafe { dlsym(module.0, name.as_ptr()) };
    if address.is_null() {
        return Err(ResolveError::MissingSymbol { symbol: symbol.to_owned() });
    }
    // SAFETY: the runtime contract fixes the signature of the exported function.
    Ok(unsafe { core::mem::transmute::<*mut c_void, RefCountFn>(address) })
}
