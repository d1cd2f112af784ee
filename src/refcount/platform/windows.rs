#![cfg(windows)]

use std::ffi::CString;

use windows_sys::Win32::Foundation::HMODULE;
use windows_sys::Win32::System::LibraryLoader::{GetModuleHandleW, GetProcAddress};

use crate::refcount::{RefCountFn, ResolveError};

/// A module handle obtained without touching the module's reference count.
pub(crate) struct ModuleHandle(HMODULE);

pub(crate) fn attach(module: Option<&str>) -> Result<ModuleHandle, ResolveError> {
    let handle = match module {
        // SAFETY: a null name asks for the handle of the calling executable.
        None => unsafe { GetModuleHandleW(core::ptr::null()) },
        Some(name) => {
            if name.contains('\0') {
                return Err(ResolveError::InvalidName { name: name.to_owned() });
            }
            let wide: Vec<u16> = name.encode_utf16().chain(Some(0)).collect();
            // SAFETY: `wide` is NUL-terminated; GetModuleHandleW never loads a module.
            unsafe { GetModuleHandleW(wide.as_ptr()) }
        }
    };

    if handle == 0 {
        Err(ResolveError::NotResident {
            module: module.unwrap_or("<main executable>").to_owned(),
        })
    } else {
        Ok(ModuleHandle(handle))
    }
}

pub(crate) fn lookup(module: &ModuleHandle, symbol: &str) -> Result<RefCountFn, ResolveError> {
    let name = CString::new(symbol).map_err(|_| ResolveError::InvalidName {
        name: symbol.to_owned(),
    })?;
    // SAFETY: `module.0` is a resident module and `name` is NUL-terminated.
    let address = unsafe { GetProcAddress(module.0, name.as_ptr().cast()) };
    match address {
        // SAFETY: the runtime contract fixes the signature of the exported function.
        Some(function) => Ok(unsafe {
            core::mem::transmute::<unsafe extern "system" fn() -> isize, RefCountFn>(function)
        }),
        None => Err(ResolveError::MissingSymbol { symbol: symbol.to_owned() }),
    }
}
