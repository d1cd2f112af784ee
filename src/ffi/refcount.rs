use core::ffi::c_void;

use crate::refcount;

/// Increments the reference count of `object` by `n`.
///
/// # Safety
///
/// See [`refcount::retain_n`].
#[no_mangle]
pub unsafe extern "C" fn _sa_retain_n(object: *mut c_void, n: u32) {
    refcount::retain_n(object, n);
}

/// Decrements the reference count of `object` by `n`.
///
/// # Safety
///
/// See [`refcount::release_n`].
#[no_mangle]
pub unsafe extern "C" fn _sa_release_n(object: *mut c_void, n: u32) {
    refcount::release_n(object, n);
}
