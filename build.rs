//! Build-time capability detection.
//!
//! Emits `cfg(atomics_dword)` when the target has a hardware double-width
//! compare-and-swap that can be used without a lock. Nothing is emitted
//! otherwise, so every double-word operation simply does not exist.

use std::env;

#[path = "build/target.rs"]
mod target;

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-changed=build/target.rs");
    println!("cargo:rerun-if-env-changed=ATOMICS_REFCOUNT_MODULE");
    println!("cargo:rerun-if-env-changed=ATOMICS_RETAIN_N_SYMBOL");
    println!("cargo:rerun-if-env-changed=ATOMICS_RELEASE_N_SYMBOL");
    println!("cargo:rerun-if-env-changed=ATOMICS_DISABLE_DWORD");
    println!("cargo:rustc-check-cfg=cfg(atomics_dword)");

    let pointer_width = env::var("CARGO_CFG_TARGET_POINTER_WIDTH").unwrap_or_default();
    let arch = env::var("CARGO_CFG_TARGET_ARCH").unwrap_or_default();
    let features = env::var("CARGO_CFG_TARGET_FEATURE").unwrap_or_default();
    let has_atomic = env::var("CARGO_CFG_TARGET_HAS_ATOMIC").unwrap_or_default();

    if env::var_os("ATOMICS_DISABLE_DWORD").is_some() {
        return;
    }

    if target::double_word_supported(&pointer_width, &arch, &features, &has_atomic) {
        println!("cargo:rustc-cfg=atomics_dword");
    }
}
