//! Build-time settings for the resolver.
//!
//! Read from the environment of the build with `option_env!`; `build.rs`
//! reruns when any of them changes.

/// Module to attach to (`ATOMICS_REFCOUNT_MODULE`).
///
/// `None` means the process-global namespace: every image already loaded on
/// Unix, the main executable on Windows.
pub const RUNTIME_MODULE: Option<&str> = match option_env!("ATOMICS_REFCOUNT_MODULE") {
    Some(module) if !module.is_empty() => Some(module),
    _ => None,
};

/// Name of the increment entry point (`ATOMICS_RETAIN_N_SYMBOL`).
pub const RETAIN_N_SYMBOL: &str = match option_env!("ATOMICS_RETAIN_N_SYMBOL") {
    Some(symbol) => symbol,
    None => "rt_retain_n",
};

/// Name of the decrement entry point (`ATOMICS_RELEASE_N_SYMBOL`).
pub const RELEASE_N_SYMBOL: &str = match option_env!("ATOMICS_RELEASE_N_SYMBOL") {
    Some(symbol) => symbol,
    None => "rt_release_n",
};
