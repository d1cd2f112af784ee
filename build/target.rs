//! Target classification shared by `build.rs` and the crate's unit tests.
//!
//! Inputs are the raw `CARGO_CFG_TARGET_*` strings: comma-separated lists for
//! features and atomic widths.

fn has(list: &str, item: &str) -> bool {
    list.split(',').any(|entry| entry == item)
}

/// Whether the target has a lock-free compare-and-swap twice the pointer
/// width.
pub fn double_word_supported(
    pointer_width: &str,
    arch: &str,
    features: &str,
    has_atomic: &str,
) -> bool {
    match pointer_width {
        "32" => has(has_atomic, "64"),
        "64" => match arch {
            // `cmpxchg16b` is on by default for Apple and Windows x86_64
            // targets, off for generic Linux/BSD ones.
            "x86_64" => has(features, "cmpxchg16b"),
            "aarch64" => true,
            // `cdsg` is part of the base z/Architecture.
            "s390x" => true,
            // `lqarx`/`stqcx.` arrived with POWER8.
            "powerpc64" => has(features, "quadword-atomics"),
            _ => false,
        },
        _ => false,
    }
}
