//! The process-wide resolver aborts when the runtime cannot be found.
//!
//! Each test re-runs this binary with a marker variable set; the child takes
//! the real `retain_n`/`release_n` path and the parent checks how it died.
#![cfg(not(feature = "static-binding"))]

use atomics_shims::refcount::{self, ResidentModule, ResolverState, SymbolSource};
use std::env;
use std::process::{Command, Output};

const CHILD_ENV: &str = "ATOMICS_SHIMS_RESOLVER_CHILD";
const FATAL_LINE: &str = "atomics-shims: cannot resolve reference-count entry points";

/// Runs `test` alone in a child process with `CHILD_ENV=mode`.
fn run_child(test: &str, mode: &str) -> Output {
    let exe = env::current_exe().expect("test binary path");
    Command::new(exe)
        .args([test, "--exact", "--nocapture", "--test-threads=1"])
        .env(CHILD_ENV, mode)
        .output()
        .expect("spawn child test process")
}

/// The error the configured source reports in this environment, if any.
fn expected_error() -> Option<String> {
    ResidentModule::configured().resolve().err().map(|err| err.to_string())
}

fn assert_aborted(output: &Output, error: &str) {
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!output.status.success(), "child exited normally; stderr:\n{stderr}");

    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        assert_eq!(output.status.signal(), Some(libc::SIGABRT), "stderr:\n{stderr}");
    }

    assert!(stderr.contains(FATAL_LINE), "stderr:\n{stderr}");
    assert!(stderr.contains(error), "expected `{error}` in stderr:\n{stderr}");
}

#[test]
fn retain_n_aborts_without_runtime() {
    if env::var(CHILD_ENV).as_deref() == Ok("retain_n") {
        assert_eq!(refcount::resolver_state(), ResolverState::Uninitialized);
        // SAFETY: never reaches a runtime; resolution aborts first.
        unsafe { refcount::retain_n(core::ptr::null_mut(), 1) };
        unreachable!("retain_n returned without a runtime");
    }

    // A real runtime is resident in this process; nothing to observe.
    let Some(error) = expected_error() else { return };
    let output = run_child("retain_n_aborts_without_runtime", "retain_n");
    assert_aborted(&output, &error);
}

#[test]
fn release_n_aborts_without_runtime() {
    if env::var(CHILD_ENV).as_deref() == Ok("release_n") {
        // SAFETY: as above.
        unsafe { refcount::release_n(core::ptr::null_mut(), 1) };
        unreachable!("release_n returned without a runtime");
    }

    let Some(error) = expected_error() else { return };
    let output = run_child("release_n_aborts_without_runtime", "release_n");
    assert_aborted(&output, &error);
}

#[test]
fn exported_entry_points_abort_without_runtime() {
    match env::var(CHILD_ENV).as_deref() {
        Ok("sa_retain_n") => {
            // SAFETY: as above.
            unsafe { atomics_shims::ffi::_sa_retain_n(core::ptr::null_mut(), 2) };
            unreachable!("_sa_retain_n returned without a runtime");
        }
        Ok("sa_release_n") => {
            // SAFETY: as above.
            unsafe { atomics_shims::ffi::_sa_release_n(core::ptr::null_mut(), 2) };
            unreachable!("_sa_release_n returned without a runtime");
        }
        _ => {}
    }

    let Some(error) = expected_error() else { return };
    for mode in ["sa_retain_n", "sa_release_n"] {
        let output = run_child("exported_entry_points_abort_without_runtime", mode);
        assert_aborted(&output, &error);
    }
}

#[test]
fn parent_never_resolves() {
    assert_eq!(refcount::resolver_state(), ResolverState::Uninitialized);
}
