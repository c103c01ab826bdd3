//! Integer status contract shared by the bulk flows.
//!
//! Flows return zero on success, the first nonzero errno or child exit
//! status on failure, and [`EXIT_FAILURE`] for structural errors that have
//! no errno (line mismatch, empty input). These helpers centralize the
//! mapping so every call site agrees on the edge cases.

use std::io;
use std::os::unix::process::ExitStatusExt;
use std::process::ExitStatus;

/// Successful completion.
pub const EXIT_SUCCESS: i32 = 0;

/// Structural failure with no associated errno.
pub const EXIT_FAILURE: i32 = 1;

/// Extracts the errno of an I/O error, falling back to [`EXIT_FAILURE`]
/// for synthesized errors that carry none.
#[must_use]
pub fn errno_status(error: &io::Error) -> i32 {
    error.raw_os_error().unwrap_or(EXIT_FAILURE)
}

/// Normalizes a child exit status to the integer contract.
///
/// A signal-terminated child maps to `128 + signal`, following the shell
/// convention, so the aggregate status stays nonzero and recognizable.
#[must_use]
pub fn child_status(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        code
    } else if let Some(signal) = status.signal() {
        128 + signal
    } else {
        EXIT_FAILURE
    }
}
