//! Self-diagnostics for failures the logger otherwise swallows.
//!
//! With the `tracing` feature each hook emits a `tracing` event under the
//! `rlog::rotate` target; without it the hooks compile to nothing.

use std::io;
use std::path::Path;

#[cfg(feature = "tracing")]
use tracing::debug;

use crate::context::Location;
use crate::error::LogError;
use platform::PlatformError;

/// A thread could not create its context.
#[cfg(feature = "tracing")]
#[inline]
pub(crate) fn context_failed(error: &LogError) {
    debug!(
        target: "rlog::rotate",
        operation = "context",
        "cannot create thread log context: {}",
        error
    );
}

#[cfg(not(feature = "tracing"))]
#[inline]
pub(crate) fn context_failed(_error: &LogError) {}

/// Probing a new hour failed; the context falls back to index 0.
#[cfg(feature = "tracing")]
#[inline]
pub(crate) fn probe_failed(error: &LogError) {
    debug!(
        target: "rlog::rotate",
        operation = "probe",
        "probe failed, using index 0: {}",
        error
    );
}

#[cfg(not(feature = "tracing"))]
#[inline]
pub(crate) fn probe_failed(_error: &LogError) {}

/// A log file was opened.
#[cfg(feature = "tracing")]
#[inline]
pub(crate) fn file_opened(path: &Path, index: u32) {
    debug!(
        target: "rlog::rotate",
        operation = "open",
        path = %path.display(),
        index = index,
        "opened {}",
        path.display()
    );
}

#[cfg(not(feature = "tracing"))]
#[inline]
pub(crate) fn file_opened(_path: &Path, _index: u32) {}

/// The active file was closed to make room for `next_index`.
#[cfg(feature = "tracing")]
#[inline]
pub(crate) fn file_rotated(previous: &Path, next_index: u32) {
    debug!(
        target: "rlog::rotate",
        operation = "rotate",
        previous = %previous.display(),
        next_index = next_index,
        "closing {}",
        previous.display()
    );
}

#[cfg(not(feature = "tracing"))]
#[inline]
pub(crate) fn file_rotated(_previous: &Path, _next_index: u32) {}

/// Opening the next file failed; records are dropped until a later check.
#[cfg(feature = "tracing")]
#[inline]
pub(crate) fn open_failed(error: &PlatformError) {
    debug!(
        target: "rlog::rotate",
        operation = "open",
        path = %error.path().display(),
        "{}",
        error
    );
}

#[cfg(not(feature = "tracing"))]
#[inline]
pub(crate) fn open_failed(_error: &PlatformError) {}

/// A record could not be written and was dropped.
#[cfg(feature = "tracing")]
#[inline]
pub(crate) fn write_failed(path: &Path, error: &io::Error) {
    debug!(
        target: "rlog::rotate",
        operation = "write",
        path = %path.display(),
        "dropped record: {}",
        error
    );
}

#[cfg(not(feature = "tracing"))]
#[inline]
pub(crate) fn write_failed(_path: &Path, _error: &io::Error) {}

/// A freshly created file kept the mode the umask left it.
#[cfg(feature = "tracing")]
#[inline]
pub(crate) fn mode_failed(error: &PlatformError) {
    debug!(
        target: "rlog::rotate",
        operation = "chmod",
        path = %error.path().display(),
        "{}",
        error
    );
}

#[cfg(not(feature = "tracing"))]
#[inline]
pub(crate) fn mode_failed(_error: &PlatformError) {}

/// A record did not fit the record buffer and was cut.
#[cfg(feature = "tracing")]
#[inline]
pub(crate) fn record_truncated(path: &Path, location: &Location) {
    debug!(
        target: "rlog::rotate",
        operation = "write",
        path = %path.display(),
        "record from {} truncated",
        location
    );
}

#[cfg(not(feature = "tracing"))]
#[inline]
pub(crate) fn record_truncated(_path: &Path, _location: &Location) {}
