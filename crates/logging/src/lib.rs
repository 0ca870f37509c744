#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `logging` is a per-thread rotating file logger. Every thread that logs owns
//! a private append-mode file named after the current civil hour, so threads
//! never contend on a shared handle. A single process-wide severity threshold
//! decides which records are written.
//!
//! # Design
//!
//! - [`LogGlobal`] holds the threshold (one atomic byte) and the
//!   [`LogSettings`] new thread contexts are built from. The process-wide
//!   instance is reached through [`global`] and set up by
//!   [`init_global_log`] or [`LogGlobal::init`].
//! - Each thread lazily builds a [`LogContext`] on its first gated call. The
//!   context probes `<YYYYMMDDHH>.log`, `.log.1`, … for the first generation
//!   with room left and opens it on the first record.
//! - Every [`CHECK_INTERVAL`] the context looks at its file again: a file that
//!   reached [`MAX_LOG_FILE_SIZE`] is closed and the next generation opened; a
//!   record in a new hour starts that hour's files.
//! - Records are rendered into a fixed [`RECORD_CAPACITY`] buffer and written
//!   with one `write` call each.
//! - Timestamps use a fixed UTC offset (default +8) and a pure calendar
//!   conversion, see [`civil_from_timestamp`].
//!
//! # Invariants
//!
//! - A context is only touched by its owning thread and holds at most one open
//!   file.
//! - A record filtered out by the threshold is never formatted.
//! - An unknown threshold name disables logging entirely.
//! - No logging call panics; failures drop the record.
//!
//! # Errors
//!
//! Only setup reports errors: [`LogError::Directory`] when the log directory
//! cannot be created and [`LogError::InvalidPriority`] for an unknown
//! threshold name. Per-thread failures are swallowed at the call site and, with
//! the `tracing` feature, reported as `tracing` events under the
//! `rlog::rotate` target.
//!
//! # Examples
//!
//! ```
//! use logging::{debug_log, error_log, init_global_log};
//!
//! let base = tempfile::tempdir().unwrap();
//! init_global_log("error", Some(base.path()), Some("svc")).unwrap();
//!
//! debug_log!("filtered out");
//! error_log!("disk {}", "full");
//!
//! let file = std::fs::read_dir(base.path().join("svc"))
//!     .unwrap()
//!     .next()
//!     .unwrap()
//!     .unwrap()
//!     .path();
//! let text = std::fs::read_to_string(file).unwrap();
//! assert_eq!(text.lines().count(), 1);
//! assert!(text.contains("|ERROR|"));
//! assert!(text.trim_end().ends_with("|disk full"));
//! ```

mod calendar;
mod config;
mod context;
mod diagnostics;
mod error;
mod global;
mod levels;
mod macros;
mod thread_local;

pub use calendar::{CivilTime, DEFAULT_UTC_OFFSET_HOURS, Timestamp, civil_from_timestamp};
pub use config::{
    CHECK_INTERVAL, DEFAULT_THRESHOLD, LogConfig, MAX_LOG_FILE_SIZE, MODULE_NAME_MAX_LEN,
    PATH_MAX_LEN, RotationPolicy,
};
pub use context::{HourBucket, Location, LogContext, LogSettings, RECORD_CAPACITY, log_file_path};
pub use error::LogError;
pub use global::{LogGlobal, global, init_global_log, reload};
pub use levels::{Level, Threshold};

#[doc(hidden)]
pub use macros::function_basename as __function_basename;
