//! crates/logging/src/context/mod.rs
//! The per-thread log context and its rotation state machine.
//!
//! A context is either closed (no file) or open (one append-mode file). It is
//! created by [`LogContext::open`], which only picks the starting index, and
//! opens its first file on the first record. Every record that arrives while
//! the context is closed, or at least one check interval after the previous
//! check, runs a rotation check:
//!
//! - an open file in the record's hour bucket that is still below the size
//!   cap is kept;
//! - a full file is closed and the next index of the same hour is opened;
//! - a record in a new hour bucket re-probes that hour from index 0;
//! - a closed context retries its current index.
//!
//! Failures never escape: a file that cannot be opened leaves the context
//! closed and the record is dropped.

mod record;
mod rotation;

pub use record::{Location, RECORD_CAPACITY};
pub use rotation::{HourBucket, log_file_path};

use std::fmt;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::calendar::{CivilTime, Timestamp};
use crate::config::{LogConfig, RotationPolicy};
use crate::diagnostics;
use crate::error::LogError;
use crate::levels::Level;
use record::RecordScratch;
use rotation::probe_index;

/// Where and how a context writes. Fixed for the lifetime of the context.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LogSettings {
    directory: PathBuf,
    rotation: RotationPolicy,
    utc_offset_hours: i32,
}

impl LogSettings {
    /// Creates settings for `directory`.
    pub fn new(directory: impl Into<PathBuf>, rotation: RotationPolicy, utc_offset_hours: i32) -> Self {
        Self {
            directory: directory.into(),
            rotation,
            utc_offset_hours,
        }
    }

    /// Directory holding the log files.
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Size cap and check interval.
    pub const fn rotation(&self) -> RotationPolicy {
        self.rotation
    }

    /// Hour offset from UTC.
    pub const fn utc_offset_hours(&self) -> i32 {
        self.utc_offset_hours
    }
}

impl From<&LogConfig> for LogSettings {
    fn from(config: &LogConfig) -> Self {
        Self::new(config.directory(), config.rotation, config.utc_offset_hours)
    }
}

struct ActiveFile {
    file: File,
    path: PathBuf,
    bucket: HourBucket,
}

/// One thread's log file state.
pub struct LogContext {
    settings: Arc<LogSettings>,
    file_index: u32,
    bucket: HourBucket,
    active: Option<ActiveFile>,
    last_check_ms: i64,
    scratch: RecordScratch,
}

impl LogContext {
    /// Picks the first index of the current hour with room left.
    ///
    /// No file is opened until the first record.
    pub fn open(settings: Arc<LogSettings>, now: Timestamp) -> Result<Self, LogError> {
        let bucket = HourBucket::of(&now.civil(settings.utc_offset_hours));
        let file_index = probe_index(&settings.directory, bucket, settings.rotation.max_file_size)?;
        Ok(Self {
            settings,
            file_index,
            bucket,
            active: None,
            last_check_ms: 0,
            scratch: RecordScratch::new(),
        })
    }

    /// Writes one record stamped with the current time.
    pub fn log(&mut self, level: Level, location: &Location, args: fmt::Arguments<'_>) {
        self.log_at(Timestamp::now(), level, location, args);
    }

    /// Writes one record stamped with `now`.
    pub fn log_at(
        &mut self,
        now: Timestamp,
        level: Level,
        location: &Location,
        args: fmt::Arguments<'_>,
    ) {
        let civil = now.civil(self.settings.utc_offset_hours);
        let now_ms = now.as_millis();
        if self.active.is_none() || self.check_due(now_ms) {
            self.last_check_ms = now_ms;
            self.check_file(&civil);
        }

        let Some(active) = self.active.as_mut() else {
            return;
        };
        let record = self.scratch.render(now, &civil, level, location, args);
        if record.truncated {
            diagnostics::record_truncated(&active.path, location);
        }
        if let Err(error) = active.file.write_all(record.bytes) {
            diagnostics::write_failed(&active.path, &error);
        }
    }

    /// Current generation index.
    pub const fn file_index(&self) -> u32 {
        self.file_index
    }

    /// Whether a file is currently open.
    pub const fn is_open(&self) -> bool {
        self.active.is_some()
    }

    /// Path of the open file, if any.
    pub fn current_path(&self) -> Option<&Path> {
        self.active.as_ref().map(|active| active.path.as_path())
    }

    /// Settings this context was created with.
    pub fn settings(&self) -> &LogSettings {
        &self.settings
    }

    fn check_due(&self, now_ms: i64) -> bool {
        let interval =
            i64::try_from(self.settings.rotation.check_interval_ms).unwrap_or(i64::MAX);
        // A clock that stepped backwards also triggers a check.
        now_ms < self.last_check_ms || now_ms.saturating_sub(self.last_check_ms) >= interval
    }

    fn check_file(&mut self, civil: &CivilTime) {
        let bucket = HourBucket::of(civil);
        let max_file_size = self.settings.rotation.max_file_size;

        let full = match &self.active {
            Some(active) if active.bucket == bucket => match active.file.metadata() {
                Ok(meta) if meta.len() < max_file_size => return,
                Ok(_) => true,
                // Reopen the same index when the size is unknown.
                Err(_) => false,
            },
            _ => false,
        };

        if bucket != self.bucket {
            self.file_index = probe_index(&self.settings.directory, bucket, max_file_size)
                .unwrap_or_else(|error| {
                    diagnostics::probe_failed(&error);
                    0
                });
            self.bucket = bucket;
        } else if full {
            self.file_index = self.file_index.saturating_add(1);
        }

        // Close before opening so a context never holds two files.
        if let Some(previous) = self.active.take() {
            diagnostics::file_rotated(&previous.path, self.file_index);
        }

        let path = log_file_path(&self.settings.directory, bucket, self.file_index);
        match platform::open_append(&path) {
            Ok(opened) => {
                if let Some(error) = &opened.mode_error {
                    diagnostics::mode_failed(error);
                }
                diagnostics::file_opened(&path, self.file_index);
                self.active = Some(ActiveFile {
                    file: opened.file,
                    path,
                    bucket,
                });
            }
            Err(error) => diagnostics::open_failed(&error),
        }
    }
}

impl fmt::Debug for LogContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LogContext")
            .field("directory", &self.settings.directory)
            .field("file_index", &self.file_index)
            .field("bucket", &self.bucket)
            .field("current_path", &self.current_path())
            .field("last_check_ms", &self.last_check_ms)
            .finish_non_exhaustive()
    }
}
