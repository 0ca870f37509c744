//! crates/logging/src/config.rs
//! Logger configuration: threshold, output directory, rotation policy.

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::calendar::DEFAULT_UTC_OFFSET_HOURS;

/// Threshold used when none is given.
pub const DEFAULT_THRESHOLD: &str = "debug";

/// Size at which a log file is considered full.
pub const MAX_LOG_FILE_SIZE: u64 = 1_024_000_000;

/// Minimum spacing between two rotation checks on one thread.
pub const CHECK_INTERVAL: Duration = Duration::from_millis(200);

/// Byte limit of the composed log directory, separator included.
pub const PATH_MAX_LEN: usize = 256;

/// Byte limit of the module name.
pub const MODULE_NAME_MAX_LEN: usize = 32;

/// When a thread's log file is replaced by the next generation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RotationPolicy {
    /// Files at or above this many bytes are full.
    pub max_file_size: u64,
    /// Milliseconds between rotation checks.
    pub check_interval_ms: u64,
}

impl RotationPolicy {
    /// Spacing between rotation checks.
    pub const fn check_interval(&self) -> Duration {
        Duration::from_millis(self.check_interval_ms)
    }
}

impl Default for RotationPolicy {
    fn default() -> Self {
        Self {
            max_file_size: MAX_LOG_FILE_SIZE,
            check_interval_ms: CHECK_INTERVAL.as_millis() as u64,
        }
    }
}

/// Everything [`LogGlobal::init`](crate::LogGlobal::init) needs.
///
/// # Examples
///
/// ```
/// use logging::LogConfig;
///
/// let config = LogConfig::new("warn")
///     .with_base_path("/var/log")
///     .with_module_name("svc");
/// assert_eq!(config.directory(), std::path::Path::new("/var/log/svc/"));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LogConfig {
    /// Threshold name: trace, debug, info, warn or error.
    pub threshold: String,
    /// Base directory; the current directory when unset.
    pub base_path: Option<PathBuf>,
    /// Subdirectory of `base_path` holding the files.
    pub module_name: Option<String>,
    /// Size and check-interval limits.
    pub rotation: RotationPolicy,
    /// Fixed hour offset used for timestamps and file names.
    pub utc_offset_hours: i32,
}

impl LogConfig {
    /// Creates a configuration with the given threshold name and defaults
    /// for everything else.
    pub fn new(threshold: impl Into<String>) -> Self {
        Self {
            threshold: threshold.into(),
            ..Self::default()
        }
    }

    /// Sets the base directory.
    pub fn with_base_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.base_path = Some(path.into());
        self
    }

    /// Sets the module name.
    pub fn with_module_name(mut self, name: impl Into<String>) -> Self {
        self.module_name = Some(name.into());
        self
    }

    /// Replaces the rotation policy.
    pub fn with_rotation(mut self, rotation: RotationPolicy) -> Self {
        self.rotation = rotation;
        self
    }

    /// Sets the size at which files rotate.
    pub fn with_max_file_size(mut self, bytes: u64) -> Self {
        self.rotation.max_file_size = bytes;
        self
    }

    /// Sets the hour offset from UTC.
    pub fn with_utc_offset_hours(mut self, hours: i32) -> Self {
        self.utc_offset_hours = hours;
        self
    }

    /// The module name clipped to [`MODULE_NAME_MAX_LEN`].
    pub fn module_name(&self) -> &str {
        truncate_to(
            self.module_name.as_deref().unwrap_or(""),
            MODULE_NAME_MAX_LEN - 1,
        )
    }

    /// `<base_path>/<module_name>/`, always ending in a separator and clipped
    /// to [`PATH_MAX_LEN`].
    pub fn directory(&self) -> PathBuf {
        let mut dir = self
            .base_path
            .as_deref()
            .unwrap_or_else(|| Path::new("."))
            .to_path_buf();
        let module = self.module_name();
        if !module.is_empty() {
            dir.push(module);
        }
        // An empty component leaves a trailing separator.
        dir.push("");

        if dir.as_os_str().len() < PATH_MAX_LEN {
            return dir;
        }
        let lossy = dir.to_string_lossy();
        let mut clipped = truncate_to(&lossy, PATH_MAX_LEN - 2).to_owned();
        clipped.push(std::path::MAIN_SEPARATOR);
        PathBuf::from(clipped)
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD.to_owned(),
            base_path: None,
            module_name: None,
            rotation: RotationPolicy::default(),
            utc_offset_hours: DEFAULT_UTC_OFFSET_HOURS,
        }
    }
}

fn truncate_to(s: &str, max_len: usize) -> &str {
    if s.len() <= max_len {
        return s;
    }
    let mut end = max_len;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}
