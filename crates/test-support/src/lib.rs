//! Helpers shared by the integration tests of the rlog workspace.
//!
//! Tests log into a [`LogDir`], a temporary base directory that is removed on
//! drop, and inspect the generated files with [`LogDir::log_files`] and
//! [`LogDir::lines`].

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// Temporary base directory for log output.
pub struct LogDir {
    root: TempDir,
}

impl LogDir {
    /// Creates an empty temporary directory.
    pub fn new() -> Self {
        Self {
            root: tempfile::tempdir().expect("create temporary log directory"),
        }
    }

    /// Base path to hand to the logger.
    pub fn path(&self) -> &Path {
        self.root.path()
    }

    /// Directory the logger writes into for `module`.
    pub fn module_dir(&self, module: &str) -> PathBuf {
        self.root.path().join(module)
    }

    /// Every `*.log` / `*.log.N` file under `module`, sorted by name.
    pub fn log_files(&self, module: &str) -> Vec<PathBuf> {
        log_files_in(&self.module_dir(module))
    }

    /// All lines of every log file under `module`, in file-name order.
    pub fn lines(&self, module: &str) -> Vec<String> {
        self.log_files(module)
            .iter()
            .flat_map(|path| read_lines(path))
            .collect()
    }
}

impl Default for LogDir {
    fn default() -> Self {
        Self::new()
    }
}

/// Log files directly inside `dir`, sorted by name. A missing directory
/// yields an empty list.
pub fn log_files_in(dir: &Path) -> Vec<PathBuf> {
    let Ok(entries) = fs::read_dir(dir) else {
        return Vec::new();
    };
    let mut files: Vec<PathBuf> = entries
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| {
            path.file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| name.ends_with(".log") || name.contains(".log."))
        })
        .collect();
    files.sort();
    files
}

/// Lines of `path`, without terminators.
pub fn read_lines(path: &Path) -> Vec<String> {
    fs::read_to_string(path)
        .expect("read log file")
        .lines()
        .map(str::to_owned)
        .collect()
}

/// The fields of one record line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecordLine {
    /// `YYYYMMDD`.
    pub date: String,
    /// `HH:MM:SS.ffffff`.
    pub time: String,
    /// Writing process.
    pub pid: u32,
    /// Level label, e.g. `ERROR`.
    pub level: String,
    /// Source file name without directories.
    pub file: String,
    /// Source line.
    pub line: u32,
    /// Enclosing function.
    pub function: String,
    /// Everything after the fourth `|`.
    pub message: String,
}

/// Splits `line` into its fields, or `None` if it is not shaped like
/// `YYYYMMDD HH:MM:SS.ffffff|pid|LEVEL|file:line:function|message`.
pub fn parse_record(line: &str) -> Option<RecordLine> {
    let mut fields = line.splitn(5, '|');
    let stamp = fields.next()?;
    let pid = fields.next()?.parse().ok()?;
    let level = fields.next()?;
    let location = fields.next()?;
    let message = fields.next()?;

    let (date, time) = stamp.split_once(' ')?;
    let digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
    if date.len() != 8 || !digits(date) {
        return None;
    }
    let time_ok = time.len() == 15
        && time.bytes().enumerate().all(|(i, b)| match i {
            2 | 5 => b == b':',
            8 => b == b'.',
            _ => b.is_ascii_digit(),
        });
    if !time_ok || level.is_empty() || !level.bytes().all(|b| b.is_ascii_uppercase()) {
        return None;
    }

    let mut parts = location.splitn(3, ':');
    let file = parts.next().filter(|f| !f.is_empty())?;
    let line_no = parts.next().filter(|n| digits(n))?.parse().ok()?;
    let function = parts.next().filter(|f| !f.is_empty())?;

    Some(RecordLine {
        date: date.to_owned(),
        time: time.to_owned(),
        pid,
        level: level.to_owned(),
        file: file.to_owned(),
        line: line_no,
        function: function.to_owned(),
        message: message.to_owned(),
    })
}

/// Number of descriptors currently open in this process, where the platform
/// exposes them.
pub fn open_descriptor_count() -> Option<usize> {
    #[cfg(target_os = "linux")]
    {
        fs::read_dir("/proc/self/fd").ok().map(Iterator::count)
    }
    #[cfg(not(target_os = "linux"))]
    {
        None
    }
}
