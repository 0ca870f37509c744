//! Directory creation and append-mode file opening.
//!
//! [`ensure_dir`] behaves like `mkdir -p`: every missing component is created
//! with [`DIR_MODE`], components that already exist as directories are
//! accepted, and a component that exists as anything else is an error. A
//! concurrent creator winning the race for a component surfaces as
//! `AlreadyExists`, which is accepted once the entry is confirmed to be a
//! directory.
//!
//! [`open_append`] opens a log file for appending, creating it with exactly
//! [`LOG_FILE_MODE`] regardless of the process umask. Files that already exist
//! keep their permissions.

use std::fs::{self, DirBuilder, File, OpenOptions};
use std::io;
use std::path::{Component, Path, PathBuf};

use crate::error::{IoResultExt, PlatformError};

/// Permission bits for directories created by [`ensure_dir`].
pub const DIR_MODE: u32 = 0o755;

/// Permission bits for log files created by [`open_append`].
pub const LOG_FILE_MODE: u32 = 0o644;

/// Creates `path` and every missing parent.
///
/// Calling this repeatedly, or from several threads or processes at once, is
/// safe: the second caller observes the directory and returns `Ok`.
///
/// # Examples
///
/// ```
/// let root = tempfile::tempdir().unwrap();
/// let nested = root.path().join("a/b/c");
///
/// platform::ensure_dir(&nested).unwrap();
/// platform::ensure_dir(&nested).unwrap();
/// assert!(nested.is_dir());
/// ```
pub fn ensure_dir(path: &Path) -> Result<(), PlatformError> {
    if fs::metadata(path).is_ok_and(|meta| meta.is_dir()) {
        return Ok(());
    }

    let mut current = PathBuf::new();
    for component in path.components() {
        current.push(component);
        if let Component::Normal(_) = component {
            create_component(&current)?;
        }
    }
    Ok(())
}

fn create_component(path: &Path) -> Result<(), PlatformError> {
    match dir_builder().create(path) {
        Ok(()) => Ok(()),
        Err(error) if error.kind() == io::ErrorKind::AlreadyExists => {
            if fs::metadata(path).create_dir_context(path)?.is_dir() {
                Ok(())
            } else {
                Err(PlatformError::NotADirectory(path.to_path_buf()))
            }
        }
        Err(error) => Err(PlatformError::create_dir(path, error)),
    }
}

fn dir_builder() -> DirBuilder {
    let mut builder = DirBuilder::new();
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(DIR_MODE);
    }
    builder
}

/// A file opened by [`open_append`].
#[derive(Debug)]
pub struct AppendFile {
    /// The append-mode handle.
    pub file: File,
    /// Set when a freshly created file could not be given [`LOG_FILE_MODE`].
    /// The handle is usable either way.
    pub mode_error: Option<PlatformError>,
}

/// Opens `path` for appending, creating it with [`LOG_FILE_MODE`] if absent.
pub fn open_append(path: &Path) -> Result<AppendFile, PlatformError> {
    match append_options().create_new(true).open(path) {
        Ok(file) => {
            let mode_error = apply_log_file_mode(&file, path).err();
            Ok(AppendFile { file, mode_error })
        }
        Err(error) if error.kind() == io::ErrorKind::AlreadyExists => append_options()
            .create(true)
            .open(path)
            .map(|file| AppendFile {
                file,
                mode_error: None,
            })
            .map_err(|e| PlatformError::open_append(path, e)),
        Err(error) => Err(PlatformError::open_append(path, error)),
    }
}

fn append_options() -> OpenOptions {
    let mut options = OpenOptions::new();
    options.append(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(LOG_FILE_MODE);
    }
    options
}

// The umask may have stripped bits from a freshly created file.
#[cfg(unix)]
fn apply_log_file_mode(file: &File, path: &Path) -> Result<(), PlatformError> {
    use std::os::unix::fs::PermissionsExt;
    file.set_permissions(fs::Permissions::from_mode(LOG_FILE_MODE))
        .map_err(|e| PlatformError::set_mode(path, e))
}

#[cfg(not(unix))]
fn apply_log_file_mode(_file: &File, _path: &Path) -> Result<(), PlatformError> {
    Ok(())
}
