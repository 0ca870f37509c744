//! Error types for filesystem operations.

use std::io;
use std::path::PathBuf;

/// Error type for the filesystem helpers in this crate.
#[derive(Debug, thiserror::Error)]
pub enum PlatformError {
    /// A path component could not be created.
    #[error("failed to create directory {path}: {source}")]
    CreateDir {
        /// The component that failed.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// An existing path component is not a directory.
    #[error("{0} exists but is not a directory")]
    NotADirectory(PathBuf),

    /// A log file could not be opened for appending.
    #[error("failed to open {path} for appending: {source}")]
    OpenAppend {
        /// The file that failed to open.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// A freshly created log file could not be given its permission bits.
    #[error("failed to set permissions of {path}: {source}")]
    SetMode {
        /// The file whose mode was not applied.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },
}

impl PlatformError {
    /// Creates a directory-creation error with path context.
    pub fn create_dir(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::CreateDir {
            path: path.into(),
            source,
        }
    }

    /// Creates an open error with path context.
    pub fn open_append(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::OpenAppend {
            path: path.into(),
            source,
        }
    }

    /// Creates a permission error with path context.
    pub fn set_mode(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::SetMode {
            path: path.into(),
            source,
        }
    }

    /// Returns the path the error refers to.
    pub fn path(&self) -> &std::path::Path {
        match self {
            Self::CreateDir { path, .. }
            | Self::OpenAppend { path, .. }
            | Self::SetMode { path, .. } => path,
            Self::NotADirectory(path) => path,
        }
    }
}

/// Extension trait for mapping I/O results to [`PlatformError`] with path context.
pub(crate) trait IoResultExt<T> {
    /// Maps an I/O error to [`PlatformError::CreateDir`] with the given path.
    fn create_dir_context(self, path: impl Into<PathBuf>) -> Result<T, PlatformError>;
}

impl<T> IoResultExt<T> for io::Result<T> {
    fn create_dir_context(self, path: impl Into<PathBuf>) -> Result<T, PlatformError> {
        self.map_err(|e| PlatformError::create_dir(path, e))
    }
}
