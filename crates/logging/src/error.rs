//! Error types for logger initialization and per-thread context creation.
//!
//! None of these ever reach a log call site: the macros turn every failure
//! into "this record is not written".

use std::io;
use std::path::PathBuf;

use platform::PlatformError;

/// Error type for logger setup.
#[derive(Debug, thiserror::Error)]
pub enum LogError {
    /// The threshold name is not one of trace/debug/info/warn/error.
    ///
    /// The threshold has already been switched to
    /// [`Threshold::Disabled`](crate::Threshold::Disabled) when this is
    /// returned.
    #[error("invalid log priority '{0}'")]
    InvalidPriority(String),

    /// The log directory could not be created.
    #[error("cannot prepare log directory: {0}")]
    Directory(#[from] PlatformError),

    /// A context was requested before the logger was initialized.
    #[error("logger is not initialized")]
    NotInitialized,

    /// A candidate log file could not be inspected while probing for the
    /// first index with room left.
    #[error("cannot inspect log file {path}: {source}")]
    Probe {
        /// The candidate file.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },
}

impl LogError {
    /// Creates a probe error with path context.
    pub fn probe(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Probe {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_priority_names_the_input() {
        let error = LogError::InvalidPriority("loud".into());
        assert_eq!(error.to_string(), "invalid log priority 'loud'");
    }

    #[test]
    fn directory_error_wraps_platform_error() {
        let error: LogError = PlatformError::NotADirectory(PathBuf::from("/srv/log")).into();
        let display = error.to_string();
        assert!(display.contains("/srv/log"));
        assert!(matches!(error, LogError::Directory(_)));
    }

    #[test]
    fn probe_error_mentions_path() {
        let error = LogError::probe(
            "/srv/log/2024010100.log",
            io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(error.to_string().contains("2024010100.log"));
    }
}
