//! crates/logging/src/global.rs
//! Process-wide logger state: the severity threshold and the settings new
//! thread contexts are built from.
//!
//! The threshold is a single atomic so the gate on every call site costs one
//! relaxed load. Settings sit behind an [`RwLock`] that is only read when a
//! thread creates its context. Every successful [`LogGlobal::init`] assigns a
//! fresh generation; a thread whose context was built for an older generation
//! rebuilds it on its next record.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU8, AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use crate::calendar::Timestamp;
use crate::config::LogConfig;
use crate::context::{LogContext, LogSettings, Location};
use crate::error::LogError;
use crate::levels::{Level, Threshold};
use crate::thread_local;

/// Generation 0 means "never initialized".
static NEXT_GENERATION: AtomicU64 = AtomicU64::new(1);

static GLOBAL: LogGlobal = LogGlobal::new();

/// Threshold and settings shared by every thread.
pub struct LogGlobal {
    threshold: AtomicU8,
    generation: AtomicU64,
    settings: RwLock<Option<Arc<LogSettings>>>,
}

impl LogGlobal {
    /// An uninitialized logger. Every check fails until [`init`](Self::init)
    /// succeeds in installing settings.
    pub const fn new() -> Self {
        Self {
            threshold: AtomicU8::new(Level::Trace.rank()),
            generation: AtomicU64::new(0),
            settings: RwLock::new(None),
        }
    }

    /// Installs `config`.
    ///
    /// The log directory is created first; if that fails nothing changes and
    /// [`LogError::Directory`] is returned. Otherwise the threshold and
    /// settings are replaced. An unrecognized threshold name is still
    /// installed, as [`Threshold::Disabled`], and reported as
    /// [`LogError::InvalidPriority`].
    ///
    /// Threads pick up the new settings lazily, closing their previous file.
    pub fn init(&self, config: &LogConfig) -> Result<(), LogError> {
        let settings = LogSettings::from(config);
        platform::ensure_dir(settings.directory())?;

        let threshold = Threshold::parse(&config.threshold);
        self.threshold.store(threshold.rank(), Ordering::Relaxed);
        *self
            .settings
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Some(Arc::new(settings));
        let generation = NEXT_GENERATION.fetch_add(1, Ordering::Relaxed);
        self.generation.store(generation, Ordering::Release);

        invalid_priority(threshold, &config.threshold)
    }

    /// Replaces only the threshold.
    pub fn reload(&self, threshold_name: &str) -> Result<(), LogError> {
        let threshold = Threshold::parse(threshold_name);
        self.threshold.store(threshold.rank(), Ordering::Relaxed);
        invalid_priority(threshold, threshold_name)
    }

    /// The current threshold.
    pub fn threshold(&self) -> Threshold {
        Threshold::from_rank(self.threshold.load(Ordering::Relaxed))
    }

    /// Directory new contexts write into, once initialized.
    pub fn directory(&self) -> Option<PathBuf> {
        self.current_settings()
            .map(|settings| settings.directory().to_path_buf())
    }

    /// Whether [`init`](Self::init) has installed settings.
    pub fn is_initialized(&self) -> bool {
        self.generation() != 0
    }

    /// Gate for a record at `level`.
    ///
    /// Makes sure the calling thread has a context for the current settings,
    /// creating it if needed, then compares `level` with the threshold.
    /// Returns `false` when the context cannot be created; creation is retried
    /// on the next call.
    #[inline]
    pub fn check(&self, level: Level) -> bool {
        thread_local::ensure_context(self) && self.threshold().allows(level)
    }

    /// Writes a record through the calling thread's context.
    ///
    /// Does not consult the threshold; callers gate with
    /// [`check`](Self::check) first.
    pub fn log(&self, level: Level, location: &Location, args: fmt::Arguments<'_>) {
        thread_local::write_record(self, level, location, args);
    }

    pub(crate) fn generation(&self) -> u64 {
        self.generation.load(Ordering::Acquire)
    }

    /// Builds a context for the current settings, tagged with the generation
    /// it belongs to.
    pub(crate) fn open_context(&self) -> Result<(u64, LogContext), LogError> {
        let generation = self.generation();
        let settings = self.current_settings().ok_or(LogError::NotInitialized)?;
        let context = LogContext::open(settings, Timestamp::now())?;
        Ok((generation, context))
    }

    fn current_settings(&self) -> Option<Arc<LogSettings>> {
        self.settings
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Default for LogGlobal {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for LogGlobal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LogGlobal")
            .field("threshold", &self.threshold())
            .field("generation", &self.generation())
            .field("directory", &self.directory())
            .finish()
    }
}

fn invalid_priority(threshold: Threshold, name: &str) -> Result<(), LogError> {
    match threshold {
        Threshold::Level(_) => Ok(()),
        Threshold::Disabled => Err(LogError::InvalidPriority(name.to_owned())),
    }
}

/// The process-wide logger used by the logging macros.
#[inline]
pub fn global() -> &'static LogGlobal {
    &GLOBAL
}

/// Initializes the process-wide logger with default rotation settings.
///
/// Files go to `<base_path>/<module_name>/`; the base defaults to the current
/// directory and the module to none.
///
/// # Examples
///
/// ```
/// let dir = tempfile::tempdir().unwrap();
/// logging::init_global_log("info", Some(dir.path()), Some("api")).unwrap();
/// assert!(dir.path().join("api").is_dir());
/// assert!(logging::log_enabled!(logging::Level::Warn));
/// assert!(!logging::log_enabled!(logging::Level::Debug));
/// ```
pub fn init_global_log(
    threshold: &str,
    base_path: Option<&Path>,
    module_name: Option<&str>,
) -> Result<(), LogError> {
    let mut config = LogConfig::new(threshold);
    if let Some(base_path) = base_path {
        config = config.with_base_path(base_path);
    }
    if let Some(module_name) = module_name {
        config = config.with_module_name(module_name);
    }
    GLOBAL.init(&config)
}

/// Replaces the process-wide threshold.
pub fn reload(threshold: &str) -> Result<(), LogError> {
    GLOBAL.reload(threshold)
}
