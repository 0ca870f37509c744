//! crates/logging/src/levels.rs
//! Severity levels and the threshold they are compared against.

use std::fmt;
use std::str::FromStr;

use crate::error::LogError;

/// Severity of a log record, ordered from least to most severe.
///
/// The discriminants are the numeric ranks the threshold comparison uses; the
/// gaps leave room for the [`Threshold::Disabled`] sentinel above every level.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[repr(u8)]
pub enum Level {
    /// Fine-grained tracing output.
    Trace = 40,
    /// Diagnostic output for developers.
    Debug = 50,
    /// Normal operational messages.
    Info = 60,
    /// Something unexpected that the program recovered from.
    Warn = 70,
    /// A failure.
    Error = 80,
}

impl Level {
    /// Every level in ascending order.
    pub const ALL: [Self; 5] = [
        Self::Trace,
        Self::Debug,
        Self::Info,
        Self::Warn,
        Self::Error,
    ];

    /// Numeric rank used by the threshold comparison.
    #[inline]
    pub const fn rank(self) -> u8 {
        self as u8
    }

    /// Label written into the level column of each record.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Trace => "TRACE",
            Self::Debug => "DEBUG",
            Self::Info => "INFO",
            Self::Warn => "WARN",
            Self::Error => "ERROR",
        }
    }

    /// Parses a case-insensitive level name.
    ///
    /// Returns `None` for anything other than `trace`, `debug`, `info`, `warn`
    /// or `error`.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|level| level.as_str().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Level {
    type Err = LogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| LogError::InvalidPriority(s.to_owned()))
    }
}

/// The global severity threshold.
///
/// `Disabled` is what an unrecognized level name produces: it ranks above
/// every [`Level`], so no record passes.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Threshold {
    /// Records at or above this level pass.
    Level(Level),
    /// Nothing passes.
    Disabled,
}

impl Threshold {
    const DISABLED_RANK: u8 = u8::MAX;

    /// Parses a level name, falling back to [`Threshold::Disabled`].
    pub fn parse(name: &str) -> Self {
        Level::from_name(name).map_or(Self::Disabled, Self::Level)
    }

    /// Whether a record at `level` passes this threshold.
    #[inline]
    pub const fn allows(self, level: Level) -> bool {
        level.rank() >= self.rank()
    }

    pub(crate) const fn rank(self) -> u8 {
        match self {
            Self::Level(level) => level.rank(),
            Self::Disabled => Self::DISABLED_RANK,
        }
    }

    pub(crate) const fn from_rank(rank: u8) -> Self {
        match rank {
            40 => Self::Level(Level::Trace),
            50 => Self::Level(Level::Debug),
            60 => Self::Level(Level::Info),
            70 => Self::Level(Level::Warn),
            80 => Self::Level(Level::Error),
            _ => Self::Disabled,
        }
    }
}

impl From<Level> for Threshold {
    fn from(level: Level) -> Self {
        Self::Level(level)
    }
}

impl fmt::Display for Threshold {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Level(level) => level.fmt(f),
            Self::Disabled => f.write_str("DISABLED"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn levels_are_strictly_ordered() {
        for pair in Level::ALL.windows(2) {
            assert!(pair[0] < pair[1]);
            assert!(pair[0].rank() < pair[1].rank());
        }
    }

    #[test]
    fn from_name_is_case_insensitive() {
        assert_eq!(Level::from_name("trace"), Some(Level::Trace));
        assert_eq!(Level::from_name("DEBUG"), Some(Level::Debug));
        assert_eq!(Level::from_name("Info"), Some(Level::Info));
        assert_eq!(Level::from_name("wArN"), Some(Level::Warn));
        assert_eq!(Level::from_name("ERROR"), Some(Level::Error));
    }

    #[test]
    fn from_name_rejects_unknown_names() {
        assert_eq!(Level::from_name("err"), None);
        assert_eq!(Level::from_name("warning"), None);
        assert_eq!(Level::from_name(""), None);
        assert_eq!(Level::from_name(" info"), None);
    }

    #[test]
    fn from_str_reports_invalid_priority() {
        let err = "verbose".parse::<Level>().expect_err("unknown level");
        assert!(matches!(err, LogError::InvalidPriority(ref name) if name == "verbose"));
        assert_eq!("warn".parse::<Level>().expect("valid"), Level::Warn);
    }

    #[test]
    fn threshold_allows_levels_at_or_above() {
        for threshold in Level::ALL {
            for level in Level::ALL {
                assert_eq!(
                    Threshold::Level(threshold).allows(level),
                    level.rank() >= threshold.rank(),
                    "threshold {threshold} level {level}"
                );
            }
        }
    }

    #[test]
    fn disabled_threshold_denies_everything() {
        let threshold = Threshold::parse("loud");
        assert_eq!(threshold, Threshold::Disabled);
        for level in Level::ALL {
            assert!(!threshold.allows(level));
        }
    }

    #[test]
    fn rank_round_trips_through_threshold() {
        for level in Level::ALL {
            let threshold = Threshold::from(level);
            assert_eq!(Threshold::from_rank(threshold.rank()), threshold);
        }
        assert_eq!(
            Threshold::from_rank(Threshold::Disabled.rank()),
            Threshold::Disabled
        );
        assert_eq!(Threshold::from_rank(0), Threshold::Disabled);
    }

    #[test]
    fn display_uses_record_labels() {
        assert_eq!(Level::Error.to_string(), "ERROR");
        assert_eq!(Threshold::Level(Level::Info).to_string(), "INFO");
        assert_eq!(Threshold::Disabled.to_string(), "DISABLED");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn level_serializes_lowercase() {
        let json = serde_json::to_string(&Level::Warn).expect("serialize");
        assert_eq!(json, "\"warn\"");
        let level: Level = serde_json::from_str("\"error\"").expect("deserialize");
        assert_eq!(level, Level::Error);
    }
}
