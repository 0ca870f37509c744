//! Hour-bucketed file names and the initial index probe.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::calendar::CivilTime;
use crate::error::LogError;

/// The civil hour a log file belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HourBucket {
    year: i64,
    month: u8,
    day: u8,
    hour: u8,
}

impl HourBucket {
    /// The bucket containing `civil`.
    pub const fn of(civil: &CivilTime) -> Self {
        Self {
            year: civil.year,
            month: civil.month,
            day: civil.day,
            hour: civil.hour,
        }
    }

    /// `YYYYMMDDHH.log` for index 0, `YYYYMMDDHH.log.<index>` otherwise.
    pub fn file_name(&self, index: u32) -> String {
        if index == 0 {
            format!("{self}.log")
        } else {
            format!("{self}.log.{index}")
        }
    }
}

impl fmt::Display for HourBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04}{:02}{:02}{:02}",
            self.year, self.month, self.day, self.hour
        )
    }
}

/// Path of generation `index` of `bucket` inside `directory`.
pub fn log_file_path(directory: &Path, bucket: HourBucket, index: u32) -> PathBuf {
    directory.join(bucket.file_name(index))
}

/// First index of `bucket` whose file is absent or below `max_file_size`.
pub(crate) fn probe_index(
    directory: &Path,
    bucket: HourBucket,
    max_file_size: u64,
) -> Result<u32, LogError> {
    let mut index = 0;
    loop {
        let path = log_file_path(directory, bucket, index);
        match fs::metadata(&path) {
            Ok(meta) if meta.len() >= max_file_size => index += 1,
            Ok(_) => return Ok(index),
            Err(error) if error.kind() == io::ErrorKind::NotFound => return Ok(index),
            Err(error) => return Err(LogError::probe(path, error)),
        }
    }
}
