//! Bounded formatting of a single log record.
//!
//! Each context owns one [`RecordScratch`]. A record is rendered into it as
//!
//! ```text
//! YYYYMMDD HH:MM:SS.ffffff|<pid>|<LEVEL>|<file>:<line>:<function>|<message>\n
//! ```
//!
//! and handed to the file with a single write. Output that does not fit is
//! cut on a character boundary; the trailing newline is always kept so the
//! file stays line oriented.

use std::fmt::{self, Write as _};
use std::sync::OnceLock;

use crate::calendar::{CivilTime, Timestamp};
use crate::levels::Level;

/// Capacity of the per-thread record buffer, newline included.
pub const RECORD_CAPACITY: usize = 1024;

/// Call-site information attached to every record.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Location {
    file: &'static str,
    line: u32,
    function: &'static str,
}

impl Location {
    /// Creates a location from `file!()`, `line!()` and a function name.
    pub const fn new(file: &'static str, line: u32, function: &'static str) -> Self {
        Self {
            file,
            line,
            function,
        }
    }

    /// Source file name without its directories.
    pub fn file_name(&self) -> &'static str {
        self.file.rsplit(['/', '\\']).next().unwrap_or(self.file)
    }

    /// Source line.
    pub const fn line(&self) -> u32 {
        self.line
    }

    /// Enclosing function name.
    pub const fn function(&self) -> &'static str {
        self.function
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.file_name(), self.line, self.function)
    }
}

/// The process id, read once.
pub(crate) fn process_id() -> u32 {
    static PID: OnceLock<u32> = OnceLock::new();
    *PID.get_or_init(std::process::id)
}

/// A rendered record borrowed from the scratch buffer.
#[derive(Debug)]
pub(crate) struct Rendered<'a> {
    pub(crate) bytes: &'a [u8],
    pub(crate) truncated: bool,
}

/// Fixed-size buffer a context renders records into.
pub(crate) struct RecordScratch {
    buf: [u8; RECORD_CAPACITY],
}

impl RecordScratch {
    pub(crate) const fn new() -> Self {
        Self {
            buf: [0; RECORD_CAPACITY],
        }
    }

    pub(crate) fn render(
        &mut self,
        now: Timestamp,
        civil: &CivilTime,
        level: Level,
        location: &Location,
        args: fmt::Arguments<'_>,
    ) -> Rendered<'_> {
        let (body, _) = self.buf.split_at_mut(RECORD_CAPACITY - 1);
        let mut writer = BoundedWriter::new(body);
        // A full buffer stops formatting early; what fit is kept.
        let _ = write!(
            writer,
            "{:04}{:02}{:02} {:02}:{:02}:{:02}.{:06}|{}|{}|{}|",
            civil.year,
            civil.month,
            civil.day,
            civil.hour,
            civil.minute,
            civil.second,
            now.micros,
            process_id(),
            level,
            location,
        );
        if !writer.truncated {
            let _ = writer.write_fmt(args);
        }
        let len = writer.len;
        let truncated = writer.truncated;

        self.buf[len] = b'\n';
        Rendered {
            bytes: &self.buf[..=len],
            truncated,
        }
    }
}

struct BoundedWriter<'a> {
    buf: &'a mut [u8],
    len: usize,
    truncated: bool,
}

impl<'a> BoundedWriter<'a> {
    fn new(buf: &'a mut [u8]) -> Self {
        Self {
            buf,
            len: 0,
            truncated: false,
        }
    }
}

impl fmt::Write for BoundedWriter<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        let room = self.buf.len() - self.len;
        if s.len() <= room {
            self.buf[self.len..self.len + s.len()].copy_from_slice(s.as_bytes());
            self.len += s.len();
            return Ok(());
        }

        let mut end = room;
        while !s.is_char_boundary(end) {
            end -= 1;
        }
        self.buf[self.len..self.len + end].copy_from_slice(&s.as_bytes()[..end]);
        self.len += end;
        self.truncated = true;
        Err(fmt::Error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::civil_from_timestamp;

    fn render_to_string(level: Level, message: fmt::Arguments<'_>) -> (String, bool) {
        let mut scratch = RecordScratch::new();
        let now = Timestamp::new(1_700_000_000, 42);
        let civil = civil_from_timestamp(now.secs, 8);
        let location = Location::new("src/worker/pool.rs", 17, "drain");
        let rendered = scratch.render(now, &civil, level, &location, message);
        (
            String::from_utf8(rendered.bytes.to_vec()).expect("utf-8"),
            rendered.truncated,
        )
    }

    #[test]
    fn renders_header_and_message() {
        let (line, truncated) = render_to_string(Level::Error, format_args!("disk {}", "full"));
        let expected = format!(
            "20231115 06:13:20.000042|{}|ERROR|pool.rs:17:drain|disk full\n",
            process_id()
        );
        assert_eq!(line, expected);
        assert!(!truncated);
    }

    #[test]
    fn oversized_message_is_cut_and_keeps_newline() {
        let long = "x".repeat(4000);
        let (line, truncated) = render_to_string(Level::Info, format_args!("{long}"));
        assert!(truncated);
        assert_eq!(line.len(), RECORD_CAPACITY);
        assert!(line.ends_with("x\n"));
        assert_eq!(line.matches('\n').count(), 1);
    }

    #[test]
    fn message_that_exactly_fills_the_buffer_is_not_truncated() {
        let (probe, _) = render_to_string(Level::Warn, format_args!(""));
        let header_len = probe.len() - 1;
        let fill = "y".repeat(RECORD_CAPACITY - 1 - header_len);
        let (line, truncated) = render_to_string(Level::Warn, format_args!("{fill}"));
        assert!(!truncated);
        assert_eq!(line.len(), RECORD_CAPACITY);
    }

    #[test]
    fn truncation_respects_char_boundaries() {
        let long = "é".repeat(1000);
        let (line, truncated) = render_to_string(Level::Debug, format_args!("{long}"));
        assert!(truncated);
        assert!(line.len() <= RECORD_CAPACITY);
        assert!(line.ends_with("é\n"));
    }

    #[test]
    fn location_strips_directories() {
        assert_eq!(Location::new("a/b/c.rs", 1, "f").file_name(), "c.rs");
        assert_eq!(Location::new("c.rs", 1, "f").file_name(), "c.rs");
        assert_eq!(Location::new(r"a\b\win.rs", 1, "f").file_name(), "win.rs");
        assert_eq!(Location::new("src/x.rs", 9, "run").to_string(), "x.rs:9:run");
    }

    #[test]
    fn bounded_writer_reports_overflow() {
        let mut storage = [0u8; 4];
        let mut writer = BoundedWriter::new(&mut storage);
        assert!(writer.write_str("ab").is_ok());
        assert!(writer.write_str("cde").is_err());
        assert_eq!(writer.len, 4);
        assert!(writer.truncated);
        assert_eq!(&storage, b"abcd");
    }
}
