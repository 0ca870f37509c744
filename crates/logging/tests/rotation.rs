//! Integration tests for size-based rotation and file naming.

use std::fs;

use logging::{
    HourBucket, Level, Location, LogConfig, LogGlobal, RECORD_CAPACITY, RotationPolicy, Timestamp,
    log_file_path,
};
use test_support::{LogDir, parse_record};

const MODULE: &str = "rot";

fn here() -> Location {
    Location::new(file!(), line!(), "tests")
}

fn small_files(dir: &LogDir, max_file_size: u64) -> LogGlobal {
    let global = LogGlobal::new();
    global
        .init(
            &LogConfig::new("trace")
                .with_base_path(dir.path())
                .with_module_name(MODULE)
                .with_rotation(RotationPolicy {
                    max_file_size,
                    check_interval_ms: 0,
                }),
        )
        .expect("init");
    global
}

fn index_of(name: &str) -> u32 {
    name.rsplit_once(".log.")
        .map_or(0, |(_, index)| index.parse().expect("numeric index"))
}

// ============================================================================
// Size Cap
// ============================================================================

/// Verifies a small cap spreads records over increasing generations, each
/// overshooting the cap by at most one record.
#[test]
fn small_cap_produces_successive_generations() {
    const CAP: u64 = 4096;
    let dir = LogDir::new();
    let global = small_files(&dir, CAP);

    for i in 0..500 {
        if global.check(Level::Info) {
            global.log(Level::Info, &here(), format_args!("record number {i:05} {}", "x".repeat(40)));
        }
    }

    let files = dir.log_files(MODULE);
    assert!(files.len() > 1, "expected rotation, got {files:?}");

    let mut by_hour: Vec<(String, Vec<u32>)> = Vec::new();
    for path in &files {
        let name = path.file_name().unwrap().to_string_lossy().into_owned();
        let hour = name[..10].to_owned();
        match by_hour.iter_mut().find(|(h, _)| *h == hour) {
            Some((_, indices)) => indices.push(index_of(&name)),
            None => by_hour.push((hour, vec![index_of(&name)])),
        }
    }
    for (_, indices) in &mut by_hour {
        indices.sort_unstable();
        let expected: Vec<u32> = (0..indices.len() as u32).collect();
        assert_eq!(*indices, expected, "generations must be contiguous");
    }

    for path in &files {
        let len = fs::metadata(path).unwrap().len();
        assert!(len <= CAP + RECORD_CAPACITY as u64, "{path:?} is {len} bytes");
    }

    let lines = dir.lines(MODULE);
    assert_eq!(lines.len(), 500);
    assert!(lines.iter().all(|line| parse_record(line).is_some()));
}

/// Verifies a restarted logger continues after generations that are full.
#[test]
fn restart_skips_full_generations() {
    let dir = LogDir::new();
    let global = small_files(&dir, 64);
    let bucket = HourBucket::of(&Timestamp::now().civil(logging::DEFAULT_UTC_OFFSET_HOURS));
    let module_dir = dir.module_dir(MODULE);
    fs::write(log_file_path(&module_dir, bucket, 0), [b'#'; 64]).unwrap();
    fs::write(log_file_path(&module_dir, bucket, 1), [b'#'; 80]).unwrap();

    assert!(global.check(Level::Warn));
    global.log(Level::Warn, &here(), format_args!("resumed"));

    // The hour may have turned over between the two calls above.
    let current = HourBucket::of(&Timestamp::now().civil(logging::DEFAULT_UTC_OFFSET_HOURS));
    if current == bucket {
        let text = fs::read_to_string(log_file_path(&module_dir, bucket, 2)).unwrap();
        assert!(text.ends_with("|resumed\n"));
        assert_eq!(fs::read(log_file_path(&module_dir, bucket, 0)).unwrap(), [b'#'; 64]);
    }
}

/// Verifies oversized messages are cut but remain one line.
#[test]
fn oversized_record_is_truncated_to_one_line() {
    let dir = LogDir::new();
    let global = small_files(&dir, 1 << 20);
    let long = "z".repeat(RECORD_CAPACITY * 3);

    assert!(global.check(Level::Debug));
    global.log(Level::Debug, &here(), format_args!("{long}"));
    global.log(Level::Debug, &here(), format_args!("short"));

    let lines = dir.lines(MODULE);
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0].len(), RECORD_CAPACITY - 1);
    assert!(lines[0].ends_with('z'));
    assert_eq!(parse_record(&lines[1]).expect("record").message, "short");
}

// ============================================================================
// File Naming
// ============================================================================

/// Verifies the on-disk name follows the configured UTC offset.
#[test]
fn file_name_uses_configured_offset() {
    let dir = LogDir::new();
    let global = LogGlobal::new();
    global
        .init(
            &LogConfig::new("info")
                .with_base_path(dir.path())
                .with_module_name(MODULE)
                .with_utc_offset_hours(0),
        )
        .expect("init");

    let before = HourBucket::of(&Timestamp::now().civil(0));
    assert!(global.check(Level::Info));
    global.log(Level::Info, &here(), format_args!("utc"));
    let after = HourBucket::of(&Timestamp::now().civil(0));

    let files = dir.log_files(MODULE);
    assert_eq!(files.len(), 1);
    let name = files[0].file_name().unwrap().to_string_lossy().into_owned();
    assert!(name == before.file_name(0) || name == after.file_name(0), "{name}");
}

// ============================================================================
// Permissions
// ============================================================================

/// Verifies new log files get mode 0644 and the module directory no more
/// than 0755.
#[cfg(unix)]
#[test]
fn new_files_are_created_with_mode_0644() {
    use std::os::unix::fs::PermissionsExt;

    let dir = LogDir::new();
    let global = small_files(&dir, 1 << 20);
    assert!(global.check(Level::Info));
    global.log(Level::Info, &here(), format_args!("perm"));

    let files = dir.log_files(MODULE);
    let mode = fs::metadata(&files[0]).unwrap().permissions().mode();
    assert_eq!(mode & 0o777, 0o644);
    let dir_mode = fs::metadata(dir.module_dir(MODULE)).unwrap().permissions().mode();
    assert_eq!(dir_mode & 0o777 & !0o755, 0);
}
