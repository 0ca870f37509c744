//! Several threads logging through the process-wide logger at once.
//!
//! This file holds a single test so the descriptor count is not disturbed by
//! other tests running in the same process.

use std::collections::HashSet;
use std::thread;

use logging::{debug_log, init_global_log};
use test_support::{LogDir, open_descriptor_count, parse_record};

const THREADS: usize = 3;
const MESSAGES: usize = 20_000;

/// Verifies every record is written whole and every file is closed when its
/// thread exits.
#[test]
fn three_threads_log_every_record_and_release_their_files() {
    let dir = LogDir::new();
    init_global_log("debug", Some(dir.path()), Some("stress")).expect("init");
    let baseline = open_descriptor_count();

    let workers: Vec<_> = (0..THREADS)
        .map(|worker| {
            thread::spawn(move || {
                for seq in 0..MESSAGES {
                    debug_log!("worker {worker} seq {seq}");
                }
            })
        })
        .collect();
    for worker in workers {
        worker.join().expect("worker panicked");
    }

    let lines = dir.lines("stress");
    assert_eq!(lines.len(), THREADS * MESSAGES);

    let mut seen = HashSet::with_capacity(lines.len());
    for line in &lines {
        let record = parse_record(line).unwrap_or_else(|| panic!("malformed: {line:?}"));
        assert_eq!(record.level, "DEBUG");
        assert!(seen.insert(record.message), "duplicate record {line:?}");
    }
    for worker in 0..THREADS {
        assert!(seen.contains(&format!("worker {worker} seq {}", MESSAGES - 1)));
    }

    if let (Some(before), Some(after)) = (baseline, open_descriptor_count()) {
        assert_eq!(after, before, "log files left open after threads exited");
    }
}
