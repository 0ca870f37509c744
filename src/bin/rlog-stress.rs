#![deny(unsafe_code)]

//! Spawns worker threads that hammer the logger with DEBUG records.

use mimalloc::MiMalloc;

/// High-performance memory allocator for improved allocation throughput.
#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

use std::path::PathBuf;
use std::process::ExitCode;
use std::thread;
use std::time::Instant;

use clap::Parser;
use logging::{debug_log, init_global_log};
use tracing_subscriber::EnvFilter;

/// Load generator for the per-thread rotating file logger.
#[derive(Parser, Debug)]
#[command(name = "rlog-stress")]
#[command(version)]
struct Args {
    /// Number of logging threads.
    #[arg(long, default_value_t = 3)]
    threads: usize,

    /// Records written by each thread.
    #[arg(long, default_value_t = 1_000_000)]
    messages: u64,

    /// Threshold name: trace, debug, info, warn or error.
    #[arg(long, default_value = logging::DEFAULT_THRESHOLD)]
    level: String,

    /// Base directory for log files.
    #[arg(long)]
    path: Option<PathBuf>,

    /// Subdirectory of the base directory.
    #[arg(long)]
    module: Option<String>,
}

fn main() -> ExitCode {
    // RUST_LOG=rlog::rotate=debug shows the logger's own open and rotate events.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    if let Err(error) = init_global_log(&args.level, args.path.as_deref(), args.module.as_deref()) {
        eprintln!("rlog-stress: {error}");
        return ExitCode::FAILURE;
    }

    let started = Instant::now();
    let workers: Vec<_> = (0..args.threads)
        .map(|worker| {
            let messages = args.messages;
            thread::spawn(move || {
                for seq in 0..messages {
                    debug_log!("worker {worker} record {seq} of {messages}");
                }
            })
        })
        .collect();

    let mut failed = false;
    for worker in workers {
        failed |= worker.join().is_err();
    }

    let elapsed = started.elapsed();
    let total = args.messages.saturating_mul(args.threads as u64);
    let rate = total as f64 / elapsed.as_secs_f64().max(f64::EPSILON);
    println!(
        "{total} records from {} threads in {:.3}s ({rate:.0} records/s)",
        args.threads,
        elapsed.as_secs_f64()
    );

    if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
