#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! crates/platform/src/lib.rs
//!
//! # Overview
//!
//! Filesystem primitives the logger needs from the operating system:
//! recursive directory creation that tolerates concurrent creators, and
//! append-mode log files created with fixed permissions.
//!
//! # Errors
//!
//! Every fallible operation returns [`PlatformError`], which carries the path
//! that failed together with the underlying [`std::io::Error`].

mod error;
pub mod fs;

pub use error::PlatformError;
pub use fs::{AppendFile, DIR_MODE, LOG_FILE_MODE, ensure_dir, open_append};
