//! Logging setup: `tracing` events written to a size-rotated file.
//!
//! The library only emits `tracing` events; installing a subscriber is up to
//! the embedding application. The `placemarks` binary calls [`init_tracing`],
//! which writes to `<data_dir>/placemarks.log`.
//!
//! # Configuration
//!
//! Trace level is controlled via:
//! 1. `RUST_LOG` environment variable (highest priority)
//! 2. `trace_level` config option
//! 3. Default: `"info"`
//!
//! # Modules
//!
//! - `init`: Subscriber setup
//! - `file_writer`: Rotating file writer with size-based rotation

mod file_writer;
mod init;

pub use file_writer::{RotatingFile, MAX_BACKUP_FILES, MAX_FILE_SIZE_BYTES};
pub use init::{init_tracing, LOG_FILE_NAME};
