//! Tracing initialization and subscriber setup.

use super::file_writer::RotatingFile;
use crate::Config;
use std::sync::Arc;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// File name of the log inside the data directory.
pub const LOG_FILE_NAME: &str = "placemarks.log";

/// Initializes the tracing subscriber with a rotating log file.
///
/// # Trace Level Resolution
///
/// 1. `RUST_LOG` if set and valid
/// 2. `config.trace_level`
/// 3. Default: `"info"`
///
/// # Initialization Behavior
///
/// - Creates the data directory if it doesn't exist
/// - Silently does nothing if directory creation fails (logging is optional)
/// - Idempotent: only the first call installs a subscriber
pub fn init_tracing(config: &Config) {
    let level = config
        .trace_level
        .clone()
        .unwrap_or_else(|| "info".to_string());

    let data_dir = config.data_dir();
    if std::fs::create_dir_all(&data_dir).is_err() {
        return;
    }

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let writer = Arc::new(RotatingFile::new(data_dir.join(LOG_FILE_NAME)));

    let subscriber = tracing_subscriber::registry().with(filter).with(
        fmt::layer()
            .with_writer(writer)
            .with_ansi(false)
            .with_target(true),
    );

    let _ = subscriber.try_init();
}
