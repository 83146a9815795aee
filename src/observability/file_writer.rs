//! Size-rotated log file used as the `tracing` fmt layer's writer.
//!
//! When the log grows past [`MAX_FILE_SIZE_BYTES`] it is renamed to
//! `<name>.log.<millis>` and a fresh file is started. Only the newest
//! [`MAX_BACKUP_FILES`] backups are kept.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Maximum file size before rotation (10 MB).
pub const MAX_FILE_SIZE_BYTES: u64 = 10 * 1024 * 1024;

/// Number of backup files to retain after rotation.
pub const MAX_BACKUP_FILES: usize = 3;

/// Rotating append-only log file.
///
/// `&RotatingFile` implements [`io::Write`], so an `Arc<RotatingFile>` can be
/// handed to `tracing_subscriber::fmt::layer().with_writer(...)` directly. The
/// file is opened lazily on the first write.
pub struct RotatingFile {
    file_path: PathBuf,
    max_bytes: u64,
    file: Mutex<Option<fs::File>>,
}

impl RotatingFile {
    #[must_use]
    pub const fn new(file_path: PathBuf) -> Self {
        Self::with_limit(file_path, MAX_FILE_SIZE_BYTES)
    }

    #[must_use]
    pub const fn with_limit(file_path: PathBuf, max_bytes: u64) -> Self {
        Self {
            file_path,
            max_bytes,
            file: Mutex::new(None),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.file_path
    }

    fn write_record(&self, buf: &[u8]) -> io::Result<usize> {
        let mut file = self
            .file
            .lock()
            .map_err(|e| io::Error::new(io::ErrorKind::Other, format!("log mutex poisoned: {e}")))?;

        if fs::metadata(&self.file_path).is_ok_and(|m| m.len() > self.max_bytes) {
            *file = None;
            self.rotate()?;
        }

        if file.is_none() {
            *file = Some(
                OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(&self.file_path)?,
            );
        }

        match file.as_mut() {
            Some(handle) => {
                handle.write_all(buf)?;
                Ok(buf.len())
            }
            None => Err(io::Error::new(io::ErrorKind::Other, "log file unavailable")),
        }
    }

    fn rotate(&self) -> io::Result<()> {
        let stamp = chrono::Utc::now().timestamp_millis();
        let backup = self.backup_prefix().map(|prefix| {
            self.file_path.with_file_name(format!("{prefix}{stamp}"))
        });

        if let Some(backup) = backup {
            if self.file_path.exists() {
                fs::rename(&self.file_path, backup)?;
            }
        }

        self.prune_backups()
    }

    /// File name prefix shared by every backup: `<name>.`.
    fn backup_prefix(&self) -> Option<String> {
        self.file_path
            .file_name()
            .and_then(|name| name.to_str())
            .map(|name| format!("{name}."))
    }

    fn prune_backups(&self) -> io::Result<()> {
        let (Some(parent), Some(prefix)) = (self.file_path.parent(), self.backup_prefix()) else {
            return Ok(());
        };

        let mut backups: Vec<(u64, PathBuf)> = fs::read_dir(parent)?
            .filter_map(Result::ok)
            .filter_map(|entry| {
                let name = entry.file_name().into_string().ok()?;
                let stamp = name.strip_prefix(&prefix)?.parse::<u64>().ok()?;
                Some((stamp, entry.path()))
            })
            .collect();

        backups.sort_by(|a, b| b.0.cmp(&a.0));
        for (_, stale) in backups.iter().skip(MAX_BACKUP_FILES) {
            let _ = fs::remove_file(stale);
        }
        Ok(())
    }
}

impl Write for &RotatingFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.write_record(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        let mut file = self
            .file
            .lock()
            .map_err(|e| io::Error::new(io::ErrorKind::Other, format!("log mutex poisoned: {e}")))?;
        match file.as_mut() {
            Some(handle) => handle.flush(),
            None => Ok(()),
        }
    }
}

impl std::fmt::Debug for RotatingFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RotatingFile")
            .field("file_path", &self.file_path)
            .field("max_bytes", &self.max_bytes)
            .finish_non_exhaustive()
    }
}
