use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use chirp_core::LogLabel;
use thiserror::Error;

/// Produces the timestamp prefix for each entry.
pub type Clock = Arc<dyn Fn() -> String + Send + Sync>;

#[derive(Debug, Error)]
pub enum ActivityLogError {
    #[error("failed to append to activity log {0:?}: {1}")]
    Write(PathBuf, io::Error),
}

/// One activity line, newline included.
pub fn format_entry(timestamp: &str, name: &str, label: LogLabel) -> String {
    format!("{timestamp}: {label} photo '{name}'\n")
}

/// Append-only record of every post attempt.
#[derive(Clone)]
pub struct ActivityLog {
    path: PathBuf,
    clock: Clock,
}

impl ActivityLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            clock: Arc::new(|| {
                chrono::Local::now()
                    .format("%Y-%m-%d %H:%M:%S%.6f")
                    .to_string()
            }),
        }
    }

    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn record(&self, name: &str, label: LogLabel) -> Result<(), ActivityLogError> {
        let line = format_entry(&(self.clock)(), name, label);
        self.append(&line)
            .map_err(|err| ActivityLogError::Write(self.path.clone(), err))
    }

    fn append(&self, line: &str) -> io::Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(line.as_bytes())?;
        file.flush()
    }
}

impl std::fmt::Debug for ActivityLog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActivityLog")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}
