//! Threshold-based log file sweeping.

use std::fs;
use std::path::{Path, PathBuf};

use crate::lifecycle::periodic::{PeriodicTask, TaskError};
use crate::observability::metrics;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SweepReport {
    /// Log files found in the directory.
    pub files: usize,
    /// Combined size of the files whose size could be read.
    pub total_bytes: u64,
    /// Files actually removed.
    pub deleted: usize,
}

#[derive(Debug, Clone)]
pub struct LogSweeper {
    directory: PathBuf,
    threshold_bytes: u64,
}

impl LogSweeper {
    pub fn new(directory: impl Into<PathBuf>, threshold_bytes: u64) -> Self {
        Self {
            directory: directory.into(),
            threshold_bytes,
        }
    }

    pub fn sweep(&self) -> SweepReport {
        let logs = log_files(&self.directory);

        let total_bytes = total_size(&logs);

        let mut report = SweepReport {
            files: logs.len(),
            total_bytes,
            deleted: 0,
        };

        if total_bytes > self.threshold_bytes {
            tracing::info!(
                total_mb = %format!("{:.1}", to_mib(total_bytes)),
                threshold_mb = %format!("{:.1}", to_mib(self.threshold_bytes)),
                files = logs.len(),
                "Cleaning log files"
            );
            for path in &logs {
                match fs::remove_file(path) {
                    Ok(()) => report.deleted += 1,
                    Err(e) => tracing::debug!(path = %path.display(), error = %e, "Failed to remove log file"),
                }
            }
            tracing::info!(deleted = report.deleted, "Log files cleaned");
        }

        metrics::record_sweep(&report);
        report
    }
}

/// Combined size of `paths`; a file whose metadata cannot be read adds
/// nothing.
fn total_size(paths: &[PathBuf]) -> u64 {
    paths
        .iter()
        .filter_map(|path| fs::metadata(path).ok())
        .map(|m| m.len())
        .sum()
}

fn to_mib(bytes: u64) -> f64 {
    bytes as f64 / (1024.0 * 1024.0)
}

/// Regular files with a `.log` extension directly inside `directory`.
fn log_files(directory: &Path) -> Vec<PathBuf> {
    let entries = match fs::read_dir(directory) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::debug!(directory = %directory.display(), error = %e, "Cannot list log directory");
            return Vec::new();
        }
    };

    entries
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().map(|t| t.is_file()).unwrap_or(false))
        .map(|entry| entry.path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "log"))
        .collect()
}

impl PeriodicTask for LogSweeper {
    fn name(&self) -> &'static str {
        "log-sweeper"
    }

    async fn tick(&mut self) -> Result<(), TaskError> {
        let sweeper = self.clone();
        tokio::task::spawn_blocking(move || sweeper.sweep()).await?;
        Ok(())
    }
}
