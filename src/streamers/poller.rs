//! Modification-time polling of the streamer file.
//!
//! The watermark only moves forward: a tick reloads when the file's mtime is
//! strictly newer than the last one seen. Touching the file without changing
//! its content still causes a reload; the reconciler then finds no change.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;

use crate::engine::MinerEngine;
use crate::lifecycle::periodic::{PeriodicTask, TaskError};
use crate::observability::metrics;
use crate::streamers::identifier::StreamerId;
use crate::streamers::loader::load_streamers;
use crate::streamers::reconcile::{reconcile, ReconcileOutcome};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollOutcome {
    /// File not modified since the last tick.
    Unchanged,
    /// File was reloaded and handed to the reconciler.
    Reloaded(ReconcileOutcome),
}

/// Modification time of `path`, or the epoch when it cannot be read.
pub fn modified_time(path: &Path) -> SystemTime {
    fs::metadata(path)
        .and_then(|m| m.modified())
        .unwrap_or(SystemTime::UNIX_EPOCH)
}

pub struct StreamerPoller<E: ?Sized> {
    path: PathBuf,
    default: StreamerId,
    engine: Arc<E>,
    watermark: SystemTime,
}

impl<E> StreamerPoller<E>
where
    E: MinerEngine + ?Sized + 'static,
{
    /// The watermark starts at the file's current mtime, so the list loaded
    /// at startup is not reloaded on the first tick.
    pub fn new(path: impl Into<PathBuf>, default: StreamerId, engine: Arc<E>) -> Self {
        let path = path.into();
        let watermark = modified_time(&path);
        Self {
            path,
            default,
            engine,
            watermark,
        }
    }

    pub fn watermark(&self) -> SystemTime {
        self.watermark
    }

    pub async fn poll_once(&mut self) -> Result<PollOutcome, TaskError> {
        metrics::record_poll_tick();

        let path = self.path.clone();
        let observed = tokio::task::spawn_blocking(move || modified_time(&path)).await?;
        if observed <= self.watermark {
            return Ok(PollOutcome::Unchanged);
        }

        tracing::info!(path = %self.path.display(), "Detected change in streamer file");
        self.watermark = observed;

        let path = self.path.clone();
        let default = self.default.clone();
        let candidate = tokio::task::spawn_blocking(move || load_streamers(&path, &default)).await?;

        Ok(PollOutcome::Reloaded(reconcile(self.engine.as_ref(), candidate)))
    }
}

impl<E> PeriodicTask for StreamerPoller<E>
where
    E: MinerEngine + ?Sized + 'static,
{
    fn name(&self) -> &'static str {
        "streamer-poller"
    }

    async fn tick(&mut self) -> Result<(), TaskError> {
        self.poll_once().await.map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tempfile::TempDir;

    #[test]
    fn test_unreadable_file_reads_as_epoch() {
        let dir = TempDir::new().unwrap();
        assert_eq!(
            modified_time(&dir.path().join("missing.csv")),
            SystemTime::UNIX_EPOCH
        );
    }

    #[test]
    fn test_existing_file_has_real_mtime() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("streamers.csv");
        fs::write(&path, "a").unwrap();

        let file = fs::File::options().write(true).open(&path).unwrap();
        let stamp = SystemTime::UNIX_EPOCH + Duration::from_secs(1_700_000_000);
        file.set_modified(stamp).unwrap();

        assert_eq!(modified_time(&path), stamp);
    }
}
